//! Cryptographic utilities for admin sessions.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Number of random bytes in a session token.
const SESSION_TOKEN_BYTES: usize = 32;

/// Mint a new opaque session token.
///
/// The token is 32 bytes from the thread-local CSPRNG, URL-safe base64
/// encoded without padding (43 characters).
#[must_use]
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Only the length is leaked: strings of different lengths compare unequal
/// immediately.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
