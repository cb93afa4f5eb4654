//! Admin session gate and extractor.
//!
//! The gate holds one shared password and a process-wide set of issued
//! tokens. Tokens never expire and are lost on restart.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::sync::RwLock;

use crate::crypto::{constant_time_eq, generate_session_token};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying an admin session token.
pub const SESSION_HEADER: &str = "x-session-token";

/// Shared-secret login with an in-memory token set.
pub struct SessionGate {
    password: String,
    sessions: RwLock<HashSet<String>>,
}

impl SessionGate {
    /// Create a gate for the given shared password.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            sessions: RwLock::new(HashSet::new()),
        }
    }

    /// Check the password and, on match, mint and remember a new token.
    pub async fn login(&self, password: &str) -> Option<String> {
        if !constant_time_eq(password, &self.password) {
            tracing::info!("Admin login rejected");
            return None;
        }

        let token = generate_session_token();
        self.sessions.write().await.insert(token.clone());
        tracing::info!("Admin session issued");
        Some(token)
    }

    /// Whether the token is currently valid.
    pub async fn verify(&self, token: &str) -> bool {
        self.sessions.read().await.contains(token)
    }

    /// Forget a token. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        if self.sessions.write().await.remove(token) {
            tracing::info!("Admin session closed");
        }
    }
}

/// Admin session required by catalog mutations.
///
/// When `require_admin_session` is off every request passes. When on, the
/// request must carry a live token in `X-Session-Token` or
/// `Authorization: Bearer`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.require_admin_session {
            return Ok(Self);
        }

        let token = session_token(parts).ok_or(ApiError::Unauthorized)?;

        if !state.sessions.verify(&token).await {
            tracing::debug!("Rejected unknown admin session token");
            return Err(ApiError::Unauthorized);
        }

        Ok(Self)
    }
}

/// Read the session token from the request headers.
fn session_token(parts: &Parts) -> Option<String> {
    if let Some(token) = parts
        .headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(token.trim().to_string());
    }

    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_verify_logout() {
        let gate = SessionGate::new("q1");

        assert!(gate.login("wrong").await.is_none());

        let token = gate.login("q1").await.unwrap();
        assert!(gate.verify(&token).await);

        gate.logout(&token).await;
        assert!(!gate.verify(&token).await);

        // Logging out twice is harmless.
        gate.logout(&token).await;
    }

    #[tokio::test]
    async fn concurrent_logins_all_register() {
        let gate = Arc::new(SessionGate::new("q1"));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                tokio::spawn(async move { gate.login("q1").await })
            })
            .collect();

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap().unwrap());
        }

        let distinct: HashSet<&String> = tokens.iter().collect();
        assert_eq!(distinct.len(), 16);
        for token in &tokens {
            assert!(gate.verify(token).await);
        }
    }
}
