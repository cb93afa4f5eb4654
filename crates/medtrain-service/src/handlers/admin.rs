//! Admin session handlers.
//!
//! These keep their own response shapes (`success` / `valid` flags) rather
//! than the error envelope, since the admin UI branches on them.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Login request.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// The shared admin password.
    #[serde(default)]
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Whether the password matched.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Issued token, on success only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

/// Request naming a session token.
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    /// The token to check or forget.
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Verify response.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Whether the token is live.
    pub valid: bool,
}

/// Logout response.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true.
    pub success: bool,
}

/// Exchange the admin password for a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Option<Json<LoginRequest>>,
) -> Response {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    match state.sessions.login(&request.password).await {
        Some(token) => Json(LoginResponse {
            success: true,
            message: "Login successful".into(),
            session_token: Some(token),
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message: "Invalid password".into(),
                session_token: None,
            }),
        )
            .into_response(),
    }
}

/// Check whether a session token is live.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SessionRequest>>,
) -> Response {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let valid = match request.session_token.as_deref() {
        Some(token) if !token.is_empty() => state.sessions.verify(token).await,
        _ => false,
    };

    if valid {
        Json(VerifyResponse { valid }).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(VerifyResponse { valid })).into_response()
    }
}

/// Forget a session token. Always succeeds.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SessionRequest>>,
) -> Json<LogoutResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    if let Some(token) = request.session_token.as_deref() {
        state.sessions.logout(token).await;
    }

    Json(LogoutResponse { success: true })
}
