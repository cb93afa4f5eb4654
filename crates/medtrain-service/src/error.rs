//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use medtrain_core::CatalogError;
use medtrain_store::StoreError;

use crate::assistant::AssistantError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required field is missing or a value is malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Bad request - unreadable input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unauthorized - missing or invalid admin session.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A unique key is already taken.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Upload type or extension not accepted.
    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    /// Upload carried no file.
    #[error("missing file: {0}")]
    MissingFile(String),

    /// A collaborator needed by this route is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The upstream service answered with a failure.
    #[error("upstream error: {message}")]
    Upstream {
        /// Upstream HTTP status, when one was received.
        status: Option<u16>,
        /// What went wrong.
        message: String,
    },

    /// The upstream service did not answer in time.
    #[error("upstream timeout")]
    UpstreamTimeout,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                msg.clone(),
                None,
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Admin session required".to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::DuplicateKey(msg) => (StatusCode::CONFLICT, "duplicate_key", msg.clone(), None),
            Self::InvalidFileType(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_file_type",
                msg.clone(),
                None,
            ),
            Self::MissingFile(msg) => (StatusCode::BAD_REQUEST, "missing_file", msg.clone(), None),
            Self::NotConfigured(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_configured",
                msg.clone(),
                None,
            ),
            Self::Upstream { status, message } => {
                tracing::warn!(upstream_status = ?status, error = %message, "Upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    message.clone(),
                    status.map(|s| serde_json::json!({ "upstream_status": s })),
                )
            }
            Self::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "upstream_timeout",
                "Request timeout. Please try again.".to_string(),
                None,
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            StoreError::DuplicateKey(msg) => Self::DuplicateKey(msg),
            StoreError::InvalidReference(msg) | StoreError::Validation(msg) => {
                Self::Validation(msg)
            }
            StoreError::Database(msg) | StoreError::Migration(msg) | StoreError::Io(msg) => {
                Self::Internal(msg)
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Timeout => Self::UpstreamTimeout,
            AssistantError::Api { status, .. } => Self::Upstream {
                status: Some(status),
                message: format!("Assistant API error: {status}"),
            },
            AssistantError::Http(e) => Self::Upstream {
                status: None,
                message: format!("Assistant request failed: {e}"),
            },
            AssistantError::MalformedResponse(msg) => Self::Upstream {
                status: None,
                message: format!("Malformed assistant response: {msg}"),
            },
        }
    }
}
