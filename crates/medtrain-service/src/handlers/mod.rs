//! API handlers.

use serde::Serialize;

pub mod admin;
pub mod ai;
pub mod cards;
pub mod categories;
pub mod engagement;
pub mod health;
pub mod uploads;

/// Response for a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Id of the new row.
    pub id: i64,
    /// Confirmation text.
    pub message: String,
}

impl CreatedResponse {
    /// Build a create response.
    #[must_use]
    pub fn new(id: impl Into<i64>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Response carrying only a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: String,
}

impl MessageResponse {
    /// Build a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
