//! Error types for the catalog domain.

use crate::ids::IdError;

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while validating or normalizing catalog input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A required field is missing or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// A media list could not be normalized to a list of URLs.
    #[error("invalid media list for {field}: {reason}")]
    InvalidMediaList {
        /// The field that held the bad value.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}

impl CatalogError {
    /// Shorthand for a missing required field.
    #[must_use]
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }
}
