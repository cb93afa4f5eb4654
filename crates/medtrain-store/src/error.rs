//! Error types for catalog storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record, e.g. "card".
        entity: &'static str,
        /// The missing id.
        id: i64,
    },

    /// A unique constraint was violated.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A row referenced another row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Input rejected before reaching the database.
    #[error("validation error: {0}")]
    Validation(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Shorthand for a missing card.
    #[must_use]
    pub fn card_not_found(id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity: "card",
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::DuplicateKey(db.message().to_string());
            }
            if db.is_foreign_key_violation() {
                return Self::InvalidReference(db.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<medtrain_core::CatalogError> for StoreError {
    fn from(err: medtrain_core::CatalogError) -> Self {
        Self::Validation(err.to_string())
    }
}
