//! SQLite storage layer for the training catalog.
//!
//! This crate provides persistent storage for categories, training cards,
//! comments, and likes using SQLite through `sqlx`.
//!
//! # Architecture
//!
//! The schema has four tables:
//!
//! - `categories`: named groupings, `name` unique
//! - `training_cards`: card content, media URLs, view and like counters;
//!   `category_id` is set to `NULL` when its category is deleted
//! - `comments`: comments per card, deleted with their card
//! - `card_likes`: one row per `(card_id, user_identifier)`, deleted with their card
//!
//! Foreign keys are enforced on every pooled connection. Each operation
//! acquires a pooled connection and releases it on every exit path.
//!
//! # Example
//!
//! ```no_run
//! use medtrain_core::{CardInput, CategoryInput};
//! use medtrain_store::{SqliteStore, Store};
//!
//! # async fn example() -> medtrain_store::Result<()> {
//! let store = SqliteStore::open("/tmp/medical_training.db").await?;
//!
//! let lighting = store.create_category(&CategoryInput::named("Theatre Lights")).await?;
//! let mut card = CardInput::titled("LED Headlamp");
//! card.category_id = Some(lighting);
//! let card_id = store.create_card(&card.normalize()?).await?;
//!
//! let view = store.get_card(card_id).await?;
//! assert_eq!(view.card.view_count, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use medtrain_core::{
    CardFields, CardId, CardView, CatalogStats, Category, CategoryId, CategoryInput, Comment,
    CommentId, CommentInput, LikeToggle, ALL_CATEGORY_ID,
};

/// Filter for [`Store::list_cards`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Restrict to one category. [`ALL_CATEGORY_ID`] means no restriction.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring matched against title OR markdown body.
    pub search: Option<String>,
}

impl CardFilter {
    /// The category restriction actually applied.
    #[must_use]
    pub fn effective_category(&self) -> Option<CategoryId> {
        self.category_id.filter(|id| *id != ALL_CATEGORY_ID)
    }

    /// The search term actually applied; blank terms are ignored.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// The storage trait defining all catalog and engagement operations.
///
/// This trait abstracts the storage layer so handlers depend on behavior,
/// not on SQLite.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Category Operations
    // =========================================================================

    /// List all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Create a category and return its id.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if the name is blank.
    /// - `StoreError::DuplicateKey` if the name is taken; no row is created.
    async fn create_category(&self, input: &CategoryInput) -> Result<CategoryId>;

    /// Overwrite every editable field of a category.
    ///
    /// Succeeds silently when the id does not exist.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if the name is blank.
    /// - `StoreError::DuplicateKey` if the new name belongs to another category.
    async fn update_category(&self, id: CategoryId, input: &CategoryInput) -> Result<()>;

    /// Delete a category. Cards in it keep existing with no category.
    ///
    /// Succeeds silently when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn delete_category(&self, id: CategoryId) -> Result<()>;

    // =========================================================================
    // Card Operations
    // =========================================================================

    /// List cards matching `filter`, newest first, with category names and
    /// comment counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_cards(&self, filter: &CardFilter) -> Result<Vec<CardView>>;

    /// Record one view of a card and return it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the card doesn't exist.
    async fn get_card(&self, id: CardId) -> Result<CardView>;

    /// Create a card and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidReference` if `category_id` names no category.
    async fn create_card(&self, fields: &CardFields) -> Result<CardId>;

    /// Overwrite every editable field of a card and refresh `updated_at`.
    ///
    /// Succeeds silently when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidReference` if `category_id` names no category.
    async fn update_card(&self, id: CardId, fields: &CardFields) -> Result<()>;

    /// Delete a card together with its comments and likes.
    ///
    /// Succeeds silently when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn delete_card(&self, id: CardId) -> Result<()>;

    // =========================================================================
    // Engagement Operations
    // =========================================================================

    /// Like the card for `user_identifier`, or remove that like if present.
    ///
    /// The like row and the card's `like_count` change in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the card doesn't exist.
    async fn toggle_like(&self, card_id: CardId, user_identifier: &str) -> Result<LikeToggle>;

    /// List a card's comments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_comments(&self, card_id: CardId) -> Result<Vec<Comment>>;

    /// Append a comment to a card.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if either field is blank.
    /// - `StoreError::NotFound` if the card doesn't exist.
    async fn add_comment(&self, card_id: CardId, input: &CommentInput) -> Result<CommentId>;

    /// Aggregate counters over the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn stats(&self) -> Result<CatalogStats>;
}
