//! Core types for the medical-device training catalog.
//!
//! This crate provides the foundational types used throughout the catalog service:
//!
//! - **Identifiers**: `CategoryId`, `CardId`, `CommentId`
//! - **Catalog**: `Category`, `TrainingCard`, `CardView`, `CardInput`
//! - **Media**: `MediaList`, `MediaListInput` (the normalization boundary for URL lists)
//! - **Engagement**: `Comment`, `LikeOutcome`, `LikeToggle`, `CatalogStats`
//!
//! # Localization
//!
//! Categories and cards carry an English primary text plus two extra locales,
//! Swahili (`*_swahili`) and Korean (`*_korean`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod card;
pub mod category;
pub mod engagement;
pub mod error;
pub mod ids;
pub mod media;

pub use card::{CardFields, CardInput, CardView, TrainingCard};
pub use category::{Category, CategoryInput, ALL_CATEGORY_ID, ALL_CATEGORY_NAME};
pub use engagement::{
    CatalogStats, Comment, CommentInput, LikeOutcome, LikeToggle, TopCard,
    ANONYMOUS_USER, TOP_CARDS_LIMIT,
};
pub use error::{CatalogError, Result};
pub use ids::{CardId, CategoryId, CommentId, IdError};
pub use media::{MediaList, MediaListInput};
