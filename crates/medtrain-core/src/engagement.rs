//! Engagement types: comments, likes, and catalog statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::ids::{CardId, CommentId};

/// Identifier used for likes that arrive without one.
///
/// All anonymous callers share this single like slot per card.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Number of cards reported in [`CatalogStats::top_cards`].
pub const TOP_CARDS_LIMIT: i64 = 5;

/// A comment left on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Comment {
    /// Row id.
    pub id: CommentId,
    /// The card commented on.
    pub card_id: CardId,
    /// Display name of the commenter.
    pub user_name: String,
    /// Comment body.
    pub comment_text: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// A new comment as sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentInput {
    /// Display name of the commenter (required).
    #[serde(default)]
    pub user_name: String,
    /// Comment body (required).
    #[serde(default)]
    pub comment_text: String,
}

impl CommentInput {
    /// Create a comment input.
    #[must_use]
    pub fn new(user_name: impl Into<String>, comment_text: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            comment_text: comment_text.into(),
        }
    }

    /// Trim both fields and require them to be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` naming the first blank field.
    pub fn validated(self) -> Result<Self> {
        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err(CatalogError::required("user_name"));
        }
        let comment_text = self.comment_text.trim();
        if comment_text.is_empty() {
            return Err(CatalogError::required("comment_text"));
        }

        Ok(Self {
            user_name: user_name.to_string(),
            comment_text: comment_text.to_string(),
        })
    }
}

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeOutcome {
    /// A like row was inserted.
    Liked,
    /// An existing like row was removed.
    Unliked,
}

impl LikeOutcome {
    /// Human-readable confirmation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Liked => "Card liked successfully",
            Self::Unliked => "Card unliked successfully",
        }
    }
}

/// Result of a toggle-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    /// Which way the toggle went.
    pub status: LikeOutcome,
    /// The card's like count after the toggle.
    pub like_count: i64,
}

/// One entry of the most-viewed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopCard {
    /// Card id.
    pub id: CardId,
    /// English title.
    pub title: String,
    /// Number of detail views.
    pub view_count: i64,
    /// Number of likes.
    pub like_count: i64,
    /// Number of comments.
    pub comment_count: i64,
}

/// Aggregate catalog statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Number of cards.
    pub total_cards: i64,
    /// Sum of view counts, 0 for an empty catalog.
    pub total_views: i64,
    /// Sum of like counts, 0 for an empty catalog.
    pub total_likes: i64,
    /// Number of comments.
    pub total_comments: i64,
    /// Up to [`TOP_CARDS_LIMIT`] cards by view count, highest first.
    pub top_cards: Vec<TopCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_fields_are_required() {
        let err = CommentInput::new("", "hello").validated().unwrap_err();
        assert_eq!(err, CatalogError::Validation("user_name is required".into()));

        let err = CommentInput::new("Amina", "   ").validated().unwrap_err();
        assert_eq!(
            err,
            CatalogError::Validation("comment_text is required".into())
        );
    }

    #[test]
    fn like_outcome_serializes_lowercase() {
        let toggle = LikeToggle {
            status: LikeOutcome::Unliked,
            like_count: 0,
        };
        let value = serde_json::to_value(toggle).unwrap();
        assert_eq!(value["status"], "unliked");
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = CatalogStats::default();
        assert_eq!(stats.total_views, 0);
        assert!(stats.top_cards.is_empty());
    }
}
