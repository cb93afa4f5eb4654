//! Training card types.
//!
//! A card moves through three shapes:
//!
//! - [`CardInput`]: what a client sends on create or update.
//! - [`CardFields`]: the same fields after validation and media-list
//!   normalization, ready to bind into a statement.
//! - [`TrainingCard`] / [`CardView`]: what comes back out of the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::ids::{CardId, CategoryId};
use crate::media::{MediaList, MediaListInput};

/// A stored training card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TrainingCard {
    /// Row id.
    pub id: CardId,
    /// English title.
    pub title: String,
    /// Swahili title.
    pub title_swahili: Option<String>,
    /// Korean title.
    pub title_korean: Option<String>,
    /// Owning category, if any. Cleared when the category is deleted.
    pub category_id: Option<CategoryId>,
    /// Who authored or supplied the content.
    pub content_provider: Option<String>,
    /// Intended audience, e.g. "Nurses".
    pub target_audience: Option<String>,
    /// Free-form difficulty label.
    pub difficulty_level: Option<String>,
    /// Markdown body.
    pub markdown_text: Option<String>,
    /// Rendered body.
    pub html_content: Option<String>,
    /// Primary image.
    pub image_url: Option<String>,
    /// Primary video.
    pub video_url: Option<String>,
    /// Primary audio clip.
    pub audio_url: Option<String>,
    /// Attached PDF.
    pub pdf_url: Option<String>,
    /// Additional videos.
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub video_urls: MediaList,
    /// Additional audio clips.
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub audio_urls: MediaList,
    /// Number of detail views.
    pub view_count: i64,
    /// Number of distinct likers.
    pub like_count: i64,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
    /// When the card was last overwritten.
    pub updated_at: DateTime<Utc>,
}

/// A card joined with its category's display names and its comment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CardView {
    /// The card itself.
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub card: TrainingCard,
    /// Category English name.
    pub category_name: Option<String>,
    /// Category Swahili name.
    pub category_name_swahili: Option<String>,
    /// Category Korean name.
    pub category_name_korean: Option<String>,
    /// Number of comments on the card.
    pub comment_count: i64,
}

/// Card fields as sent by a client.
///
/// Updates are full overwrites, so the same payload serves create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardInput {
    /// English title (required).
    #[serde(default)]
    pub title: String,
    /// Swahili title.
    #[serde(default)]
    pub title_swahili: Option<String>,
    /// Korean title.
    #[serde(default)]
    pub title_korean: Option<String>,
    /// Owning category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Content provider.
    #[serde(default)]
    pub content_provider: Option<String>,
    /// Intended audience.
    #[serde(default)]
    pub target_audience: Option<String>,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty_level: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub markdown_text: Option<String>,
    /// Rendered body.
    #[serde(default)]
    pub html_content: Option<String>,
    /// Primary image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Primary video.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Primary audio clip.
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Attached PDF.
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// Either a JSON array or a string holding one.
    #[serde(default)]
    pub video_urls: Option<MediaListInput>,
    /// Either a JSON array or a string holding one.
    #[serde(default)]
    pub audio_urls: Option<MediaListInput>,
}

/// Validated, normalized card fields.
///
/// Field meanings mirror [`CardInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct CardFields {
    pub title: String,
    pub title_swahili: Option<String>,
    pub title_korean: Option<String>,
    pub category_id: Option<CategoryId>,
    pub content_provider: Option<String>,
    pub target_audience: Option<String>,
    pub difficulty_level: Option<String>,
    pub markdown_text: Option<String>,
    pub html_content: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub pdf_url: Option<String>,
    pub video_urls: MediaList,
    pub audio_urls: MediaList,
}

impl CardInput {
    /// Create input with just a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validate required fields and normalize media lists.
    ///
    /// Blank optional text fields become `None`.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Validation` if the title is blank.
    /// - `CatalogError::InvalidMediaList` if a media list cannot be normalized.
    pub fn normalize(self) -> Result<CardFields> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CatalogError::required("title"));
        }

        Ok(CardFields {
            title: title.to_string(),
            title_swahili: non_blank(self.title_swahili),
            title_korean: non_blank(self.title_korean),
            category_id: self.category_id,
            content_provider: non_blank(self.content_provider),
            target_audience: non_blank(self.target_audience),
            difficulty_level: non_blank(self.difficulty_level),
            markdown_text: non_blank(self.markdown_text),
            html_content: non_blank(self.html_content),
            image_url: non_blank(self.image_url),
            video_url: non_blank(self.video_url),
            audio_url: non_blank(self.audio_url),
            pdf_url: non_blank(self.pdf_url),
            video_urls: MediaList::normalize("video_urls", self.video_urls)?,
            audio_urls: MediaList::normalize("audio_urls", self.audio_urls)?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
