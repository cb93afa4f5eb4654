//! Media URL lists.
//!
//! Cards carry two list-valued media fields, `video_urls` and `audio_urls`.
//! Clients send them either as a JSON array or as a string that already holds
//! a serialized JSON array (older admin forms do the latter). Both shapes are
//! accepted at the ingestion boundary through [`MediaListInput`] and collapse
//! into one [`MediaList`], whose canonical stored form is the compact JSON text
//! of the array.
//!
//! # Contract
//!
//! | Input                               | Result                  |
//! |-------------------------------------|-------------------------|
//! | absent, `null`, `""`, `"   "`       | empty list              |
//! | `["a", "b"]`                        | `["a", "b"]`            |
//! | `"[\"a\", \"b\"]"`                  | `["a", "b"]`            |
//! | any other string                    | `InvalidMediaList`      |
//!
//! Blank entries inside a list are dropped; the rest are trimmed.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// A normalized list of media URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaList(Vec<String>);

/// A media list as received from a client, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MediaListInput {
    /// A structured JSON array of URLs.
    List(Vec<String>),
    /// A string holding a serialized JSON array of URLs.
    Serialized(String),
}

impl MediaList {
    /// Build a list from URLs, dropping blank entries.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            urls.into_iter()
                .map(Into::into)
                .map(|url: String| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
        )
    }

    /// Normalize a client-supplied value for `field`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidMediaList` when a string value is not a
    /// serialized JSON array of strings.
    pub fn normalize(field: &'static str, input: Option<MediaListInput>) -> Result<Self> {
        match input {
            None => Ok(Self::default()),
            Some(MediaListInput::List(urls)) => Ok(Self::new(urls)),
            Some(MediaListInput::Serialized(raw)) => Self::parse_serialized(field, &raw),
        }
    }

    fn parse_serialized(field: &'static str, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str::<Vec<String>>(raw)
            .map(Self::new)
            .map_err(|e| CatalogError::InvalidMediaList {
                field,
                reason: e.to_string(),
            })
    }

    /// The canonical serialized form stored in the database.
    #[must_use]
    pub fn to_column(&self) -> String {
        // A Vec<String> always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| String::from("[]"))
    }

    /// The URLs in order.
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.0
    }

    /// Whether the list holds no URLs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
