//! Category types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::ids::CategoryId;

/// Id of the seeded "All" category.
///
/// A card filter naming this id means "no category filter".
pub const ALL_CATEGORY_ID: CategoryId = CategoryId::new(1);

/// Name of the seeded "All" category.
pub const ALL_CATEGORY_NAME: &str = "All";

/// A named grouping of training cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Row id.
    pub id: CategoryId,
    /// English name, unique across all categories.
    pub name: String,
    /// Swahili display name.
    pub name_swahili: Option<String>,
    /// Korean display name.
    pub name_korean: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last overwritten.
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a category, used for both create and full-overwrite update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryInput {
    /// English name (required).
    #[serde(default)]
    pub name: String,
    /// Swahili display name.
    #[serde(default)]
    pub name_swahili: Option<String>,
    /// Korean display name.
    #[serde(default)]
    pub name_korean: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryInput {
    /// Create input with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check required fields and trim the name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the name is blank.
    pub fn validated(mut self) -> Result<Self> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::required("name"));
        }
        self.name = trimmed.to_string();
        Ok(self)
    }
}
