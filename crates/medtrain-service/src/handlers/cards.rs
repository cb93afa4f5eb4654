//! Training card handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use medtrain_core::{CardId, CardInput, CardView, CategoryId};
use medtrain_store::CardFilter;

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::handlers::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for listing cards.
///
/// Both are read as raw strings so that an empty value means "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct ListCardsQuery {
    /// Category id; the "All" category or an empty value lists everything.
    pub category_id: Option<String>,
    /// Case-insensitive substring of title or body.
    pub search: Option<String>,
}

impl ListCardsQuery {
    /// Convert to a store filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if `category_id` is not an integer.
    pub fn into_filter(self) -> Result<CardFilter, ApiError> {
        let category_id = self
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(str::parse::<CategoryId>)
            .transpose()
            .map_err(|e| ApiError::Validation(format!("category_id: {e}")))?;

        Ok(CardFilter {
            category_id,
            search: self.search,
        })
    }
}

/// List cards, newest first.
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCardsQuery>,
) -> Result<Json<Vec<CardView>>, ApiError> {
    let filter = query.into_filter()?;
    let cards = state.store.list_cards(&filter).await?;

    tracing::debug!(
        category_id = ?filter.effective_category(),
        search = ?filter.search_term(),
        count = cards.len(),
        "Listed cards"
    );

    Ok(Json(cards))
}

/// Get one card, counting the view.
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CardId>,
) -> Result<Json<CardView>, ApiError> {
    let card = state.store.get_card(id).await?;
    Ok(Json(card))
}

/// Create a card.
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Json(body): Json<CardInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let fields = body.normalize()?;
    let id = state.store.create_card(&fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(id, "Card created successfully")),
    ))
}

/// Overwrite a card's fields.
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CardId>,
    _admin: AdminSession,
    Json(body): Json<CardInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = body.normalize()?;
    state.store.update_card(id, &fields).await?;
    Ok(Json(MessageResponse::new("Card updated successfully")))
}

/// Delete a card with its comments and likes.
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CardId>,
    _admin: AdminSession,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_card(id).await?;
    Ok(Json(MessageResponse::new("Card deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_values_are_absent() {
        let query = ListCardsQuery {
            category_id: Some(String::new()),
            search: Some(String::new()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.search_term(), None);
    }

    #[test]
    fn non_numeric_category_is_rejected() {
        let query = ListCardsQuery {
            category_id: Some("lights".into()),
            search: None,
        };
        assert!(matches!(query.into_filter(), Err(ApiError::Validation(_))));
    }
}
