//! Like, comment, and statistics handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use medtrain_core::{CardId, CatalogStats, Comment, CommentInput, LikeOutcome, ANONYMOUS_USER};

use crate::error::ApiError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;

/// Toggle-like request.
#[derive(Debug, Default, Deserialize)]
pub struct LikeRequest {
    /// Caller identifier; blank or missing means anonymous.
    #[serde(default)]
    pub user_identifier: Option<String>,
}

impl LikeRequest {
    fn identifier(&self) -> &str {
        self.user_identifier
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(ANONYMOUS_USER)
    }
}

/// Toggle-like response.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    /// "liked" or "unliked".
    pub status: LikeOutcome,
    /// Like count after the toggle.
    pub like_count: i64,
    /// Confirmation text.
    pub message: String,
}

/// Like a card, or remove the caller's like.
///
/// The body is optional; without one the like is recorded as anonymous.
pub async fn toggle_like(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<CardId>,
    body: Option<Json<LikeRequest>>,
) -> Result<Json<LikeResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let toggle = state
        .store
        .toggle_like(card_id, request.identifier())
        .await?;

    Ok(Json(LikeResponse {
        status: toggle.status,
        like_count: toggle.like_count,
        message: toggle.status.message().to_string(),
    }))
}

/// List a card's comments, newest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<CardId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state.store.list_comments(card_id).await?;
    Ok(Json(comments))
}

/// Add a comment to a card.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<CardId>,
    Json(body): Json<CommentInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.store.add_comment(card_id, &body).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(id, "Comment added successfully")),
    ))
}

/// Catalog-wide counters and the most viewed cards.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<CatalogStats>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(stats))
}
