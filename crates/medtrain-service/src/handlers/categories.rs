//! Category handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use medtrain_core::{Category, CategoryId, CategoryInput};

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::handlers::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// List all categories ordered by name.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(categories))
}

/// Create a category.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Json(body): Json<CategoryInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.store.create_category(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(id, "Category created successfully")),
    ))
}

/// Overwrite a category's fields.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CategoryId>,
    _admin: AdminSession,
    Json(body): Json<CategoryInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.update_category(id, &body).await?;
    Ok(Json(MessageResponse::new("Category updated successfully")))
}

/// Delete a category; its cards become uncategorized.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CategoryId>,
    _admin: AdminSession,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_category(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
