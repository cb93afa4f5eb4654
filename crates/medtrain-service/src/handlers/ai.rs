//! AI assistant handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::assistant::CardContext;
use crate::error::ApiError;
use crate::state::AppState;

/// Chat request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question (required).
    #[serde(default)]
    pub question: String,
    /// The card the question is about.
    #[serde(default)]
    pub card_context: CardContext,
}

/// Chat response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Always true; failures use the error envelope.
    pub success: bool,
    /// The assistant's answer.
    pub answer: String,
}

/// Answer a question about a card.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(ApiError::Validation("Question is required".into()));
    }

    let assistant = state
        .assistant
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("AI assistant is not configured".into()))?;

    let answer = assistant.ask(question, &body.card_context).await?;

    tracing::info!(
        card = ?body.card_context.title,
        answer_len = answer.len(),
        "AI question answered"
    );

    Ok(Json(ChatResponse {
        success: true,
        answer,
    }))
}
