//! Chat HTTP handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_core::SymptomAnalysisResult;

use crate::ai::intake;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::ChatTurn;

/// Request body for a chat message.
///
/// Fields default to empty so a missing field surfaces as the orchestrator's
/// 400 with a field-level message rather than a framework-level rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    window_id: String,
    #[serde(default)]
    message: String,
}

/// One history entry as exposed over HTTP
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    user_message: String,
    bot_response: String,
    analysis: Option<SymptomAnalysisResult>,
    timestamp: DateTime<Utc>,
}

impl From<ChatTurn> for TurnView {
    fn from(turn: ChatTurn) -> Self {
        Self {
            user_message: turn.user_message,
            bot_response: turn.bot_response,
            analysis: turn.analysis,
            timestamp: turn.timestamp,
        }
    }
}

/// Response body for a history deletion
#[derive(Serialize)]
pub struct DeleteResponse {
    deleted: bool,
}

/// POST /chat/message — process one user chat turn
pub async fn message(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = state
        .model
        .as_ref()
        .ok_or_else(|| AppError::Internal("GEMINI_API_KEY not configured".to_string()))?;

    tracing::info!(window_id = %body.window_id, "Chat message");

    let outcome = intake::process_turn(
        model.as_ref(),
        state.store.as_ref(),
        state.directory.as_ref(),
        &body.user_id,
        &body.window_id,
        &body.message,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /chat/history/{window_id} — ordered turns; empty array for an unknown
/// window, never 404
pub async fn history(
    State(state): State<AppState>,
    Path(window_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let turns = state
        .store
        .list_turns(&window_id)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to load chat history: {e}")))?;

    let views: Vec<TurnView> = turns.into_iter().map(TurnView::from).collect();
    Ok(Json(views))
}

/// DELETE /chat/history/{window_id} — delete the window and its turns;
/// idempotent
pub async fn delete_history(
    State(state): State<AppState>,
    Path(window_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .delete_window(&window_id)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to delete chat history: {e}")))?;

    tracing::info!(window_id = %window_id, "Chat history deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}
