//! Direct symptom analysis endpoint.
//!
//! Same pipeline the chat orchestrator triggers on the summary sentinel,
//! exposed as its own entry point for callers that already hold a complete
//! symptom description.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use crate::ai::analysis;
use crate::error::AppError;
use crate::state::AppState;

/// Request body for direct analysis
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    symptoms: String,
}

/// POST /analyze — analyze a symptom narrative
pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if body.symptoms.trim().is_empty() {
        return Err(AppError::BadRequest("symptoms is required".to_string()));
    }

    let model = state
        .model
        .as_ref()
        .ok_or_else(|| AppError::Internal("GEMINI_API_KEY not configured".to_string()))?;

    let result = analysis::analyze_symptoms(
        model.as_ref(),
        state.directory.as_ref(),
        &body.symptoms,
    )
    .await
    .map_err(|e| AppError::Internal(format!("Symptom analysis failed: {e}")))?;

    Ok(Json(result))
}
