//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    ai: String,
}

/// GET /health - Report server health and whether AI features are enabled
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    let ai = if state.model.is_some() {
        "enabled"
    } else {
        "disabled"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            ai: ai.to_string(),
        }),
    )
}
