pub mod analyze;
pub mod chat;
pub mod health;
pub mod metrics;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the chat and analysis routes
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/message", post(chat::message))
        .route(
            "/chat/history/{window_id}",
            get(chat::history).delete(chat::delete_history),
        )
        .route("/analyze", post(analyze::analyze))
}
