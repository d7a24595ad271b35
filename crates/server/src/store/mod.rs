//! Capability interfaces for conversation persistence and the doctor directory

mod memory;

pub use memory::{InMemoryConversationStore, InMemoryDoctorDirectory};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use triage_core::{DoctorRecord, SymptomAnalysisResult};

/// Errors from the conversation store or doctor directory
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("turn not found: {0}")]
    TurnNotFound(Uuid),
}

/// One conversation thread for one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatWindow {
    pub window_id: String,
    pub user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// One exchange within a window.
///
/// `analysis` is null for every turn except the one whose bot response carried
/// the summary sentinel; it is set at most once, after the turn exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: Uuid,
    pub window_id: String,
    pub user_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub analysis: Option<SymptomAnalysisResult>,
    pub timestamp: DateTime<Utc>,
}

/// Persistence for chat windows and their ordered turns
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch the window, creating it if this is the first message to it
    async fn get_or_create_window(
        &self,
        user_id: &str,
        window_id: &str,
    ) -> Result<ChatWindow, StoreError>;

    /// Append one turn with a null analysis
    async fn append_turn(
        &self,
        window_id: &str,
        user_id: &str,
        user_message: &str,
        bot_response: &str,
    ) -> Result<ChatTurn, StoreError>;

    /// All turns of a window in ascending timestamp order; empty for an
    /// unknown window
    async fn list_turns(&self, window_id: &str) -> Result<Vec<ChatTurn>, StoreError>;

    /// Attach an analysis to an existing turn
    async fn set_turn_analysis(
        &self,
        turn_id: Uuid,
        analysis: &SymptomAnalysisResult,
    ) -> Result<(), StoreError>;

    /// Change a window's display name
    async fn rename_window(&self, window_id: &str, new_name: &str) -> Result<(), StoreError>;

    /// Delete a window and all its turns. Idempotent — succeeds when nothing
    /// existed.
    async fn delete_window(&self, window_id: &str) -> Result<(), StoreError>;
}

/// Doctor lookup by specialty
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// OR across the given specialties, each matched case-insensitively as a
    /// substring of the stored specialty. An empty input yields an empty
    /// result — it must not match everything.
    async fn find_by_specialties(
        &self,
        specialties: &[String],
    ) -> Result<Vec<DoctorRecord>, StoreError>;
}
