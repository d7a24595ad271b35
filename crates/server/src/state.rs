//! Shared application state

use std::sync::Arc;

use crate::ai::CompletionModel;
use crate::store::{ConversationStore, DoctorDirectory};

/// Capabilities handed to every handler.
///
/// `model` is None when no API key is configured; chat and analyze endpoints
/// then report an internal error while the rest of the server stays up.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn CompletionModel>>,
    pub store: Arc<dyn ConversationStore>,
    pub directory: Arc<dyn DoctorDirectory>,
}
