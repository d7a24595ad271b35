//! AI features: the Gemini completion client and the symptom intake pipeline

pub mod analysis;
pub mod client;
pub mod intake;
pub mod prompts;

pub use client::GeminiClient;

use async_trait::async_trait;
use triage_core::CompletionError;

/// A text-in, text-out generative model.
///
/// Object-safe so the orchestrator can hold `Arc<dyn CompletionModel>` and
/// tests can substitute a scripted model for the hosted client.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send one prompt and return the model's raw text reply
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
