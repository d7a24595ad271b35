use thiserror::Error;

/// Errors from the generative completion client
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Retries on 503/429 were exhausted
    #[error("generation service unavailable")]
    ServiceUnavailable,

    /// Network-level failure; never retried
    #[error("completion request failed: {0}")]
    Request(String),

    /// Non-success status outside the retryable set; never retried
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },
}
