//! Gemini API client for the generateContent endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use triage_core::CompletionError;

use super::CompletionModel;

const API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Attempt cap shared by both retryable statuses
const MAX_ATTEMPTS: u32 = 5;

/// Client for the Gemini generateContent API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

/// Request body for generateContent
#[derive(Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response body from generateContent
#[derive(Deserialize, Default)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Fixed wait-then-retry policy for the generation service.
///
/// 503 means the model is overloaded and usually clears within seconds; 429
/// means we hit the per-minute quota and only a long wait helps. These are
/// fixed delays, not exponential backoff — the observed latency profile is
/// part of the behavioral contract. Worst case on sustained rate limiting is
/// MAX_ATTEMPTS × 60s, which callers accept (no request timeout is imposed
/// beyond framework defaults).
pub struct RetryPolicy;

impl RetryPolicy {
    /// Delay before retrying the given status, or None if it is not retryable
    pub fn delay_for(status: StatusCode) -> Option<Duration> {
        match status {
            StatusCode::SERVICE_UNAVAILABLE => Some(Duration::from_secs(2)),
            StatusCode::TOO_MANY_REQUESTS => Some(Duration::from_secs(60)),
            _ => None,
        }
    }
}

impl GeminiClient {
    /// Create a new client with the given API key, pointed at the hosted
    /// Gemini endpoint
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, API_URL)
    }

    /// Create a client against a custom endpoint (a self-hosted gateway, or
    /// a stub server in tests)
    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    /// Send one prompt, retrying per [`RetryPolicy`], and return the first
    /// candidate's first text part. An unexpected response shape yields an
    /// empty string rather than an error; callers treat empty output as "no
    /// usable reply" and substitute their own fallback text.
    async fn send(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ApiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        for attempt in 1..=MAX_ATTEMPTS {
            let response = self
                .http
                .post(&self.endpoint)
                .query(&[("key", self.api_key.as_str())])
                .json(&request)
                .send()
                .await
                .map_err(|e| CompletionError::Request(e.to_string()))?;

            let status = response.status();

            if status.is_success() {
                let body: ApiResponse = response.json().await.unwrap_or_default();
                return Ok(extract_text(&body));
            }

            match RetryPolicy::delay_for(status) {
                Some(delay) => {
                    // No point sleeping after the final attempt
                    if attempt == MAX_ATTEMPTS {
                        break;
                    }
                    tracing::warn!(
                        status = status.as_u16(),
                        attempt = attempt,
                        delay_secs = delay.as_secs(),
                        "Generation service busy, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(CompletionError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }
            }
        }

        Err(CompletionError::ServiceUnavailable)
    }
}

/// First candidate, first text part; empty string for any other shape
fn extract_text(response: &ApiResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .map(|p| p.text.clone())
        .unwrap_or_default()
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.send(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overloaded_retries_after_two_seconds() {
        assert_eq!(
            RetryPolicy::delay_for(StatusCode::SERVICE_UNAVAILABLE),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn rate_limited_retries_after_sixty_seconds() {
        assert_eq!(
            RetryPolicy::delay_for(StatusCode::TOO_MANY_REQUESTS),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn other_statuses_are_not_retried() {
        assert_eq!(RetryPolicy::delay_for(StatusCode::BAD_REQUEST), None);
        assert_eq!(RetryPolicy::delay_for(StatusCode::INTERNAL_SERVER_ERROR), None);
        assert_eq!(RetryPolicy::delay_for(StatusCode::UNAUTHORIZED), None);
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body: ApiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(extract_text(&body), "first");
    }

    #[test]
    fn unexpected_shape_yields_empty_string() {
        let empty: ApiResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(extract_text(&empty), "");

        let no_parts: ApiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": []}}]
        }))
        .unwrap();
        assert_eq!(extract_text(&no_parts), "");

        let no_content: ApiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{}]
        }))
        .unwrap();
        assert_eq!(extract_text(&no_content), "");
    }
}
