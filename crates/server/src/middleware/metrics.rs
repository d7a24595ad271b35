//! Prometheus metrics collection middleware
//!
//! Records `http_requests_total` (counter) and `http_request_duration_seconds`
//! (histogram) for every request, with method/path/status labels.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Normalize request paths to avoid high-cardinality labels.
/// Collapses the window id after `history` and any UUID segment to `:id` so
/// all per-window requests share one label.
fn normalize_path(path: &str) -> String {
    let mut previous = "";
    let mut segments = Vec::new();
    for segment in path.split('/') {
        if previous == "history" || uuid::Uuid::try_parse(segment).is_ok() {
            segments.push(":id");
        } else {
            segments.push(segment);
        }
        previous = segment;
    }
    segments.join("/")
}

/// Middleware that records request count and duration metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn window_id_after_history_is_collapsed() {
        assert_eq!(
            normalize_path("/chat/history/window-abc-123"),
            "/chat/history/:id"
        );
    }

    #[test]
    fn uuid_segments_are_collapsed() {
        assert_eq!(
            normalize_path("/chat/history/7f6cdd6e-7f13-4b8a-9f6e-2f2b7a3f0e11"),
            "/chat/history/:id"
        );
    }

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(normalize_path("/chat/message"), "/chat/message");
        assert_eq!(normalize_path("/health"), "/health");
    }
}
