//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, warn};

/// Log each webhook call and how long Slack waited for it.
///
/// Slack abandons a slash command after three seconds, so slow acknowledgements
/// are flagged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    const SLACK_DEADLINE_MS: u64 = 3000;

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if !status.is_success() {
        warn!(%method, %path, %status, elapsed_ms, "Webhook request failed");
    } else if elapsed_ms >= SLACK_DEADLINE_MS {
        warn!(%method, %path, elapsed_ms, "Webhook acknowledged after Slack's deadline");
    } else {
        debug!(%method, %path, %status, elapsed_ms, "Webhook request completed");
    }

    response
}
