//! Access logging middleware.
//!
//! Logs every API request with method, path, status and latency.
//! Runs innermost (after the session middleware has set `SessionContext`).

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::SessionContext;

pub async fn log_access(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let session = req
        .extensions()
        .get::<SessionContext>()
        .map(|s| s.session_id.chars().take(8).collect::<String>())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis();
    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, elapsed_ms = %elapsed_ms, %session, "Request failed");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms = %elapsed_ms, %session, "Request handled");
    }

    response
}
