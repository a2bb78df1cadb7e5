//! Access logging middleware.
//!
//! Tags every request with an `X-Request-Id` (kept if the client sent one)
//! and logs method, path, status and latency. Request bodies are never
//! logged.

use std::time::Instant;

use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn log_access(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    let started = Instant::now();
    let mut response = next.run(req).await;
    let status = response.status().as_u16();

    tracing::info!(
        request_id = %request_id,
        %method,
        %path,
        status,
        latency_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    response
}
