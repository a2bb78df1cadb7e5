//! HTTP router.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Audit logger → 3. Body limit → Handler

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router from a shared context.
pub fn api_router(ctx: ApiContext) -> Router {
    let max_text_bytes = ctx.max_text_bytes;

    Router::new()
        .route("/", get(endpoints::health::alive))
        .route("/health", get(endpoints::health::check))
        .route("/analyze", post(endpoints::analyze::analyze))
        .with_state(ctx)
        // Layers are applied from bottom (innermost) to top (outermost).
        .layer(DefaultBodyLimit::max(max_text_bytes))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}
