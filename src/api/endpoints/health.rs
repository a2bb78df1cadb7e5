//! Liveness endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct AliveResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub explanation: String,
    pub explanation_enabled: bool,
    pub started_at: String,
}

/// `GET /` — plain liveness probe.
pub async fn alive() -> Json<AliveResponse> {
    Json(AliveResponse {
        status: "TruthLens backend is alive",
    })
}

/// `GET /health` — version and explanation layer status.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        explanation: ctx.explainer.name().to_string(),
        explanation_enabled: ctx.explainer.is_enabled(),
        started_at: ctx.started_at.to_rfc3339(),
    })
}
