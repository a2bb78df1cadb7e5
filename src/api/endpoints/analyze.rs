//! Analysis endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AnalyzeRequest, AnalyzeResponse, ApiContext};
use crate::explanation::resolve_explanation;

/// `POST /analyze` — classify text and attach a perception explanation.
///
/// Classification finishes before the explanation provider is consulted;
/// provider failures only change `perception_explanation`.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(req) =
        payload.map_err(|rejection| ApiError::from_json_rejection(rejection, ctx.max_text_bytes))?;

    let analysis = ctx.classifier.classify(&req.text);
    let techniques = analysis.techniques();

    tracing::info!(
        text_len = req.text.len(),
        highlights = analysis.highlights().len(),
        techniques = ?techniques,
        "Analysis complete"
    );

    let explanation = resolve_explanation(ctx.explainer.clone(), req.text, techniques).await;

    Ok(Json(AnalyzeResponse::new(analysis, explanation)))
}
