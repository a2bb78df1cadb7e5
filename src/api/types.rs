//! Shared types for the HTTP layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{Analysis, Highlight, PatternClassifier, Technique};
use crate::config::DEFAULT_MAX_TEXT_BYTES;
use crate::explanation::ExplanationProvider;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub classifier: &'static PatternClassifier,
    pub explainer: Arc<dyn ExplanationProvider>,
    pub max_text_bytes: usize,
    pub started_at: DateTime<Utc>,
}

impl ApiContext {
    pub fn new(explainer: Arc<dyn ExplanationProvider>) -> Self {
        Self {
            classifier: PatternClassifier::builtin(),
            explainer,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            started_at: Utc::now(),
        }
    }

    pub fn with_max_text_bytes(mut self, max_text_bytes: usize) -> Self {
        self.max_text_bytes = max_text_bytes;
        self
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response schema
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub highlights: Vec<Highlight>,
    pub detected_techniques: Vec<Technique>,
    pub perception_explanation: String,
}

impl AnalyzeResponse {
    pub fn new(analysis: Analysis, perception_explanation: String) -> Self {
        let detected_techniques = analysis.techniques();
        Self {
            highlights: analysis.into_highlights(),
            detected_techniques,
            perception_explanation,
        }
    }
}
