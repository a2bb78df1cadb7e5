//! Optional natural-language explanation of perceptual effects.
//!
//! The classifier never depends on this layer. A provider is selected once at
//! startup (`select_provider`) and every failure is mapped to a fixed fallback
//! sentence by `resolve_explanation`.

pub mod client;
pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod provider;

pub use client::{LlmClient, MockLlmClient};
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};
pub use provider::{
    explain_or_fallback, resolve_explanation, select_provider, DisabledExplainer,
    ExplanationProvider, RemoteExplainer,
};

use thiserror::Error;

/// Returned when nothing was detected. The provider is not consulted.
pub const NO_TECHNIQUES_MESSAGE: &str =
    "No strong emotional or framing language patterns were detected.";

/// Returned by the disabled provider when techniques were detected.
pub const TECHNIQUES_DETECTED_MESSAGE: &str =
    "The content uses specific language patterns that may influence how it is perceived.";

/// Returned when a configured remote provider fails or times out.
pub const EXPLANATION_UNAVAILABLE_MESSAGE: &str =
    "The content contains language patterns that may influence perception. \
     The explanation layer is currently unavailable.";

/// Returned when a remote backend was requested without an API key.
pub const MISSING_API_KEY_MESSAGE: &str =
    "This explanation layer is disabled because no API key is configured. \
     The detected techniques are based on rule-based analysis.";

#[derive(Error, Debug)]
pub enum ExplanationError {
    #[error("Explanation service is not reachable at {0}")]
    Connection(String),

    #[error("Explanation request timed out after {0}s")]
    Timeout(u64),

    #[error("Explanation service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Explanation service returned an empty completion")]
    EmptyResponse,

    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    #[error("Explanation task failed: {0}")]
    Task(String),
}

/// Map a transport failure from `reqwest` onto the error taxonomy.
pub(crate) fn map_send_error(
    err: reqwest::Error,
    base_url: &str,
    timeout_secs: u64,
) -> ExplanationError {
    if err.is_connect() {
        ExplanationError::Connection(base_url.to_string())
    } else if err.is_timeout() {
        ExplanationError::Timeout(timeout_secs)
    } else {
        ExplanationError::HttpClient(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_messages_are_distinct() {
        let messages = [
            NO_TECHNIQUES_MESSAGE,
            TECHNIQUES_DETECTED_MESSAGE,
            EXPLANATION_UNAVAILABLE_MESSAGE,
            MISSING_API_KEY_MESSAGE,
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unavailable_message_is_single_spaced() {
        assert!(EXPLANATION_UNAVAILABLE_MESSAGE.contains("perception. The explanation"));
        assert!(!EXPLANATION_UNAVAILABLE_MESSAGE.contains("  "));
    }

    #[test]
    fn error_display() {
        let err = ExplanationError::Service {
            status: 429,
            body: "quota".into(),
        };
        assert_eq!(
            err.to_string(),
            "Explanation service returned error (status 429): quota"
        );
        assert_eq!(
            ExplanationError::MissingApiKey("openai").to_string(),
            "No API key configured for openai"
        );
    }
}
