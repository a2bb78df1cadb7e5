use std::sync::Arc;
use std::time::Duration;

use crate::analysis::Technique;
use crate::config::{ExplanationBackend, ExplanationConfig};

use super::client::LlmClient;
use super::ollama::OllamaClient;
use super::openai::OpenAiClient;
use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use super::{
    ExplanationError, EXPLANATION_UNAVAILABLE_MESSAGE, MISSING_API_KEY_MESSAGE,
    NO_TECHNIQUES_MESSAGE, TECHNIQUES_DETECTED_MESSAGE,
};

/// Strategy that produces a perception explanation for detected techniques.
pub trait ExplanationProvider: Send + Sync {
    /// Label for logs and health output.
    fn name(&self) -> &str;

    /// `false` means `explain` never leaves the process and the fallback
    /// message is the whole answer.
    fn is_enabled(&self) -> bool;

    /// Produce an explanation. May block on network I/O.
    fn explain(&self, text: &str, techniques: &[Technique]) -> Result<String, ExplanationError>;

    /// Sentence used when `explain` is disabled, fails or times out.
    fn fallback_message(&self) -> &'static str;

    /// Upper bound for one `explain` call.
    fn timeout(&self) -> Duration;

    /// Startup reachability check. Only informs logging.
    fn probe(&self) -> bool {
        true
    }
}

/// Provider used when no explanation backend is configured.
#[derive(Debug, Clone)]
pub struct DisabledExplainer {
    notice: &'static str,
}

impl DisabledExplainer {
    pub fn new() -> Self {
        Self {
            notice: TECHNIQUES_DETECTED_MESSAGE,
        }
    }

    /// Remote backend requested without credentials.
    pub fn missing_api_key() -> Self {
        Self {
            notice: MISSING_API_KEY_MESSAGE,
        }
    }

    /// Remote backend requested but could not be constructed.
    pub fn unavailable() -> Self {
        Self {
            notice: EXPLANATION_UNAVAILABLE_MESSAGE,
        }
    }
}

impl Default for DisabledExplainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplanationProvider for DisabledExplainer {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn explain(&self, _text: &str, _techniques: &[Technique]) -> Result<String, ExplanationError> {
        Ok(self.notice.to_string())
    }

    fn fallback_message(&self) -> &'static str {
        self.notice
    }

    fn timeout(&self) -> Duration {
        Duration::ZERO
    }
}

/// Provider backed by an external text-generation service.
pub struct RemoteExplainer {
    client: Box<dyn LlmClient>,
    model: String,
    timeout: Duration,
}

impl RemoteExplainer {
    pub fn new(client: Box<dyn LlmClient>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ExplanationProvider for RemoteExplainer {
    fn name(&self) -> &str {
        self.client.backend()
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn explain(&self, text: &str, techniques: &[Technique]) -> Result<String, ExplanationError> {
        let prompt = build_user_prompt(text, techniques);
        let raw = self.client.generate(&self.model, &prompt, SYSTEM_PROMPT)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExplanationError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }

    fn fallback_message(&self) -> &'static str {
        EXPLANATION_UNAVAILABLE_MESSAGE
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the configured model is served. A missing model surfaces
    /// later as a per-request fallback.
    fn probe(&self) -> bool {
        match self.client.is_model_available(&self.model) {
            Ok(true) => {
                tracing::info!(backend = self.client.backend(), model = %self.model, "Explanation model confirmed");
                true
            }
            Ok(false) => {
                tracing::warn!(backend = self.client.backend(), model = %self.model, "Explanation model not available");
                false
            }
            Err(e) => {
                tracing::warn!(backend = self.client.backend(), error = %e, "Cannot reach explanation service");
                false
            }
        }
    }
}

/// Build the provider named by configuration.
///
/// Never fails: a backend that cannot be constructed degrades to a disabled
/// provider so classification keeps working.
pub fn select_provider(config: &ExplanationConfig) -> Arc<dyn ExplanationProvider> {
    let timeout = Duration::from_secs(config.timeout_secs);

    let client: Result<Box<dyn LlmClient>, ExplanationError> = match config.backend {
        ExplanationBackend::Disabled => {
            tracing::info!("Explanation layer disabled");
            return Arc::new(DisabledExplainer::new());
        }
        ExplanationBackend::Ollama => OllamaClient::new(&config.ollama_url, config.timeout_secs)
            .map(|c| Box::new(c) as Box<dyn LlmClient>),
        ExplanationBackend::OpenAi => match config.openai_api_key.as_deref() {
            Some(key) => OpenAiClient::new(&config.openai_url, key, config.timeout_secs)
                .map(|c| Box::new(c) as Box<dyn LlmClient>),
            None => Err(ExplanationError::MissingApiKey("openai")),
        },
    };

    match client {
        Ok(client) => {
            tracing::info!(
                backend = client.backend(),
                model = %config.model,
                timeout_secs = config.timeout_secs,
                "Explanation layer enabled"
            );
            Arc::new(RemoteExplainer::new(client, config.model.clone(), timeout))
        }
        Err(ExplanationError::MissingApiKey(backend)) => {
            tracing::warn!(backend, "No API key configured, explanation layer disabled");
            Arc::new(DisabledExplainer::missing_api_key())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Explanation client unavailable, explanation layer disabled");
            Arc::new(DisabledExplainer::unavailable())
        }
    }
}

/// Synchronous explanation with fallback mapping.
pub fn explain_or_fallback(
    provider: &dyn ExplanationProvider,
    text: &str,
    techniques: &[Technique],
) -> String {
    if techniques.is_empty() {
        return NO_TECHNIQUES_MESSAGE.to_string();
    }
    if !provider.is_enabled() {
        return provider.fallback_message().to_string();
    }
    match provider.explain(text, techniques) {
        Ok(explanation) => explanation,
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "Explanation failed, using fallback");
            provider.fallback_message().to_string()
        }
    }
}

/// Async explanation with fallback mapping.
///
/// The blocking provider call runs on the blocking pool and is abandoned
/// once `provider.timeout()` elapses.
pub async fn resolve_explanation(
    provider: Arc<dyn ExplanationProvider>,
    text: String,
    techniques: Vec<Technique>,
) -> String {
    if techniques.is_empty() {
        return NO_TECHNIQUES_MESSAGE.to_string();
    }
    if !provider.is_enabled() {
        return provider.fallback_message().to_string();
    }

    let timeout = provider.timeout();
    let worker = Arc::clone(&provider);
    let task = tokio::task::spawn_blocking(move || worker.explain(&text, &techniques));

    let err = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(explanation))) => return explanation,
        Ok(Ok(Err(e))) => e,
        Ok(Err(join)) => ExplanationError::Task(join.to_string()),
        Err(_) => ExplanationError::Timeout(timeout.as_secs()),
    };

    tracing::warn!(provider = provider.name(), error = %err, "Explanation failed, using fallback");
    provider.fallback_message().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::client::MockLlmClient;

    fn remote(client: MockLlmClient, timeout: Duration) -> RemoteExplainer {
        RemoteExplainer::new(Box::new(client), "llama3.2", timeout)
    }

    const DETECTED: &[Technique] = &[Technique::Urgency];

    // =================================================================
    // DISABLED PROVIDER
    // =================================================================

    #[test]
    fn disabled_returns_detected_notice() {
        let provider = DisabledExplainer::new();
        assert!(!provider.is_enabled());
        assert_eq!(
            explain_or_fallback(&provider, "Act now", DETECTED),
            TECHNIQUES_DETECTED_MESSAGE
        );
    }

    #[test]
    fn no_techniques_message_regardless_of_provider() {
        let disabled = DisabledExplainer::new();
        let enabled = remote(MockLlmClient::new("should not be used"), Duration::from_secs(1));
        assert_eq!(explain_or_fallback(&disabled, "calm", &[]), NO_TECHNIQUES_MESSAGE);
        assert_eq!(explain_or_fallback(&enabled, "calm", &[]), NO_TECHNIQUES_MESSAGE);
    }

    // =================================================================
    // REMOTE PROVIDER
    // =================================================================

    #[test]
    fn remote_returns_trimmed_completion() {
        let provider = remote(
            MockLlmClient::new("  Time pressure narrows attention.\n"),
            Duration::from_secs(1),
        );
        assert_eq!(
            explain_or_fallback(&provider, "Hurry", DETECTED),
            "Time pressure narrows attention."
        );
        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.model(), "llama3.2");
    }

    #[test]
    fn remote_failure_maps_to_unavailable() {
        let provider = remote(MockLlmClient::failing("quota"), Duration::from_secs(1));
        assert!(provider.explain("Hurry", DETECTED).is_err());
        assert_eq!(
            explain_or_fallback(&provider, "Hurry", DETECTED),
            EXPLANATION_UNAVAILABLE_MESSAGE
        );
    }

    #[test]
    fn empty_completion_is_an_error() {
        let provider = remote(MockLlmClient::new("   "), Duration::from_secs(1));
        assert!(matches!(
            provider.explain("Hurry", DETECTED),
            Err(ExplanationError::EmptyResponse)
        ));
    }

    #[test]
    fn probe_reports_model_availability() {
        let present = remote(MockLlmClient::new(""), Duration::from_secs(1));
        assert!(present.probe());

        let absent = remote(
            MockLlmClient::new("").with_models(vec!["mistral:7b".into()]),
            Duration::from_secs(1),
        );
        assert!(!absent.probe());
    }

    // =================================================================
    // SELECTION
    // =================================================================

    #[test]
    fn select_disabled_by_default() {
        let provider = select_provider(&ExplanationConfig::default());
        assert_eq!(provider.name(), "disabled");
        assert_eq!(provider.fallback_message(), TECHNIQUES_DETECTED_MESSAGE);
    }

    #[test]
    fn select_openai_without_key_reports_missing_key() {
        let config = ExplanationConfig {
            backend: ExplanationBackend::OpenAi,
            ..ExplanationConfig::default()
        };
        let provider = select_provider(&config);
        assert!(!provider.is_enabled());
        assert_eq!(provider.fallback_message(), MISSING_API_KEY_MESSAGE);
    }

    #[test]
    fn select_ollama_builds_remote() {
        let config = ExplanationConfig {
            backend: ExplanationBackend::Ollama,
            timeout_secs: 7,
            ..ExplanationConfig::default()
        };
        let provider = select_provider(&config);
        assert!(provider.is_enabled());
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.timeout(), Duration::from_secs(7));
    }

    // =================================================================
    // ASYNC RESOLUTION
    // =================================================================

    #[tokio::test]
    async fn resolve_uses_remote_completion() {
        let provider: Arc<dyn ExplanationProvider> = Arc::new(remote(
            MockLlmClient::new("Absolute claims discourage doubt."),
            Duration::from_secs(2),
        ));
        let out = resolve_explanation(
            provider,
            "Always".into(),
            vec![Technique::AbsoluteLanguage],
        )
        .await;
        assert_eq!(out, "Absolute claims discourage doubt.");
    }

    #[tokio::test]
    async fn resolve_times_out_to_fallback() {
        let provider: Arc<dyn ExplanationProvider> = Arc::new(remote(
            MockLlmClient::new("too late").with_delay(Duration::from_millis(300)),
            Duration::from_millis(20),
        ));
        let out = resolve_explanation(provider, "Hurry".into(), DETECTED.to_vec()).await;
        assert_eq!(out, EXPLANATION_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn resolve_skips_provider_when_nothing_detected() {
        let provider: Arc<dyn ExplanationProvider> = Arc::new(remote(
            MockLlmClient::failing("must not be called"),
            Duration::from_secs(1),
        ));
        let out = resolve_explanation(provider, "calm".into(), vec![]).await;
        assert_eq!(out, NO_TECHNIQUES_MESSAGE);
    }

    #[tokio::test]
    async fn resolve_disabled_returns_notice() {
        let provider: Arc<dyn ExplanationProvider> = Arc::new(DisabledExplainer::missing_api_key());
        let out = resolve_explanation(provider, "Hurry".into(), DETECTED.to_vec()).await;
        assert_eq!(out, MISSING_API_KEY_MESSAGE);
    }
}
