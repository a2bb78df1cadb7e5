use std::time::Duration;

use super::ExplanationError;

/// Blocking text-generation backend.
///
/// Implementations own their HTTP client and its timeout. Calls block the
/// current thread; async callers go through `spawn_blocking`.
pub trait LlmClient: Send + Sync {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, ExplanationError>;

    fn is_model_available(&self, model: &str) -> Result<bool, ExplanationError>;

    fn list_models(&self) -> Result<Vec<String>, ExplanationError>;

    /// Short backend label for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Mock LLM client for testing — returns a configurable response.
pub struct MockLlmClient {
    response: String,
    failure: Option<String>,
    delay: Option<Duration>,
    available_models: Vec<String>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            failure: None,
            delay: None,
            available_models: vec!["llama3.2:latest".to_string()],
        }
    }

    /// Every call fails with a 503 carrying `body`.
    pub fn failing(body: &str) -> Self {
        Self {
            failure: Some(body.to_string()),
            ..Self::new("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }
}

impl LlmClient for MockLlmClient {
    fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _system: &str,
    ) -> Result<String, ExplanationError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match &self.failure {
            Some(body) => Err(ExplanationError::Service {
                status: 503,
                body: body.clone(),
            }),
            None => Ok(self.response.clone()),
        }
    }

    fn is_model_available(&self, model: &str) -> Result<bool, ExplanationError> {
        Ok(self.available_models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, ExplanationError> {
        Ok(self.available_models.clone())
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockLlmClient::new("test response");
        let result = client.generate("model", "prompt", "system").unwrap();
        assert_eq!(result, "test response");
    }

    #[test]
    fn failing_mock_returns_service_error() {
        let client = MockLlmClient::failing("quota exceeded");
        let err = client.generate("model", "prompt", "system").unwrap_err();
        assert!(matches!(err, ExplanationError::Service { status: 503, .. }));
    }

    #[test]
    fn mock_client_lists_models() {
        let client = MockLlmClient::new("").with_models(vec![
            "llama3.2:latest".into(),
            "mistral:7b".into(),
        ]);
        assert_eq!(client.list_models().unwrap().len(), 2);
        assert!(client.is_model_available("mistral").unwrap());
        assert!(!client.is_model_available("gemma").unwrap());
    }
}
