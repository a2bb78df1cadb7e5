use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "TruthLens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EXPLANATION_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_MAX_TEXT_BYTES: usize = 64 * 1024;

/// Tracing filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "truthlens=info,truthlens_lib=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which explanation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationBackend {
    Disabled,
    Ollama,
    OpenAi,
}

impl FromStr for ExplanationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "disabled" | "off" | "none" | "false" => Ok(Self::Disabled),
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("expected disabled, ollama or openai, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationConfig {
    pub backend: ExplanationBackend,
    pub ollama_url: String,
    pub openai_url: String,
    pub openai_api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            backend: ExplanationBackend::Disabled,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            openai_url: DEFAULT_OPENAI_URL.to_string(),
            openai_api_key: None,
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: DEFAULT_EXPLANATION_TIMEOUT_SECS,
        }
    }
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_text_bytes: usize,
    pub explanation: ExplanationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            explanation: ExplanationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Unset or blank variables
    /// take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var(
            "TRUTHLENS_BIND",
            get("TRUTHLENS_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let max_text_bytes = match get("TRUTHLENS_MAX_TEXT_BYTES") {
            Some(v) => parse_var("TRUTHLENS_MAX_TEXT_BYTES", v)?,
            None => DEFAULT_MAX_TEXT_BYTES,
        };

        let backend = match get("TRUTHLENS_EXPLANATION") {
            Some(v) => ExplanationBackend::from_str(&v).map_err(|reason| {
                ConfigError::InvalidValue {
                    var: "TRUTHLENS_EXPLANATION",
                    value: v.clone(),
                    reason,
                }
            })?,
            None => ExplanationBackend::Disabled,
        };

        let timeout_secs = match get("TRUTHLENS_EXPLANATION_TIMEOUT_SECS") {
            Some(v) => parse_var::<u64>("TRUTHLENS_EXPLANATION_TIMEOUT_SECS", v)?,
            None => DEFAULT_EXPLANATION_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "TRUTHLENS_EXPLANATION_TIMEOUT_SECS",
                value: "0".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let model = get("TRUTHLENS_MODEL").unwrap_or_else(|| match backend {
            ExplanationBackend::OpenAi => DEFAULT_OPENAI_MODEL.to_string(),
            _ => DEFAULT_OLLAMA_MODEL.to_string(),
        });

        Ok(Self {
            bind_addr,
            max_text_bytes,
            explanation: ExplanationConfig {
                backend,
                ollama_url: get("TRUTHLENS_OLLAMA_URL")
                    .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
                openai_url: get("TRUTHLENS_OPENAI_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
                openai_api_key: get("OPENAI_API_KEY"),
                model,
                timeout_secs,
            },
        })
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.explanation.backend, ExplanationBackend::Disabled);
    }

    #[test]
    fn openai_backend_defaults_model() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TRUTHLENS_EXPLANATION", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.explanation.backend, ExplanationBackend::OpenAi);
        assert_eq!(config.explanation.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.explanation.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TRUTHLENS_BIND", "0.0.0.0:9000"),
            ("TRUTHLENS_EXPLANATION", "ollama"),
            ("TRUTHLENS_MODEL", "mistral"),
            ("TRUTHLENS_EXPLANATION_TIMEOUT_SECS", "5"),
            ("TRUTHLENS_MAX_TEXT_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.explanation.backend, ExplanationBackend::Ollama);
        assert_eq!(config.explanation.model, "mistral");
        assert_eq!(config.explanation.timeout_secs, 5);
        assert_eq!(config.max_text_bytes, 1024);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TRUTHLENS_BIND", "  "),
            ("OPENAI_API_KEY", ""),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.explanation.openai_api_key.is_none());
    }

    #[test]
    fn invalid_bind_address_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("TRUTHLENS_BIND", "not-an-addr")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: "TRUTHLENS_BIND", .. }
        ));
    }

    #[test]
    fn unknown_backend_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("TRUTHLENS_EXPLANATION", "gpt")]))
            .unwrap_err();
        assert!(err.to_string().contains("TRUTHLENS_EXPLANATION"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "TRUTHLENS_EXPLANATION_TIMEOUT_SECS",
            "0",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn app_name_is_truthlens() {
        assert_eq!(APP_NAME, "TruthLens");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
