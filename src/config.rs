//! Startup configuration read from the environment
//!
//! Resolved once in `main`. A missing credential for a provider that needs one
//! is fatal here rather than surfacing later as per-request failures.

use crate::llm::{Provider, ProviderKind, ProviderSettings};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown LLM provider: {0} (expected local, hosted or commercial)")]
    UnknownProvider(String),
    #[error("{provider} provider requires {var} to be set")]
    MissingCredential {
        provider: ProviderKind,
        var: &'static str,
    },
    #[error("Invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub request_timeout: Duration,
    pub port: u16,
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = match get("LLM_PROVIDER") {
            Some(name) => {
                ProviderKind::parse(&name).ok_or(ConfigError::UnknownProvider(name))?
            }
            None => ProviderKind::Local,
        };

        let api_key = match kind.api_key_env_var() {
            Some(var) => Some(get(var).ok_or(ConfigError::MissingCredential {
                provider: kind,
                var,
            })?),
            None => None,
        };

        let settings = ProviderSettings {
            base_url: get("LLM_BASE_URL").unwrap_or_else(|| kind.default_base_url().to_string()),
            api_key,
            model: get("LLM_MODEL").unwrap_or_else(|| kind.default_model().to_string()),
        };

        Ok(Self {
            provider: kind.with_settings(settings),
            request_timeout: Duration::from_secs(parse_number(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            port: parse_number(get("TALKBACK_PORT"), "TALKBACK_PORT", DEFAULT_PORT)?,
            session_ttl: Duration::from_secs(parse_number(
                get("TALKBACK_SESSION_TTL_SECS"),
                "TALKBACK_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )?),
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    value: Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_local_without_credential() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.provider,
            Provider::LocalEndpoint(ProviderSettings {
                base_url: "http://localhost:11434/v1".to_string(),
                api_key: None,
                model: "llama3.2".to_string(),
            })
        );
        assert_eq!(config.port, 5001);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_commercial_requires_key() {
        let err = config_from(&[("LLM_PROVIDER", "commercial")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingCredential {
                provider: ProviderKind::Commercial,
                var: "OPENAI_API_KEY",
            }
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = config_from(&[("LLM_PROVIDER", "hosted"), ("HOSTED_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn test_hosted_with_key_and_overrides() {
        let config = config_from(&[
            ("LLM_PROVIDER", "hosted"),
            ("HOSTED_API_KEY", "gsk-test"),
            ("LLM_MODEL", "mixtral"),
            ("TALKBACK_PORT", "8080"),
        ])
        .unwrap();

        let settings = config.provider.settings();
        assert!(matches!(config.provider, Provider::HostedFree(_)));
        assert_eq!(settings.api_key.as_deref(), Some("gsk-test"));
        assert_eq!(settings.model, "mixtral");
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = config_from(&[("LLM_PROVIDER", "mystery")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownProvider("mystery".to_string()));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = config_from(&[("TALKBACK_PORT", "eighty")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                var: "TALKBACK_PORT",
                ..
            }
        ));
    }
}
