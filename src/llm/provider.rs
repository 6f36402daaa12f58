//! Provider selection
//!
//! Every supported provider speaks the `OpenAI` chat-completions wire format;
//! they differ only in endpoint, credential requirement and default model.

use std::fmt;

/// Endpoint, credential and model for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Provider kind, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// Self-hosted model server (e.g. Ollama) on the local machine
    LocalEndpoint(ProviderSettings),
    /// Hosted free-tier inference endpoint
    HostedFree(ProviderSettings),
    /// Commercial API
    Commercial(ProviderSettings),
}

impl Provider {
    pub fn settings(&self) -> &ProviderSettings {
        match self {
            Provider::LocalEndpoint(s) | Provider::HostedFree(s) | Provider::Commercial(s) => s,
        }
    }

    pub fn display_name(&self) -> &'static str {
        ProviderKind::from(self).display_name()
    }
}

/// Provider kind without its settings, as named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Local,
    Hosted,
    Commercial,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "ollama" => Some(Self::Local),
            "hosted" | "free" => Some(Self::Hosted),
            "commercial" | "openai" => Some(Self::Commercial),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Local => "local",
            ProviderKind::Hosted => "hosted",
            ProviderKind::Commercial => "commercial",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Local => "http://localhost:11434/v1",
            ProviderKind::Hosted => "https://api.groq.com/openai/v1",
            ProviderKind::Commercial => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Local => "llama3.2",
            ProviderKind::Hosted => "llama-3.1-8b-instant",
            ProviderKind::Commercial => "gpt-4o-mini",
        }
    }

    /// Environment variable holding this provider's credential, if it needs one
    pub fn api_key_env_var(self) -> Option<&'static str> {
        match self {
            ProviderKind::Local => None,
            ProviderKind::Hosted => Some("HOSTED_API_KEY"),
            ProviderKind::Commercial => Some("OPENAI_API_KEY"),
        }
    }

    pub fn with_settings(self, settings: ProviderSettings) -> Provider {
        match self {
            ProviderKind::Local => Provider::LocalEndpoint(settings),
            ProviderKind::Hosted => Provider::HostedFree(settings),
            ProviderKind::Commercial => Provider::Commercial(settings),
        }
    }
}

impl From<&Provider> for ProviderKind {
    fn from(provider: &Provider) -> Self {
        match provider {
            Provider::LocalEndpoint(_) => ProviderKind::Local,
            Provider::HostedFree(_) => ProviderKind::Hosted,
            Provider::Commercial(_) => ProviderKind::Commercial,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
