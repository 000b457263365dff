//! Provider configuration

use super::*;
use crate::core::providers::ProviderKind;
use crate::core::types::Capability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider identifier used for routing and accounting
    pub name: String,
    /// Provider kind (openai, anthropic, google, elevenlabs, generic)
    pub provider_type: ProviderKind,
    /// Inline API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Base URL; kinds other than `generic` fall back to their public endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API version header (Anthropic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Default voice for speech synthesis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_voice: Option<String>,
    /// Supported models per capability, first entry is the default
    #[serde(default)]
    pub models: BTreeMap<Capability, Vec<String>>,
    /// Per-provider price overrides
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Whether provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, provider_type: ProviderKind) -> Self {
        Self {
            name: name.into(),
            provider_type,
            api_key: None,
            api_key_env: None,
            base_url: None,
            api_version: None,
            default_voice: None,
            models: BTreeMap::new(),
            pricing: PricingConfig::default(),
            enabled: true,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_models<I, S>(mut self, capability: Capability, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models
            .insert(capability, models.into_iter().map(Into::into).collect());
        self
    }

    /// Resolve the credential: inline key first, then the named environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| {
                self.api_key_env
                    .as_ref()
                    .and_then(|var| std::env::var(var).ok())
            })
            .filter(|key| !key.trim().is_empty())
    }
}
