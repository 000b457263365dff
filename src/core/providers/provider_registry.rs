//! Provider Registry
//!
//! Ordered registry of the providers the router may call. Declaration order
//! is preserved and is the tie-break order for selection.

use super::ProviderKind;
use crate::config::{PricingConfig, ProviderConfig};
use crate::core::types::Capability;
use crate::utils::error::{GatewayError, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Immutable description of one configured provider
#[derive(Clone)]
pub struct ProviderDescriptor {
    pub name: String,
    pub kind: ProviderKind,
    pub base_url: String,
    api_key: Option<String>,
    pub api_version: Option<String>,
    pub default_voice: Option<String>,
    models: BTreeMap<Capability, Vec<String>>,
    pub pricing: PricingConfig,
}

impl ProviderDescriptor {
    /// Build a descriptor with the kind's public endpoint and no models
    pub fn new(name: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base_url: kind.default_base_url().unwrap_or_default().to_string(),
            api_key: None,
            api_version: None,
            default_voice: None,
            models: BTreeMap::new(),
            pricing: PricingConfig::default(),
        }
    }

    /// Resolve a descriptor from configuration, reading the credential from the environment if needed
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .or_else(|| config.provider_type.default_base_url().map(str::to_string))
            .ok_or_else(|| {
                GatewayError::Config(format!("Provider {} requires a base_url", config.name))
            })?;

        Ok(Self {
            name: config.name.clone(),
            kind: config.provider_type,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
            api_version: config.api_version.clone(),
            default_voice: config.default_voice.clone(),
            models: config.models.clone(),
            pricing: config.pricing.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
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

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Declares models for the capability and its kind can execute it
    pub fn supports(&self, capability: Capability) -> bool {
        self.kind.can_execute(capability) && self.models.contains_key(&capability)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.models
            .keys()
            .copied()
            .filter(|capability| self.kind.can_execute(*capability))
    }

    pub fn models_for(&self, capability: Capability) -> &[String] {
        self.models
            .get(&capability)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First listed model for the capability
    pub fn default_model(&self, capability: Capability) -> Option<&str> {
        self.models_for(capability).first().map(String::as_str)
    }

    /// The requested model when this provider lists it (or lists nothing), else the default
    pub fn resolve_model(&self, capability: Capability, requested: Option<&str>) -> Option<String> {
        let models = self.models_for(capability);
        match requested {
            Some(model) if models.is_empty() || models.iter().any(|m| m == model) => {
                Some(model.to_string())
            }
            _ => self.default_model(capability).map(str::to_string),
        }
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("models", &self.models)
            .finish()
    }
}

/// Provider Registry
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Create new provider registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration, skipping disabled entries
    pub fn from_configs(configs: &[ProviderConfig]) -> Result<Self> {
        let mut registry = Self::new();
        for config in configs {
            if !config.enabled {
                debug!("Skipping disabled provider {}", config.name);
                continue;
            }
            registry.register(ProviderDescriptor::from_config(config)?)?;
        }
        Ok(registry)
    }

    /// Register a provider; identifiers must be unique
    pub fn register(&mut self, provider: ProviderDescriptor) -> Result<()> {
        if self.contains(&provider.name) {
            return Err(GatewayError::Config(format!(
                "Duplicate provider name: {}",
                provider.name
            )));
        }
        debug!(
            "Registered provider {} ({}) at {}",
            provider.name, provider.kind, provider.base_url
        );
        self.providers.push(provider);
        Ok(())
    }

    /// Get provider by name
    pub fn get(&self, name: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Check if provider is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Providers in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    /// Providers offering a capability, in declaration order
    pub fn supporting(&self, capability: Capability) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter().filter(move |p| p.supports(capability))
    }

    /// List all registered provider names
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name.clone()).collect()
    }

    /// Get provider count
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.providers.len())
            .field("providers", &self.names())
            .finish()
    }
}
