//! Configuration management for the router
//!
//! This module handles loading, validation, and management of the router configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::providers::ProviderKind;
use crate::core::types::Capability;
use crate::utils::error::{GatewayError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Prefix for provider definitions in the environment
const ENV_PROVIDER_PREFIX: &str = "UAI_PROVIDER_";

/// Main configuration struct for the router
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Router file configuration
    pub gateway: GatewayConfig,
}

impl Config {
    pub fn new(gateway: GatewayConfig) -> Self {
        Self { gateway }
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let gateway: GatewayConfig = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from `UAI_*` key/value pairs
    ///
    /// Providers are read from `UAI_PROVIDER_<NAME>_<FIELD>` where field is one of
    /// `TYPE`, `API_KEY`, `API_KEY_ENV`, `BASE_URL`, `API_VERSION`, `DEFAULT_VOICE`
    /// or `<CAPABILITY>_MODELS` (comma separated). Providers are ordered by name.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut gateway = GatewayConfig::default();
        let mut provider_fields: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for (key, value) in vars {
            if let Some(rest) = key.strip_prefix(ENV_PROVIDER_PREFIX) {
                if let Some((name, field)) = rest.split_once('_') {
                    provider_fields
                        .entry(name.to_lowercase())
                        .or_default()
                        .insert(field.to_lowercase(), value);
                }
                continue;
            }

            match key.as_str() {
                "UAI_ROUTER_STRATEGY" => {
                    gateway.router.strategy =
                        serde_yaml::from_str(&value.to_lowercase()).map_err(|e| {
                            GatewayError::Config(format!("Invalid router strategy: {}", e))
                        })?;
                }
                "UAI_REQUEST_TIMEOUT_SECS" => {
                    gateway.router.request_timeout_secs = parse_var(&key, &value)?;
                }
                "UAI_CACHE_ENABLED" => gateway.cache.enabled = parse_var(&key, &value)?,
                "UAI_CACHE_MAX_ENTRIES" => gateway.cache.max_entries = parse_var(&key, &value)?,
                "UAI_CACHE_TTL_SECS" => gateway.cache.ttl_secs = parse_var(&key, &value)?,
                "UAI_HEALTH_INTERVAL_SECS" => {
                    gateway.health.interval_secs = parse_var(&key, &value)?;
                }
                "UAI_HEALTH_PROBE_TIMEOUT_SECS" => {
                    gateway.health.probe_timeout_secs = parse_var(&key, &value)?;
                }
                _ => {}
            }
        }

        for (name, fields) in provider_fields {
            gateway.providers.push(provider_from_fields(name, fields)?);
        }

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get providers configuration
    pub fn providers(&self) -> &[ProviderConfig] {
        &self.gateway.providers
    }

    /// Get router settings
    pub fn router(&self) -> &RouterConfig {
        &self.gateway.router
    }

    /// Get cache configuration
    pub fn cache(&self) -> &CacheConfig {
        &self.gateway.cache
    }

    /// Get health configuration
    pub fn health(&self) -> &HealthConfig {
        &self.gateway.health
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.gateway.validate().map_err(GatewayError::Config)
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn provider_from_fields(
    name: String,
    mut fields: BTreeMap<String, String>,
) -> Result<ProviderConfig> {
    let provider_type: ProviderKind = fields
        .remove("type")
        .ok_or_else(|| GatewayError::Config(format!("Provider {} missing type", name)))?
        .parse()
        .map_err(GatewayError::Config)?;

    let mut provider = ProviderConfig::new(name.clone(), provider_type);
    provider.api_key = fields.remove("api_key");
    provider.api_key_env = fields.remove("api_key_env");
    provider.base_url = fields.remove("base_url");
    provider.api_version = fields.remove("api_version");
    provider.default_voice = fields.remove("default_voice");

    for (field, value) in fields {
        let Some(capability) = field.strip_suffix("_models") else {
            debug!("Ignoring unknown field {} for provider {}", field, name);
            continue;
        };
        let capability: Capability = capability.parse().map_err(GatewayError::Config)?;
        let models = value
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        provider.models.insert(capability, models);
    }

    Ok(provider)
}
