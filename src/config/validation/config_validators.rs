//! Configuration validators
//!
//! Validation implementations for the router file and each of its sections.

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::providers::ProviderKind;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating router configuration");

        let mut provider_names = HashSet::new();
        for provider in &self.providers {
            if !provider_names.insert(provider.name.as_str()) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
            provider.validate()?;
        }

        self.router.validate()?;
        for (capability, tiers) in &self.router.preferences {
            for (tier, name) in tiers {
                if !provider_names.contains(name.as_str()) {
                    return Err(format!(
                        "Preference for {} / {} names unknown provider '{}'",
                        capability, tier, name
                    ));
                }
            }
        }

        self.cache.validate()?;
        self.health.validate()?;

        debug!("Router configuration validation completed");
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }
        if self.name == crate::core::cache_manager::CACHE_PROVIDER {
            return Err(format!("Provider name '{}' is reserved", self.name));
        }

        match &self.base_url {
            Some(base_url) => validate_base_url(base_url, &self.name)?,
            None if self.provider_type == ProviderKind::Generic => {
                return Err(format!(
                    "Provider {} is generic and requires a base_url",
                    self.name
                ));
            }
            None => {}
        }

        if self.models.is_empty() {
            return Err(format!(
                "Provider {} must declare models for at least one capability",
                self.name
            ));
        }

        if let Some(capability) = self
            .models
            .keys()
            .find(|capability| !self.provider_type.can_execute(**capability))
        {
            return Err(format!(
                "Provider {} ({}) cannot serve {} requests",
                self.name, self.provider_type, capability
            ));
        }

        for rate in self.pricing.rates() {
            if !rate.is_finite() || rate < 0.0 {
                return Err(format!(
                    "Provider {} has an invalid price: {}",
                    self.name, rate
                ));
            }
        }

        Ok(())
    }
}

impl Validate for RouterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("Router request timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("Cache max_entries must be greater than 0".to_string());
        }
        if self.ttl_secs == 0 {
            return Err("Cache ttl_secs must be greater than 0".to_string());
        }
        if self.key_mode == CacheKeyMode::Prefix && self.prefix_chars == 0 {
            return Err("Cache prefix_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("Health interval_secs must be greater than 0".to_string());
        }
        if self.probe_timeout_secs == 0 {
            return Err("Health probe_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn validate_base_url(base_url: &str, provider: &str) -> Result<(), String> {
    let url = Url::parse(base_url)
        .map_err(|e| format!("Provider {} has invalid base_url: {}", provider, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "Provider {} base_url must use http:// or https://, got: {}",
            provider, scheme
        )),
    }
}
