//! Top-level router file configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Contents of the router configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Providers in declaration order; order is the routing tie-break
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

impl GatewayConfig {
    /// Merge with another configuration (other takes precedence)
    ///
    /// Providers from `other` replace same-named providers and are appended otherwise.
    pub fn merge(mut self, other: Self) -> Self {
        for provider in other.providers {
            match self.providers.iter_mut().find(|p| p.name == provider.name) {
                Some(existing) => *existing = provider,
                None => self.providers.push(provider),
            }
        }
        self.router = self.router.merge(other.router);
        self.cache = self.cache.merge(other.cache);
        self.health = self.health.merge(other.health);
        self
    }
}
