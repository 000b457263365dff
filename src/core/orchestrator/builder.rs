//! Orchestrator builder

use super::Orchestrator;
use crate::config::{CacheConfig, Config, HealthConfig, RouterConfig, Validate};
use crate::core::cache_manager::ResponseCache;
use crate::core::cost::{CostTracker, PricingTable};
use crate::core::health::{HealthMonitor, HealthProbe, HttpHealthProbe};
use crate::core::providers::ProviderRegistry;
use crate::core::providers::base::ConnectionPool;
use crate::core::router::{ProviderSelector, RequestExecutor, SelectionPolicy, policy_for};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder with injectable registry, probe, policy and pricing
#[derive(Default)]
pub struct OrchestratorBuilder {
    config: Option<Config>,
    registry: Option<ProviderRegistry>,
    probe: Option<Arc<dyn HealthProbe>>,
    policy: Option<Arc<dyn SelectionPolicy>>,
    pricing: Option<PricingTable>,
    router: RouterConfig,
    cache: CacheConfig,
    health: HealthConfig,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a full configuration; providers are built at `build`
    pub fn from_config(config: &Config) -> Self {
        Self {
            router: config.router().clone(),
            cache: config.cache().clone(),
            health: config.health().clone(),
            config: Some(config.clone()),
            ..Self::default()
        }
    }

    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn policy(mut self, policy: Arc<dyn SelectionPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = Some(pricing);
        self
    }

    pub fn router_config(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    pub fn cache_config(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn health_config(mut self, health: HealthConfig) -> Self {
        self.health = health;
        self
    }

    pub fn build(self) -> Result<Orchestrator> {
        let registry = match (self.registry, &self.config) {
            (Some(registry), _) => registry,
            (None, Some(config)) => ProviderRegistry::from_configs(config.providers())?,
            (None, None) => ProviderRegistry::new(),
        };
        let registry = Arc::new(registry);

        self.router.validate().map_err(GatewayError::Config)?;
        self.cache.validate().map_err(GatewayError::Config)?;
        self.health.validate().map_err(GatewayError::Config)?;

        let pool = ConnectionPool::new()?;
        let pricing = self.pricing.unwrap_or_default();
        let probe = self
            .probe
            .unwrap_or_else(|| Arc::new(HttpHealthProbe::new(pool.clone())));
        let policy = self
            .policy
            .unwrap_or_else(|| policy_for(&self.router, pricing.clone()));

        Ok(Orchestrator {
            health: HealthMonitor::new(registry.clone(), probe, &self.health),
            cache: ResponseCache::from_config(&self.cache)?,
            costs: CostTracker::new(),
            selector: ProviderSelector::new(registry.clone(), policy),
            executor: RequestExecutor::new(
                pool,
                pricing,
                Duration::from_secs(self.router.request_timeout_secs),
            ),
            registry,
        })
    }
}
