//! Orchestrator
//!
//! Single entry point composing cache, selection, execution and cost
//! accounting. `process` converts every failure into a failure envelope.

mod builder;

pub use builder::OrchestratorBuilder;

use crate::config::Config;
use crate::core::cache_manager::{CACHE_PROVIDER, CacheStats, ResponseCache};
use crate::core::cost::{CostReport, CostTracker};
use crate::core::health::{HealthMonitor, HealthSnapshot, SystemHealth};
use crate::core::providers::ProviderRegistry;
use crate::core::router::{ProviderSelector, RequestExecutor};
use crate::core::types::{GenerationRequest, ResponseEnvelope};
use crate::utils::error::{GatewayError, Result};
use crate::utils::{generate_request_id, sanitize_for_logging};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Routes generation requests to providers
#[derive(Debug)]
pub struct Orchestrator {
    registry: Arc<ProviderRegistry>,
    health: HealthMonitor,
    cache: ResponseCache,
    costs: CostTracker,
    selector: ProviderSelector,
    executor: RequestExecutor,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Build every component from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        OrchestratorBuilder::from_config(config).build()
    }

    /// Run one health pass, then keep checking in the background
    pub async fn start(&self) {
        let snapshot = self.health.check_all().await;
        let healthy = snapshot.values().filter(|h| **h).count();
        info!(
            "Router started with {}/{} healthy providers",
            healthy,
            snapshot.len()
        );
        self.health.start_after_initial_check();
    }

    pub fn shutdown(&self) {
        self.health.shutdown();
    }

    /// Handle one request; never fails
    pub async fn process(&self, request: GenerationRequest) -> ResponseEnvelope {
        let request_id = generate_request_id();
        let started = Instant::now();
        let elapsed_ms = || started.elapsed().as_millis() as u64;
        let capability = request.capability();

        let key = self.cache.key_for(&request);
        if let Some(hit) = self.cache.get(&key) {
            debug!(request_id = %request_id, "Serving {} request from cache", capability);
            return ResponseEnvelope::success(
                request_id,
                hit.payload,
                CACHE_PROVIDER,
                hit.model,
                0.0,
                elapsed_ms(),
            );
        }

        let health = self.health.snapshot();
        let Some(provider) = self.selector.select(capability, request.tier, &health) else {
            let error = GatewayError::no_healthy_providers(format!(
                "no healthy providers available for {} requests",
                capability
            ));
            warn!(request_id = %request_id, "{}", error);
            return ResponseEnvelope::failure(request_id, error.to_string(), elapsed_ms());
        };

        match self.executor.execute(provider, &request).await {
            Ok(output) => {
                if !output.degraded {
                    self.cache
                        .put(key, output.payload.clone(), output.model.clone());
                }
                if let Err(e) = self.costs.add(&provider.name, output.cost) {
                    warn!(request_id = %request_id, "Cost not recorded: {}", e);
                }

                info!(
                    request_id = %request_id,
                    provider = %provider.name,
                    model = %output.model,
                    cost = output.cost,
                    degraded = output.degraded,
                    "Completed {} request",
                    capability
                );

                let envelope = ResponseEnvelope::success(
                    request_id,
                    output.payload,
                    provider.name.clone(),
                    output.model,
                    output.cost,
                    elapsed_ms(),
                );
                if output.degraded {
                    envelope.mark_degraded()
                } else {
                    envelope
                }
            }
            Err(error) => {
                let message = error.to_string();
                warn!(
                    request_id = %request_id,
                    provider = %provider.name,
                    "Request failed: {}",
                    sanitize_for_logging(&message)
                );
                ResponseEnvelope::failure(request_id, message, elapsed_ms())
                    .with_provider(provider.name.clone())
            }
        }
    }

    /// Process requests concurrently; results keep input order
    pub async fn process_all(&self, requests: Vec<GenerationRequest>) -> Vec<ResponseEnvelope> {
        join_all(requests.into_iter().map(|request| self.process(request))).await
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn health_monitor(&self) -> &HealthMonitor {
        &self.health
    }

    pub fn health_snapshot(&self) -> HealthSnapshot {
        self.health.snapshot()
    }

    pub fn system_health(&self) -> SystemHealth {
        self.health.system_health()
    }

    pub fn cost_tracker(&self) -> &CostTracker {
        &self.costs
    }

    pub fn cost_report(&self) -> CostReport {
        self.costs.report()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn selector(&self) -> &ProviderSelector {
        &self.selector
    }
}
