//! Health checking
//!
//! Probes are injected through [`HealthProbe`]; [`HttpHealthProbe`] issues a
//! cheap authenticated GET per provider kind.

use super::provider::ProviderHealth;
use super::types::{HealthCheckResult, HealthSnapshot};
use crate::core::providers::base::{ConnectionPool, map_http_error};
use crate::core::providers::{ProviderDescriptor, ProviderError, ProviderKind, ProviderRegistry};
use crate::utils::sanitize_for_logging;
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Liveness probe for one provider
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, provider: &ProviderDescriptor) -> Result<(), ProviderError>;
}

/// Probe that calls a lightweight endpoint of each provider kind
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    pool: ConnectionPool,
}

impl HttpHealthProbe {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn probe_path(kind: ProviderKind) -> &'static str {
        match kind {
            ProviderKind::OpenAi => "/models",
            ProviderKind::Anthropic => "/v1/models",
            ProviderKind::Google => "/v1beta/models",
            ProviderKind::ElevenLabs => "/v1/user",
            ProviderKind::Generic => "",
        }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, provider: &ProviderDescriptor) -> Result<(), ProviderError> {
        let kind = provider.kind;
        let response = self
            .pool
            .get(provider, Self::probe_path(kind))
            .send()
            .await
            .map_err(|e| {
                ProviderError::network(kind.as_str(), sanitize_for_logging(&e.to_string()))
            })?;

        let status = response.status();
        let reachable = match kind {
            // Generic endpoints rarely expose a health route; any non-5xx answer counts
            ProviderKind::Generic => !status.is_server_error(),
            _ => status.is_success(),
        };
        if reachable {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_http_error(kind, status.as_u16(), &body))
    }
}

/// Runs probes and records results into the shared health map
#[derive(Clone)]
pub struct HealthChecker {
    registry: Arc<ProviderRegistry>,
    probe: Arc<dyn HealthProbe>,
    probe_timeout: Duration,
    health: Arc<RwLock<HashMap<String, ProviderHealth>>>,
}

impl HealthChecker {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        probe: Arc<dyn HealthProbe>,
        probe_timeout: Duration,
        assume_healthy: bool,
    ) -> Self {
        let health = registry
            .iter()
            .map(|p| {
                // Without a credential a provider can never become healthy
                let initial = assume_healthy && p.has_credential();
                (p.name.clone(), ProviderHealth::new(p.name.clone(), initial))
            })
            .collect();

        Self {
            registry,
            probe,
            probe_timeout,
            health: Arc::new(RwLock::new(health)),
        }
    }

    /// Probe one provider and record the outcome; never fails
    pub async fn check_health(&self, provider_id: &str) -> bool {
        let Some(provider) = self.registry.get(provider_id) else {
            warn!("Health check requested for unknown provider {}", provider_id);
            return false;
        };

        let start = Instant::now();
        let result = if !provider.has_credential() {
            debug!("Provider {} has no credential, skipping probe", provider_id);
            HealthCheckResult::unhealthy("missing credential", 0)
        } else {
            match tokio::time::timeout(self.probe_timeout, self.probe.probe(provider)).await {
                Ok(Ok(())) => HealthCheckResult::healthy(start.elapsed().as_millis() as u64),
                Ok(Err(error)) => {
                    let message = sanitize_for_logging(&error.to_string());
                    warn!("Health check failed for {}: {}", provider_id, message);
                    HealthCheckResult::unhealthy(message, start.elapsed().as_millis() as u64)
                }
                Err(_) => {
                    warn!(
                        "Health check timed out for {} after {:?}",
                        provider_id, self.probe_timeout
                    );
                    HealthCheckResult::unhealthy(
                        "Health check timeout",
                        start.elapsed().as_millis() as u64,
                    )
                }
            }
        };

        let healthy = result.healthy;
        if let Some(entry) = self.health.write().get_mut(provider_id) {
            entry.update(result);
        }
        debug!("Provider {} healthy={}", provider_id, healthy);
        healthy
    }

    /// Probe every registered provider concurrently
    pub async fn check_all(&self) -> HealthSnapshot {
        let names = self.registry.names();
        let results = join_all(names.iter().map(|name| self.check_health(name))).await;
        names.into_iter().zip(results).collect()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        self.health
            .read()
            .iter()
            .map(|(name, health)| (name.clone(), health.healthy))
            .collect()
    }

    pub fn provider_health(&self, provider_id: &str) -> Option<ProviderHealth> {
        self.health.read().get(provider_id).cloned()
    }

    pub fn all_health(&self) -> HashMap<String, ProviderHealth> {
        self.health.read().clone()
    }

    /// Manual override; providers without a credential stay unhealthy
    pub fn set_health(&self, provider_id: &str, healthy: bool) -> bool {
        let allowed = self
            .registry
            .get(provider_id)
            .map(|p| !healthy || p.has_credential());
        match (allowed, self.health.write().get_mut(provider_id)) {
            (Some(true), Some(entry)) => {
                entry.set_healthy(healthy);
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for HealthChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthChecker")
            .field("providers", &self.registry.names())
            .field("probe_timeout", &self.probe_timeout)
            .finish()
    }
}
