//! Health monitor implementation
//!
//! Owns the periodic check task. With [`HealthMonitor::start`] the first
//! tick fires immediately, so every provider is checked at once.

use super::checker::{HealthChecker, HealthProbe};
use super::provider::{ProviderHealth, SystemHealth};
use super::types::HealthSnapshot;
use crate::config::HealthConfig;
use crate::core::providers::ProviderRegistry;
use crate::utils::error::{GatewayError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Health monitor for tracking provider health
pub struct HealthMonitor {
    checker: HealthChecker,
    interval: Duration,
    enabled: bool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl HealthMonitor {
    /// Create a new health monitor
    pub fn new(
        registry: Arc<ProviderRegistry>,
        probe: Arc<dyn HealthProbe>,
        config: &HealthConfig,
    ) -> Self {
        Self {
            checker: HealthChecker::new(
                registry,
                probe,
                Duration::from_secs(config.probe_timeout_secs),
                config.assume_healthy_at_start,
            ),
            interval: Duration::from_secs(config.interval_secs),
            enabled: config.enabled,
            task: Mutex::new(None),
        }
    }

    /// Probe one provider and record the outcome
    pub async fn check_health(&self, provider_id: &str) -> bool {
        self.checker.check_health(provider_id).await
    }

    /// Probe every provider concurrently
    pub async fn check_all(&self) -> HealthSnapshot {
        self.checker.check_all().await
    }

    /// Spawn the periodic check task; no-op when disabled or already running
    ///
    /// The first pass runs immediately inside the task.
    pub fn start(&self) {
        self.spawn(false);
    }

    /// Like [`start`](Self::start), for callers that already ran `check_all`;
    /// the first pass waits one interval
    pub fn start_after_initial_check(&self) {
        self.spawn(true);
    }

    fn spawn(&self, skip_first_pass: bool) {
        if !self.enabled {
            debug!("Periodic health checks disabled");
            return;
        }
        if self.interval.is_zero() {
            warn!("Health check interval is zero, periodic checks not started");
            return;
        }

        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let checker = self.checker.clone();
        let period = self.interval;
        info!("Starting health monitor, interval {:?}", period);

        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            if skip_first_pass {
                ticker.tick().await;
            }
            loop {
                ticker.tick().await;
                let snapshot = checker.check_all().await;
                let healthy = snapshot.values().filter(|h| **h).count();
                debug!("Health pass complete: {}/{} healthy", healthy, snapshot.len());
            }
        }));
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the periodic task
    pub fn shutdown(&self) {
        if let Some(handle) = self.task.lock().take() {
            info!("Shutting down health monitoring");
            handle.abort();
        }
    }

    /// Provider id -> healthy
    pub fn snapshot(&self) -> HealthSnapshot {
        self.checker.snapshot()
    }

    pub fn provider_health(&self, provider_id: &str) -> Option<ProviderHealth> {
        self.checker.provider_health(provider_id)
    }

    pub fn system_health(&self) -> SystemHealth {
        SystemHealth::new(self.checker.all_health().into_iter().collect())
    }

    /// Manually mark a provider healthy or unhealthy
    pub fn set_health(&self, provider_id: &str, healthy: bool) -> Result<()> {
        if self.checker.set_health(provider_id, healthy) {
            info!("Manually set health for {}: {}", provider_id, healthy);
            Ok(())
        } else if self.checker.provider_health(provider_id).is_none() {
            Err(GatewayError::provider_not_found(provider_id))
        } else {
            Err(GatewayError::validation(format!(
                "Provider {} has no credential and cannot be marked healthy",
                provider_id
            )))
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("checker", &self.checker)
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}
