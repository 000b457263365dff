//! Provider health tracking

use super::types::{HealthCheckResult, HealthStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Number of recent checks retained per provider
pub const HISTORY_LIMIT: usize = 50;

/// Provider health information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderHealth {
    pub provider_id: String,
    pub healthy: bool,
    /// Last check time; `None` until the first check or override
    pub last_checked: Option<chrono::DateTime<chrono::Utc>>,
    pub last_error: Option<String>,
    pub last_latency_ms: Option<u64>,
    pub consecutive_failures: u32,
    /// Recent check results, oldest first
    pub history: VecDeque<HealthCheckResult>,
    /// Percentage of successful checks in `history`
    pub success_rate: f64,
}

impl ProviderHealth {
    pub fn new(provider_id: impl Into<String>, healthy: bool) -> Self {
        Self {
            provider_id: provider_id.into(),
            healthy,
            last_checked: None,
            last_error: None,
            last_latency_ms: None,
            consecutive_failures: 0,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            success_rate: 0.0,
        }
    }

    /// Update with new health check result
    pub fn update(&mut self, result: HealthCheckResult) {
        self.healthy = result.healthy;
        self.last_checked = Some(result.timestamp);
        self.last_latency_ms = Some(result.response_time_ms);
        self.last_error = result.error.clone();

        if result.healthy {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures += 1;
        }

        self.history.push_back(result);
        if self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }

        let successful = self.history.iter().filter(|h| h.healthy).count();
        self.success_rate = successful as f64 / self.history.len() as f64 * 100.0;
    }

    /// Manual override; not recorded in the history
    pub fn set_healthy(&mut self, healthy: bool) {
        self.healthy = healthy;
        self.last_checked = Some(chrono::Utc::now());
        if healthy {
            self.consecutive_failures = 0;
            self.last_error = None;
        } else {
            self.last_error = Some("marked unhealthy manually".to_string());
        }
    }
}

/// System health summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    pub status: HealthStatus,
    pub total_providers: usize,
    pub healthy_providers: usize,
    pub providers: BTreeMap<String, ProviderHealth>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl SystemHealth {
    pub fn new(providers: BTreeMap<String, ProviderHealth>) -> Self {
        let total_providers = providers.len();
        let healthy_providers = providers.values().filter(|h| h.healthy).count();
        let status = if healthy_providers == 0 {
            HealthStatus::Down
        } else if healthy_providers == total_providers {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            total_providers,
            healthy_providers,
            providers,
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
