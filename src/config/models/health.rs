//! Health check configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Health check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Run the periodic health task
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Health check interval in seconds
    #[serde(default = "default_health_interval")]
    pub interval_secs: u64,
    /// Timeout for a single probe in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Treat credentialed providers as healthy before the first check
    #[serde(default)]
    pub assume_healthy_at_start: bool,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_health_interval(),
            probe_timeout_secs: default_probe_timeout(),
            assume_healthy_at_start: false,
        }
    }
}

impl HealthConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = false;
        }
        if other.interval_secs != default_health_interval() {
            self.interval_secs = other.interval_secs;
        }
        if other.probe_timeout_secs != default_probe_timeout() {
            self.probe_timeout_secs = other.probe_timeout_secs;
        }
        if other.assume_healthy_at_start {
            self.assume_healthy_at_start = true;
        }
        self
    }
}
