//! Health status types and check results

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider id -> healthy, as read by the selector
pub type HealthSnapshot = HashMap<String, bool>;

/// Aggregate status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every provider is healthy
    Healthy,
    /// Some providers are healthy
    Degraded,
    /// No provider is healthy
    Down,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Down => "down",
        };
        f.write_str(label)
    }
}

/// Health check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub healthy: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Error message if unhealthy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthCheckResult {
    /// Create a healthy result
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            response_time_ms,
            timestamp: chrono::Utc::now(),
            error: None,
        }
    }

    /// Create an unhealthy result
    pub fn unhealthy(error: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            response_time_ms,
            timestamp: chrono::Utc::now(),
            error: Some(error.into()),
        }
    }
}
