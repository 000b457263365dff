//! Health monitoring for providers
//!
//! # Module Structure
//!
//! - `types` - Health status levels and check results
//! - `provider` - Per-provider health tracking and system health aggregation
//! - `checker` - Probe trait, HTTP probe and the check routine
//! - `monitor` - Periodic health monitor task

pub mod checker;
pub mod monitor;
pub mod provider;
pub mod types;

pub use checker::{HealthChecker, HealthProbe, HttpHealthProbe};
pub use monitor::HealthMonitor;
pub use provider::{ProviderHealth, SystemHealth};
pub use types::{HealthCheckResult, HealthSnapshot, HealthStatus};
