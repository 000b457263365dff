//! Configuration data models
//!
//! This module defines all configuration structures read from the router file.

pub mod cache;
pub mod gateway;
pub mod health;
pub mod pricing;
pub mod provider;
pub mod router;

pub use cache::*;
pub use gateway::*;
pub use health::*;
pub use pricing::*;
pub use provider::*;
pub use router::*;

/// Default per-call upstream deadline in seconds
pub fn default_request_timeout() -> u64 {
    60
}

pub fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

pub fn default_cache_max_entries() -> usize {
    1000
}

/// Number of prompt characters folded into a prefix cache key
pub fn default_prefix_chars() -> usize {
    100
}

/// Health check interval in seconds
pub fn default_health_interval() -> u64 {
    300 // 5 minutes
}

pub fn default_probe_timeout() -> u64 {
    10
}

pub fn default_true() -> bool {
    true
}
