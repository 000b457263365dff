//! Response cache
//!
//! Bounded LRU cache with per-entry TTL, keyed by capability, model and a
//! fingerprint of the prompt.

pub mod manager;
pub mod types;


pub use manager::ResponseCache;
pub use types::{CacheEntry, CacheKey, CacheStats, CachedResponse};

/// Provider name reported for responses served from the cache
pub const CACHE_PROVIDER: &str = "cache";
