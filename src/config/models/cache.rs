//! Cache configuration

use super::*;
use serde::{Deserialize, Serialize};

/// How the prompt is folded into a cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeyMode {
    /// First `prefix_chars` characters of the prompt
    #[default]
    Prefix,
    /// SHA-256 of the whole prompt
    FullHash,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable caching
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of entries before LRU eviction
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
    /// Cache TTL in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default)]
    pub key_mode: CacheKeyMode,
    #[serde(default = "default_prefix_chars")]
    pub prefix_chars: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_max_entries(),
            ttl_secs: default_cache_ttl(),
            key_mode: CacheKeyMode::default(),
            prefix_chars: default_prefix_chars(),
        }
    }
}

impl CacheConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = false;
        }
        if other.max_entries != default_cache_max_entries() {
            self.max_entries = other.max_entries;
        }
        if other.ttl_secs != default_cache_ttl() {
            self.ttl_secs = other.ttl_secs;
        }
        if other.key_mode != CacheKeyMode::default() {
            self.key_mode = other.key_mode;
        }
        if other.prefix_chars != default_prefix_chars() {
            self.prefix_chars = other.prefix_chars;
        }
        self
    }
}
