//! Cache manager implementation

use super::types::{AtomicCacheStats, CacheEntry, CacheKey, CacheStats, CachedResponse};
use crate::config::{CacheConfig, CacheKeyMode};
use crate::core::types::{GenerationRequest, ResponsePayload};
use crate::utils::error::{GatewayError, Result};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::debug;

/// LRU + TTL response cache
pub struct ResponseCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry<ResponsePayload>>>,
    ttl: Duration,
    enabled: bool,
    key_mode: CacheKeyMode,
    prefix_chars: usize,
    stats: AtomicCacheStats,
}

impl ResponseCache {
    /// Create an enabled cache keyed by prompt prefix
    pub fn new(max_entries: usize, ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            GatewayError::Config(
                "Invalid cache configuration: max_entries must be greater than 0".to_string(),
            )
        })?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            enabled: true,
            key_mode: CacheKeyMode::Prefix,
            prefix_chars: crate::config::default_prefix_chars(),
            stats: AtomicCacheStats::default(),
        })
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let mut cache = Self::new(config.max_entries, Duration::from_secs(config.ttl_secs))?;
        cache.enabled = config.enabled;
        cache.key_mode = config.key_mode;
        cache.prefix_chars = config.prefix_chars;
        Ok(cache)
    }

    pub fn with_key_mode(mut self, key_mode: CacheKeyMode, prefix_chars: usize) -> Self {
        self.key_mode = key_mode;
        self.prefix_chars = prefix_chars;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Key under which a request's response is stored
    pub fn key_for(&self, request: &GenerationRequest) -> CacheKey {
        CacheKey::from_request(request, self.key_mode, self.prefix_chars)
    }

    /// Look up a live entry; expired entries are removed
    pub fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
        if !self.enabled {
            return None;
        }

        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.mark_accessed();
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                Some(CachedResponse {
                    payload: entry.value.clone(),
                    model: entry.model.clone(),
                    age: entry.age(),
                })
            }
            Some(_) => {
                entries.pop(key);
                self.stats.expirations.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache entry expired for key: {}", key);
                None
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a payload; replaces any entry under the same key
    pub fn put(&self, key: CacheKey, payload: ResponsePayload, model: impl Into<String>) {
        if !self.enabled {
            return;
        }

        let entry = CacheEntry::new(payload, model, self.ttl);
        let mut entries = self.entries.lock();
        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                debug!("Evicted least recently used key: {}", evicted);
            }
        }
        self.stats.insertions.fetch_add(1, Ordering::Relaxed);
        debug!("Cached response for key: {}", key);
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        self.stats
            .expirations
            .fetch_add(expired.len() as u64, Ordering::Relaxed);
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics (lock-free counters plus current size)
    pub fn stats(&self) -> CacheStats {
        let (size, capacity) = {
            let entries = self.entries.lock();
            (entries.len(), entries.cap().get())
        };
        self.stats.snapshot(size, capacity)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        self.stats.reset();
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("enabled", &self.enabled)
            .field("ttl", &self.ttl)
            .field("key_mode", &self.key_mode)
            .field("len", &self.len())
            .finish()
    }
}
