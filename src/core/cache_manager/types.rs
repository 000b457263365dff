//! Cache manager type definitions

use crate::config::CacheKeyMode;
use crate::core::types::{Capability, GenerationRequest, ResponsePayload};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Model component used when the request names none
pub const DEFAULT_MODEL_KEY: &str = "default";

/// Cache entry with metadata
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// Model that produced the value
    pub model: String,
    pub created_at: Instant,
    pub expires_at: Instant,
    pub access_count: u64,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, model: impl Into<String>, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            model: model.into(),
            created_at: now,
            expires_at: now + ttl,
            access_count: 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn mark_accessed(&mut self) {
        self.access_count += 1;
    }

    pub fn age(&self) -> Duration {
        Instant::now().duration_since(self.created_at)
    }
}

/// Cache key: capability, model and prompt fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub capability: Capability,
    pub model: String,
    pub fingerprint: String,
}

impl CacheKey {
    pub fn new(capability: Capability, model: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            capability,
            model: model.into(),
            fingerprint: fingerprint.into(),
        }
    }

    /// Derive the key for a request
    ///
    /// The model component is the requested model, not the one a provider
    /// later resolves, so lookups can happen before selection.
    pub fn from_request(request: &GenerationRequest, mode: CacheKeyMode, prefix_chars: usize) -> Self {
        Self::new(
            request.capability(),
            request.model.as_deref().unwrap_or(DEFAULT_MODEL_KEY),
            fingerprint(request.prompt(), mode, prefix_chars),
        )
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.capability, self.model, self.fingerprint)
    }
}

/// Prompt fingerprint: leading characters or a SHA-256 digest of the whole prompt
pub fn fingerprint(prompt: &str, mode: CacheKeyMode, prefix_chars: usize) -> String {
    match mode {
        CacheKeyMode::Prefix => prompt.chars().take(prefix_chars).collect(),
        CacheKeyMode::FullHash => hex::encode(Sha256::digest(prompt.as_bytes())),
    }
}

/// A cache hit handed back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub payload: ResponsePayload,
    pub model: String,
    pub age: Duration,
}

/// Atomic cache statistics for lock-free hot path updates
#[derive(Debug, Default)]
pub struct AtomicCacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    /// Entries pushed out by capacity
    pub evictions: AtomicU64,
    /// Entries dropped after their TTL
    pub expirations: AtomicU64,
}

impl AtomicCacheStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            size,
            capacity,
        }
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.insertions.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.expirations.store(0, Ordering::Relaxed);
    }
}

/// Cache statistics snapshot (returned to callers)
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
