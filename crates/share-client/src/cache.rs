//! In-memory response cache
//!
//! An explicit cache object shared between clients through
//! `Arc<Mutex<ResponseCache>>`. Entries expire after a configurable TTL.

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::HashMap;

const DEFAULT_TTL_SECS: i64 = 30;

/// A cached response body
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: Bytes,
    pub stored_at: DateTime<Utc>,
}

/// Counters for cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Response cache keyed by operation and resource
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: HashMap<String, CachedResponse>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl ResponseCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    fn key(operation: &str, resource: &str) -> String {
        format!("{} {}", operation, resource)
    }

    /// Look up a fresh entry, dropping it if it has expired
    pub fn get(&mut self, operation: &str, resource: &str) -> Option<Bytes> {
        self.get_at(operation, resource, Utc::now())
    }

    fn get_at(&mut self, operation: &str, resource: &str, now: DateTime<Utc>) -> Option<Bytes> {
        let key = Self::key(operation, resource);
        match self.entries.get(&key) {
            Some(entry) if now - entry.stored_at <= self.ttl => {
                self.hits += 1;
                Some(entry.body.clone())
            }
            Some(_) => {
                debug!("Cache entry expired: {}", key);
                self.entries.remove(&key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn set(&mut self, operation: &str, resource: &str, body: Bytes) {
        self.set_at(operation, resource, body, Utc::now());
    }

    fn set_at(&mut self, operation: &str, resource: &str, body: Bytes, now: DateTime<Utc>) {
        self.entries.insert(
            Self::key(operation, resource),
            CachedResponse {
                body,
                stored_at: now,
            },
        );
    }

    /// Remove every entry whose key contains `pattern`
    pub fn invalidate_pattern(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
