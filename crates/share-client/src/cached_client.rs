//! Cached share client (decorator pattern)
//!
//! Wraps any `ShareClient` implementation to add caching behavior.
//! The cache mode determines whether to read from cache, write to cache, or both.
//! Reads that pass `bypass_cache = true` always go to the inner client.

use crate::cache::ResponseCache;
use crate::client::{CacheMode, ShareClient};
use crate::error::ShareError;
use crate::types::{Entry, FileHandle, Share};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cached share client using the decorator pattern
///
/// # Cache Modes
///
/// - `CacheMode::None` - Pass through to inner client (no caching)
/// - `CacheMode::WriteOnly` - Skip cache reads, but write responses (force refresh)
/// - `CacheMode::ReadOnly` - Read from cache only, don't update cache
/// - `CacheMode::ReadWrite` - Full caching (default)
///
/// # Example
///
/// ```rust,ignore
/// use share_client::{CachedShareClient, LocalShareClient, CacheMode, ResponseCache};
/// use std::sync::{Arc, Mutex};
///
/// let cache = Arc::new(Mutex::new(ResponseCache::default()));
/// let client = CachedShareClient::new(LocalShareClient::new("/mnt"), cache, CacheMode::ReadWrite);
///
/// // Same client, but every read goes to the store first
/// let fresh = client.with_mode(CacheMode::WriteOnly);
/// ```
#[derive(Debug, Clone)]
pub struct CachedShareClient<C: ShareClient + Clone> {
    inner: C,
    cache: Arc<Mutex<ResponseCache>>,
    mode: CacheMode,
}

impl<C: ShareClient + Clone> CachedShareClient<C> {
    /// Create a new cached client
    ///
    /// # Arguments
    ///
    /// * `inner` - The inner client to delegate calls to
    /// * `cache` - Shared cache instance
    /// * `mode` - Cache behavior mode
    pub fn new(inner: C, cache: Arc<Mutex<ResponseCache>>, mode: CacheMode) -> Self {
        Self { inner, cache, mode }
    }

    /// Get the current cache mode
    pub fn cache_mode(&self) -> CacheMode {
        self.mode
    }

    /// Create a new client with a different cache mode sharing the same cache
    pub fn with_mode(&self, mode: CacheMode) -> CachedShareClient<C> {
        CachedShareClient {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
            mode,
        }
    }

    /// Get a reference to the inner client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_cache_get(&self, operation: &str, resource: &str, bypass: bool) -> Option<Bytes> {
        if bypass || !self.mode.should_read() {
            return None;
        }
        self.cache().get(operation, resource)
    }

    fn cache_set(&self, operation: &str, resource: &str, body: Bytes) {
        if !self.mode.should_write() {
            return;
        }
        self.cache().set(operation, resource, body);
    }

    /// Drop every cached response belonging to a share
    pub fn invalidate_share(&self, share: &str) {
        let pattern = format!("/{}/", share);
        let removed = self.cache().invalidate_pattern(&pattern);
        debug!("Cache invalidation for share '{}': {} entries", share, removed);
    }
}

#[async_trait]
impl<C: ShareClient + Clone> ShareClient for CachedShareClient<C> {
    async fn list_shares(&self) -> Result<Vec<Share>, ShareError> {
        if let Some(cached_body) = self.try_cache_get("SHARES", "/", false) {
            match serde_json::from_slice::<Vec<Share>>(&cached_body) {
                Ok(shares) => {
                    debug!("Cache HIT for share list: {} shares", shares.len());
                    return Ok(shares);
                }
                Err(e) => {
                    debug!("Failed to parse cached share list: {}", e);
                }
            }
        }

        let shares = self.inner.list_shares().await?;

        if let Ok(json) = serde_json::to_vec(&shares) {
            self.cache_set("SHARES", "/", Bytes::from(json));
        }

        Ok(shares)
    }

    async fn list_entries(&self, share: &str, path: &str) -> Result<Vec<Entry>, ShareError> {
        let resource = format!("/{}/{}", share, path.trim_matches('/'));

        if let Some(cached_body) = self.try_cache_get("LIST", &resource, false) {
            match serde_json::from_slice::<Vec<Entry>>(&cached_body) {
                Ok(entries) => {
                    debug!("Cache HIT for {}: {} entries", resource, entries.len());
                    return Ok(entries);
                }
                Err(e) => {
                    debug!("Failed to parse cached listing for {}: {}", resource, e);
                }
            }
        }

        debug!("Cache MISS for listing {}", resource);
        let entries = self.inner.list_entries(share, path).await?;

        if let Ok(json) = serde_json::to_vec(&entries) {
            self.cache_set("LIST", &resource, Bytes::from(json));
        }

        Ok(entries)
    }

    async fn remote_length(
        &self,
        handle: &FileHandle,
        bypass_cache: bool,
    ) -> Result<u64, ShareError> {
        let resource = handle.cache_key();

        if let Some(cached_body) = self.try_cache_get("LEN", &resource, bypass_cache) {
            if let Ok(length) = serde_json::from_slice::<u64>(&cached_body) {
                debug!("Cache HIT for length of {}: {}", resource, length);
                return Ok(length);
            }
        }

        let length = self.inner.remote_length(handle, bypass_cache).await?;

        // Fresh values still refresh the cache for later non-bypassing readers
        if let Ok(json) = serde_json::to_vec(&length) {
            self.cache_set("LEN", &resource, Bytes::from(json));
        }

        Ok(length)
    }

    async fn fetch_range(
        &self,
        handle: &FileHandle,
        offset: u64,
        length: u64,
        bypass_cache: bool,
    ) -> Result<Bytes, ShareError> {
        let resource = format!("{}@{}+{}", handle.cache_key(), offset, length);

        if let Some(body) = self.try_cache_get("RANGE", &resource, bypass_cache) {
            debug!("Cache HIT for range {}", resource);
            return Ok(body);
        }

        let body = self
            .inner
            .fetch_range(handle, offset, length, bypass_cache)
            .await?;
        self.cache_set("RANGE", &resource, body.clone());

        Ok(body)
    }

    async fn fetch_whole(&self, handle: &FileHandle) -> Result<Bytes, ShareError> {
        let resource = handle.cache_key();

        if let Some(body) = self.try_cache_get("GET", &resource, false) {
            debug!("Cache HIT for {} ({} bytes)", resource, body.len());
            return Ok(body);
        }

        debug!("Cache MISS for {}", resource);
        let body = self.inner.fetch_whole(handle).await?;
        self.cache_set("GET", &resource, body.clone());

        Ok(body)
    }
}
