//! Share client trait and cache mode definitions
//!
//! This module defines the core `ShareClient` trait that all client
//! implementations must satisfy, as well as the `CacheMode` enum for
//! controlling caching behavior.

use crate::error::ShareError;
use crate::types::{Entry, FileHandle, Share};
use async_trait::async_trait;
use bytes::Bytes;

/// Cache behavior mode for share clients
///
/// Controls how the client interacts with the cache layer.
/// This is set at client construction time; individual reads that must see
/// the live remote state pass `bypass_cache = true` instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// No caching - neither read nor write
    None,

    /// Write-only - skip cache reads, but write responses to cache
    /// Use for "force refresh" to get fresh data while populating cache
    WriteOnly,

    /// Read-only - read from cache, but don't update it
    #[allow(dead_code)]
    ReadOnly,

    /// Full caching - read from cache, write to cache
    #[default]
    ReadWrite,
}

impl CacheMode {
    /// Should we attempt to read from cache before hitting the remote?
    pub fn should_read(&self) -> bool {
        matches!(self, CacheMode::ReadOnly | CacheMode::ReadWrite)
    }

    /// Should we write responses to cache?
    pub fn should_write(&self) -> bool {
        matches!(self, CacheMode::WriteOnly | CacheMode::ReadWrite)
    }
}

/// Remote file-share client trait
///
/// Implementations can be direct (hitting the store) or decorated with
/// caching. All methods are I/O bound and may suspend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// between the browser and a tailing task.
#[async_trait]
pub trait ShareClient: Send + Sync {
    /// List the shares visible to this client
    async fn list_shares(&self) -> Result<Vec<Share>, ShareError>;

    /// Flat (non-recursive) listing of one directory level
    ///
    /// # Arguments
    ///
    /// * `share` - Share name
    /// * `path` - Directory path relative to the share root ("" for the root)
    async fn list_entries(&self, share: &str, path: &str) -> Result<Vec<Entry>, ShareError>;

    /// Current length of a remote file in bytes
    ///
    /// `bypass_cache` requests the live value from the store; any caching
    /// layer must not answer from memory when it is set.
    async fn remote_length(&self, handle: &FileHandle, bypass_cache: bool)
        -> Result<u64, ShareError>;

    /// Fetch `length` bytes starting at `offset`
    ///
    /// Fails with [`ShareError::RangeInvalid`] when the range no longer
    /// exists (the file shrank below `offset + length`).
    async fn fetch_range(
        &self,
        handle: &FileHandle,
        offset: u64,
        length: u64,
        bypass_cache: bool,
    ) -> Result<Bytes, ShareError>;

    /// Fetch the whole file
    async fn fetch_whole(&self, handle: &FileHandle) -> Result<Bytes, ShareError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_default() {
        assert_eq!(CacheMode::default(), CacheMode::ReadWrite);
    }

    #[test]
    fn test_cache_mode_should_read() {
        assert!(!CacheMode::None.should_read());
        assert!(!CacheMode::WriteOnly.should_read());
        assert!(CacheMode::ReadOnly.should_read());
        assert!(CacheMode::ReadWrite.should_read());
    }

    #[test]
    fn test_cache_mode_should_write() {
        assert!(!CacheMode::None.should_write());
        assert!(CacheMode::WriteOnly.should_write());
        assert!(!CacheMode::ReadOnly.should_write());
        assert!(CacheMode::ReadWrite.should_write());
    }
}
