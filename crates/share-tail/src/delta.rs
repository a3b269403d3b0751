//! Delta fetching
//!
//! Fetches only the bytes appended to a remote file since the last observed
//! length. Every remote call here bypasses client caches: a memoized length
//! would make a growing file look idle forever.

use bytes::Bytes;
use log::{debug, warn};
use share_client::{FileHandle, ShareClient, ShareError};

/// Result of one delta fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    /// Newly appended bytes, in file order
    pub new_bytes: Bytes,
    /// Length to use as the next baseline
    pub new_length: u64,
    /// The previous baseline was abandoned (file truncated or rotated)
    pub resynced: bool,
}

impl Delta {
    fn unchanged(length: u64) -> Self {
        Self {
            new_bytes: Bytes::new(),
            new_length: length,
            resynced: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_bytes.is_empty()
    }
}

/// Fetch the bytes appended after `observed_length`
///
/// - No growth (`current <= observed_length`): empty delta, length unchanged,
///   no content request.
/// - Growth: exactly `[observed_length, current)` is requested.
/// - Range no longer valid: the length is queried again and becomes the new
///   baseline; bytes lost to the truncation are not recovered.
/// - Any other failure is returned as-is; retry scheduling is up to the caller.
pub async fn fetch_delta(
    client: &dyn ShareClient,
    handle: &FileHandle,
    observed_length: u64,
) -> Result<Delta, ShareError> {
    let current = client.remote_length(handle, true).await?;
    if current <= observed_length {
        return Ok(Delta::unchanged(observed_length));
    }

    let length = current - observed_length;
    debug!(
        "{} grew from {} to {} bytes, fetching {} bytes",
        handle, observed_length, current, length
    );

    match client
        .fetch_range(handle, observed_length, length, true)
        .await
    {
        Ok(new_bytes) => Ok(Delta {
            new_bytes,
            new_length: current,
            resynced: false,
        }),
        Err(e) if e.is_range_invalid() => {
            let baseline = client.remote_length(handle, true).await?;
            warn!(
                "Range [{}, {}) of {} is gone ({}), resyncing at {} bytes",
                observed_length, current, handle, e, baseline
            );
            Ok(Delta {
                new_bytes: Bytes::new(),
                new_length: baseline,
                resynced: true,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryClient;
    use pretty_assertions::assert_eq;
    use share_client::{CacheMode, CachedShareClient, ResponseCache};
    use std::sync::{Arc, Mutex};

    fn handle() -> FileHandle {
        FileHandle::new("logs", "app.log")
    }

    #[tokio::test]
    async fn test_no_growth_is_idempotent() {
        let client = MemoryClient::with_content(b"hello\n");

        for _ in 0..2 {
            let delta = fetch_delta(&client, &handle(), 6).await.unwrap();
            assert_eq!(delta, Delta::unchanged(6));
        }
        assert_eq!(client.range_calls(), 0);
        assert_eq!(client.length_calls(), 2);
    }

    #[tokio::test]
    async fn test_shrunk_file_keeps_baseline() {
        let client = MemoryClient::with_content(b"hi\n");
        let delta = fetch_delta(&client, &handle(), 100).await.unwrap();
        assert_eq!(delta.new_length, 100);
        assert!(delta.is_empty());
        assert_eq!(client.range_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetches_exact_range() {
        let client = MemoryClient::with_content(b"first\n");
        client.append(b"second\nthird\n");

        let delta = fetch_delta(&client, &handle(), 6).await.unwrap();
        assert_eq!(&delta.new_bytes[..], b"second\nthird\n");
        assert_eq!(delta.new_length, 19);
        assert!(!delta.resynced);
        assert_eq!(client.last_range(), Some((6, 13)));
    }

    #[tokio::test]
    async fn test_range_invalid_resyncs() {
        let client = MemoryClient::with_content(b"0123456789");
        client.fail_next_range(ShareError::RangeInvalid {
            offset: 4,
            length: 6,
            actual: 3,
        });

        let delta = fetch_delta(&client, &handle(), 4).await.unwrap();
        assert!(delta.resynced);
        assert!(delta.is_empty());
        assert_eq!(delta.new_length, 10);
    }

    #[tokio::test]
    async fn test_message_only_range_error_resyncs() {
        let client = MemoryClient::with_content(b"0123456789");
        client.fail_next_range(ShareError::transient("416 Range Not Satisfiable"));

        let delta = fetch_delta(&client, &handle(), 2).await.unwrap();
        assert!(delta.resynced);
    }

    #[tokio::test]
    async fn test_other_errors_surface() {
        let client = MemoryClient::with_content(b"0123456789");
        client.fail_next_range(ShareError::transient("connection reset"));

        let err = fetch_delta(&client, &handle(), 2).await.unwrap_err();
        assert!(!err.is_range_invalid());
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn test_monotonic_without_resync() {
        let client = MemoryClient::with_content(b"");
        let mut observed = 0;
        let chunks: [&[u8]; 5] = [b"a\n", b"", b"bb\n", b"", b"ccc\n"];
        for chunk in chunks {
            client.append(chunk);
            let delta = fetch_delta(&client, &handle(), observed).await.unwrap();
            assert!(delta.new_length >= observed);
            observed = delta.new_length;
        }
        assert_eq!(observed, 9);
    }

    #[tokio::test]
    async fn test_cached_client_length_is_bypassed() {
        let memory = MemoryClient::with_content(b"one\n");
        let cache = Arc::new(Mutex::new(ResponseCache::default()));
        let client = CachedShareClient::new(memory.clone(), cache, CacheMode::ReadWrite);

        // Prime the cache with the old length
        assert_eq!(client.remote_length(&handle(), false).await.unwrap(), 4);
        memory.append(b"two\n");

        let delta = fetch_delta(&client, &handle(), 4).await.unwrap();
        assert_eq!(&delta.new_bytes[..], b"two\n");
        assert_eq!(delta.new_length, 8);
    }
}
