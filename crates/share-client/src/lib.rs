//! File-share client with caching support
//!
//! This crate provides a trait-based client for a remote hierarchical file
//! store, with optional caching. Like any decorator, the caching layer wraps the
//! base client and can be composed without the caller noticing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               ShareClient trait                  │
//! │  - list_shares() / list_entries()                │
//! │  - remote_length() / fetch_range()               │
//! │  - fetch_whole()                                 │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌──────────────────┐         ┌─────────────────────┐
//! │ LocalShareClient │         │ CachedShareClient   │
//! │ (direct access)  │◄────────│ (decorator)         │
//! └──────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use share_client::{CacheMode, CachedShareClient, LocalShareClient, ResponseCache, ShareClient};
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() -> Result<(), share_client::ShareError> {
//! let cache = Arc::new(Mutex::new(ResponseCache::default()));
//! let client = CachedShareClient::new(
//!     LocalShareClient::new("/mnt/shares"),
//!     cache,
//!     CacheMode::ReadWrite,
//! );
//!
//! let shares = client.list_shares().await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cached_client;
pub mod client;
pub mod error;
pub mod local_client;
pub mod types;

pub use cache::{CacheStats, ResponseCache};
pub use cached_client::CachedShareClient;
pub use client::{CacheMode, ShareClient};
pub use error::ShareError;
pub use local_client::LocalShareClient;
pub use types::{join_path, parent_path, Entry, FileHandle, Share};

// Re-export bytes so consumers don't need to depend on it directly
pub use bytes::Bytes;
