//! File-share data transfer objects
//!
//! These types represent what the remote store returns. They are kept
//! separate from the viewer's own models so this crate stays reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level container on the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Share name (e.g., "logs")
    pub name: String,

    /// Provisioned quota, if the backend reports one
    pub quota_bytes: Option<u64>,
}

impl Share {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quota_bytes: None,
        }
    }
}

/// One item of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// File or directory name (no path component)
    pub name: String,

    /// Whether this entry is a directory
    pub is_directory: bool,

    /// Size in bytes (files only, when known)
    pub size: Option<u64>,

    /// Last modification time, when known
    pub last_modified: Option<DateTime<Utc>>,
}

impl Entry {
    /// A file entry without metadata
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            size: None,
            last_modified: None,
        }
    }

    /// A directory entry
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            size: None,
            last_modified: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// Identifies a single remote file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileHandle {
    /// Share the file lives in
    pub share: String,

    /// Slash-separated path relative to the share root
    pub path: String,
}

impl FileHandle {
    pub fn new(share: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            share: share.into(),
            path: path.into(),
        }
    }

    /// File name (last path component)
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Key used for cache entries and log messages
    pub fn cache_key(&self) -> String {
        format!("/{}/{}", self.share, self.path.trim_start_matches('/'))
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.share, self.path)
    }
}

/// Join a directory path and a child name with a single slash
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Parent of a slash-separated path ("" for top level)
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}
