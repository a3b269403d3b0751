//! Filesystem-backed share client
//!
//! Direct implementation of the `ShareClient` trait over a local directory:
//! each sub-directory of the root is one share. Useful for mounted SMB/NFS
//! shares and for development. This client never caches; wrap it in
//! `CachedShareClient` to add caching behavior.

use crate::client::ShareClient;
use crate::error::ShareError;
use crate::types::{Entry, FileHandle, Share};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::debug;
use std::io::SeekFrom;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Direct share client over a local root directory
#[derive(Debug, Clone)]
pub struct LocalShareClient {
    root: Arc<PathBuf>,
}

impl LocalShareClient {
    /// Create a new client rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// Root directory holding the shares
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a share-relative path, refusing anything that escapes the share
    fn resolve(&self, share: &str, path: &str) -> Result<PathBuf, ShareError> {
        if share.is_empty() || share.contains(['/', '\\']) || share == ".." || share == "." {
            return Err(ShareError::Configuration(format!(
                "invalid share name '{}'",
                share
            )));
        }

        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ShareError::Configuration(format!(
                "path '{}' escapes share '{}'",
                path, share
            )));
        }

        Ok(self.root.join(share).join(relative))
    }

    fn file_path(&self, handle: &FileHandle) -> Result<PathBuf, ShareError> {
        self.resolve(&handle.share, &handle.path)
    }
}

fn map_io(err: std::io::Error, what: impl std::fmt::Display) -> ShareError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ShareError::NotFound(what.to_string())
    } else {
        ShareError::Io(err)
    }
}

fn modified_time(metadata: &std::fs::Metadata) -> Option<DateTime<Utc>> {
    metadata.modified().ok().map(DateTime::<Utc>::from)
}

#[async_trait]
impl ShareClient for LocalShareClient {
    async fn list_shares(&self) -> Result<Vec<Share>, ShareError> {
        debug!("Listing shares under {}", self.root.display());

        let mut dir = tokio::fs::read_dir(self.root.as_path())
            .await
            .map_err(|e| map_io(e, self.root.display()))?;

        let mut shares = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            if item.file_type().await?.is_dir() {
                shares.push(Share::new(item.file_name().to_string_lossy()));
            }
        }
        shares.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(shares)
    }

    async fn list_entries(&self, share: &str, path: &str) -> Result<Vec<Entry>, ShareError> {
        let dir_path = self.resolve(share, path)?;
        debug!("Listing {}:{}", share, path);

        let mut dir = tokio::fs::read_dir(&dir_path)
            .await
            .map_err(|e| map_io(e, format!("{}:{}", share, path)))?;

        let mut entries = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            let metadata = item.metadata().await?;
            let is_directory = metadata.is_dir();
            entries.push(Entry {
                name: item.file_name().to_string_lossy().into_owned(),
                is_directory,
                size: (!is_directory).then(|| metadata.len()),
                last_modified: modified_time(&metadata),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    async fn remote_length(
        &self,
        handle: &FileHandle,
        _bypass_cache: bool,
    ) -> Result<u64, ShareError> {
        let path = self.file_path(handle)?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| map_io(e, handle))?;
        Ok(metadata.len())
    }

    async fn fetch_range(
        &self,
        handle: &FileHandle,
        offset: u64,
        length: u64,
        _bypass_cache: bool,
    ) -> Result<Bytes, ShareError> {
        let path = self.file_path(handle)?;
        let mut file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| map_io(e, handle))?;

        let actual = file.metadata().await?.len();
        if offset.saturating_add(length) > actual {
            return Err(ShareError::RangeInvalid {
                offset,
                length,
                actual,
            });
        }

        debug!("Reading {} bytes at offset {} from {}", length, offset, handle);
        file.seek(SeekFrom::Start(offset)).await?;
        let mut buffer = vec![0u8; length as usize];
        file.read_exact(&mut buffer).await?;

        Ok(Bytes::from(buffer))
    }

    async fn fetch_whole(&self, handle: &FileHandle) -> Result<Bytes, ShareError> {
        let path = self.file_path(handle)?;
        let content = tokio::fs::read(&path)
            .await
            .map_err(|e| map_io(e, handle))?;
        Ok(Bytes::from(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, LocalShareClient) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("logs/archive")).unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("logs/app.log"), "line one\nline two\n").unwrap();
        fs::write(dir.path().join("logs/app.log.2024-01-01"), "old\n").unwrap();
        fs::write(dir.path().join("stray.txt"), "not a share").unwrap();
        let client = LocalShareClient::new(dir.path());
        (dir, client)
    }

    #[tokio::test]
    async fn test_list_shares_only_directories() {
        let (_dir, client) = fixture();
        let shares = client.list_shares().await.unwrap();
        let names: Vec<_> = shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["data", "logs"]);
    }

    #[tokio::test]
    async fn test_list_entries() {
        let (_dir, client) = fixture();
        let entries = client.list_entries("logs", "").await.unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["app.log", "app.log.2024-01-01", "archive"]);
        assert!(entries[2].is_directory);
        assert_eq!(entries[2].size, None);
        assert_eq!(entries[0].size, Some(18));
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_found() {
        let (_dir, client) = fixture();
        let err = client.list_entries("logs", "nope").await.unwrap_err();
        assert!(matches!(err, ShareError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_escaping_path_is_rejected() {
        let (_dir, client) = fixture();
        let err = client.list_entries("logs", "../data").await.unwrap_err();
        assert!(matches!(err, ShareError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_fetch_range_and_length() {
        let (_dir, client) = fixture();
        let handle = FileHandle::new("logs", "app.log");

        assert_eq!(client.remote_length(&handle, true).await.unwrap(), 18);
        let bytes = client.fetch_range(&handle, 9, 9, true).await.unwrap();
        assert_eq!(&bytes[..], b"line two\n");
    }

    #[tokio::test]
    async fn test_fetch_range_after_truncation() {
        let (dir, client) = fixture();
        let handle = FileHandle::new("logs", "app.log");
        fs::write(dir.path().join("logs/app.log"), "short\n").unwrap();

        let err = client.fetch_range(&handle, 9, 9, true).await.unwrap_err();
        assert!(err.is_range_invalid());
    }

    #[tokio::test]
    async fn test_fetch_whole() {
        let (_dir, client) = fixture();
        let handle = FileHandle::new("logs", "app.log.2024-01-01");
        assert_eq!(&client.fetch_whole(&handle).await.unwrap()[..], b"old\n");
    }
}
