//! In-memory share client for delta and session tests

use async_trait::async_trait;
use bytes::Bytes;
use share_client::{Entry, FileHandle, Share, ShareClient, ShareError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A single growable file that counts every remote call
#[derive(Clone, Default)]
pub(crate) struct MemoryClient {
    content: Arc<Mutex<Vec<u8>>>,
    length_calls: Arc<AtomicUsize>,
    range_calls: Arc<AtomicUsize>,
    last_range: Arc<Mutex<Option<(u64, u64)>>>,
    next_range_error: Arc<Mutex<Option<ShareError>>>,
    next_length_error: Arc<Mutex<Option<ShareError>>>,
}

impl MemoryClient {
    pub(crate) fn with_content(content: &[u8]) -> Self {
        let client = Self::default();
        client.content.lock().unwrap().extend_from_slice(content);
        client
    }

    pub(crate) fn append(&self, bytes: &[u8]) {
        self.content.lock().unwrap().extend_from_slice(bytes);
    }

    pub(crate) fn truncate(&self, length: usize) {
        self.content.lock().unwrap().truncate(length);
    }

    pub(crate) fn length_calls(&self) -> usize {
        self.length_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn range_calls(&self) -> usize {
        self.range_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_range(&self) -> Option<(u64, u64)> {
        *self.last_range.lock().unwrap()
    }

    pub(crate) fn fail_next_range(&self, error: ShareError) {
        *self.next_range_error.lock().unwrap() = Some(error);
    }

    pub(crate) fn fail_next_length(&self, error: ShareError) {
        *self.next_length_error.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl ShareClient for MemoryClient {
    async fn list_shares(&self) -> Result<Vec<Share>, ShareError> {
        Ok(vec![Share::new("logs")])
    }

    async fn list_entries(&self, _share: &str, _path: &str) -> Result<Vec<Entry>, ShareError> {
        let size = self.content.lock().unwrap().len() as u64;
        Ok(vec![Entry::file("app.log").with_size(size)])
    }

    async fn remote_length(
        &self,
        _handle: &FileHandle,
        _bypass_cache: bool,
    ) -> Result<u64, ShareError> {
        self.length_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.next_length_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.content.lock().unwrap().len() as u64)
    }

    async fn fetch_range(
        &self,
        _handle: &FileHandle,
        offset: u64,
        length: u64,
        _bypass_cache: bool,
    ) -> Result<Bytes, ShareError> {
        self.range_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock().unwrap() = Some((offset, length));
        if let Some(error) = self.next_range_error.lock().unwrap().take() {
            return Err(error);
        }

        let content = self.content.lock().unwrap();
        let actual = content.len() as u64;
        if offset + length > actual {
            return Err(ShareError::RangeInvalid {
                offset,
                length,
                actual,
            });
        }
        Ok(Bytes::copy_from_slice(
            &content[offset as usize..(offset + length) as usize],
        ))
    }

    async fn fetch_whole(&self, _handle: &FileHandle) -> Result<Bytes, ShareError> {
        Ok(Bytes::copy_from_slice(&self.content.lock().unwrap()))
    }
}
