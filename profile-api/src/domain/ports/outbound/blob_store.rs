use std::path::Path;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::domain::{models::StoredBlob, BlobStoreError};

/// Content-addressed storage for avatar bytes.
///
/// Locations are derived from the content fingerprint, so `put` is idempotent:
/// storing the same bytes twice returns the same [`StoredBlob`] and writes once.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    async fn put(&self, bytes: &[u8]) -> Result<StoredBlob, BlobStoreError>;

    /// Fails with [`BlobStoreError::NotFound`] if nothing is stored at `path`.
    async fn get(&self, path: &Path) -> Result<Vec<u8>, BlobStoreError>;

    async fn exists(&self, path: &Path) -> bool;

    /// Returns `Ok(false)` when there was nothing to delete.
    async fn delete(&self, path: &Path) -> Result<bool, BlobStoreError>;

    /// The transport encoding handed to callers.
    fn encode_base64(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }
}
