//! Content-addressed avatar storage on the local filesystem.
//!
//! Blobs live flat in one directory as `{md5}.{extension}`. Identical bytes map
//! to the same file no matter which user they were fetched for.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt, sync::OnceCell};
use tracing::{debug, info};

use crate::domain::{models::StoredBlob, ports::outbound::BlobStore, BlobStoreError};

pub const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug)]
pub struct FsBlobStore {
    root: PathBuf,
    extension: String,
    initialized: OnceCell<()>,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            initialized: OnceCell::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fingerprint(bytes: &[u8]) -> String {
        format!("{:x}", md5::compute(bytes))
    }

    pub fn path_for(&self, fingerprint: &str) -> PathBuf {
        self.root.join(format!("{fingerprint}.{}", self.extension))
    }

    /// Creates the root directory the first time the store is written to.
    async fn ensure_root(&self) -> Result<(), BlobStoreError> {
        self.initialized
            .get_or_try_init(|| async {
                fs::create_dir_all(&self.root).await?;
                info!(root = %self.root.display(), "avatar store initialized");
                Ok::<_, BlobStoreError>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, bytes: &[u8]) -> Result<StoredBlob, BlobStoreError> {
        self.ensure_root().await?;

        let content_hash = Self::fingerprint(bytes);
        let path = self.path_for(&content_hash);

        if fs::try_exists(&path).await? {
            debug!(path = %path.display(), "blob already stored");
            return Ok(StoredBlob { content_hash, path });
        }

        // Write under a unique temporary name and rename into place, so readers
        // never see a partial file and concurrent writers of the same bytes agree.
        let temp_path = self.root.join(format!(
            ".{content_hash}.{}.{}.tmp",
            std::process::id(),
            temp_suffix()
        ));
        persist(&temp_path, &path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "blob written");
        Ok(StoredBlob { content_hash, path })
    }

    async fn get(&self, path: &Path) -> Result<Vec<u8>, BlobStoreError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn delete(&self, path: &Path) -> Result<bool, BlobStoreError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Writes `bytes` to `temp_path` and renames it to `path`. The temporary file
/// is removed on every failure.
async fn persist(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<(), BlobStoreError> {
    let written: std::io::Result<()> = async {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(temp_path, path).await
    }
    .await;

    if let Err(e) = written {
        let _ = fs::remove_file(temp_path).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_suffix() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}
