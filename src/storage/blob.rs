//! Named-blob storage behind the sync API.

use crate::core::{Result, TrackerError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Pathname of the single progress blob.
pub const PROGRESS_BLOB: &str = "ephi-progress.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobInfo {
    pub pathname: String,
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, pathname: &str) -> Result<Option<Vec<u8>>>;
    /// Replaces the blob wholesale.
    async fn put(&self, pathname: &str, bytes: Vec<u8>) -> Result<BlobInfo>;
    /// Returns whether a blob was removed.
    async fn delete(&self, pathname: &str) -> Result<bool>;
}

fn validate_pathname(pathname: &str) -> Result<()> {
    let valid = !pathname.is_empty()
        && pathname != "."
        && pathname != ".."
        && !pathname.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(TrackerError::storage(format!("invalid blob pathname '{}'", pathname)))
    }
}

// ============================================================================
// Filesystem store
// ============================================================================

#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, pathname: &str) -> Result<PathBuf> {
        validate_pathname(pathname)?;
        Ok(self.root.join(pathname))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, pathname: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(pathname)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TrackerError::storage(format!(
                "Failed to read blob '{}': {}",
                path.display(),
                err
            ))),
        }
    }

    async fn put(&self, pathname: &str, bytes: Vec<u8>) -> Result<BlobInfo> {
        let path = self.path_for(pathname)?;
        atomic_write(&path, &bytes).await?;

        Ok(BlobInfo {
            pathname: pathname.to_string(),
            url: format!("file://{}", path.display()),
        })
    }

    async fn delete(&self, pathname: &str) -> Result<bool> {
        let path = self.path_for(pathname)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(TrackerError::storage(format!(
                "Failed to delete blob '{}': {}",
                path.display(),
                err
            ))),
        }
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|err| {
            TrackerError::storage(format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                err
            ))
        })?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await.map_err(|err| {
        TrackerError::storage(format!(
            "Failed to write temp file '{}': {}",
            tmp.display(),
            err
        ))
    })?;

    fs::rename(&tmp, path).await.map_err(|err| {
        TrackerError::storage(format!(
            "Failed to rename temp file '{}' -> '{}': {}",
            tmp.display(),
            path.display(),
            err
        ))
    })?;
    Ok(())
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, pathname: &str) -> Result<Option<Vec<u8>>> {
        validate_pathname(pathname)?;
        Ok(self.blobs.read().await.get(pathname).cloned())
    }

    async fn put(&self, pathname: &str, bytes: Vec<u8>) -> Result<BlobInfo> {
        validate_pathname(pathname)?;
        self.blobs.write().await.insert(pathname.to_string(), bytes);
        Ok(BlobInfo {
            pathname: pathname.to_string(),
            url: format!("memory://{pathname}"),
        })
    }

    async fn delete(&self, pathname: &str) -> Result<bool> {
        validate_pathname(pathname)?;
        Ok(self.blobs.write().await.remove(pathname).is_some())
    }
}
