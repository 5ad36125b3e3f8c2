//! Remote progress record: the client side of the sync API.

use crate::core::{ProgressRecord, Result, TrackerError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A single named record, replaced wholesale on every write.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn get(&self) -> Result<Option<ProgressRecord>>;
    async fn set(&self, record: &ProgressRecord) -> Result<()>;
    async fn delete(&self) -> Result<()>;
}

// ============================================================================
// HTTP client
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemoteStore {
    /// `base_url` is the server origin; requests go to `<base_url>/api/sync`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/sync", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn check_status(action: &str, status: reqwest::StatusCode) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(TrackerError::remote(format!(
                "Failed to {action} cloud progress: HTTP {status}"
            )))
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn get(&self) -> Result<Option<ProgressRecord>> {
        let response = self.client.get(&self.endpoint).send().await?;
        Self::check_status("load", response.status())?;

        let record = response.json::<ProgressRecord>().await?;
        Ok(Some(record))
    }

    async fn set(&self, record: &ProgressRecord) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;
        Self::check_status("save", response.status())
    }

    async fn delete(&self) -> Result<()> {
        let response = self.client.delete(&self.endpoint).send().await?;
        Self::check_status("delete", response.status())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-process remote that can be switched offline to simulate fetch failures.
#[derive(Debug)]
pub struct MemoryRemoteStore {
    record: RwLock<Option<ProgressRecord>>,
    available: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self {
            record: RwLock::new(None),
            available: AtomicBool::new(true),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn with_record(record: ProgressRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
            ..Self::new()
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Option<ProgressRecord> {
        self.record.read().await.clone()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TrackerError::remote("remote store is offline"))
        }
    }
}

impl Default for MemoryRemoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn get(&self) -> Result<Option<ProgressRecord>> {
        self.ensure_available()?;
        Ok(self.record.read().await.clone())
    }

    async fn set(&self, record: &ProgressRecord) -> Result<()> {
        self.ensure_available()?;
        *self.record.write().await = Some(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        self.ensure_available()?;
        *self.record.write().await = None;
        Ok(())
    }
}
