use crate::core::{ProgressRecord, ProgressSet, Result};
use crate::storage::RemoteStore;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::debounce::SaveDebounce;

/// Outcome of the most recent remote write, for the sync indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Idle,
    Synced,
    Failed,
}

/// Owns the remote store handle and the save debounce.
///
/// Remote writes are best-effort: failures are logged and reflected in
/// [`SyncStatus`], never propagated into plan state.
#[derive(Clone)]
pub struct ProgressSync {
    remote: Arc<dyn RemoteStore>,
    debounce: Arc<Mutex<SaveDebounce>>,
    status: Arc<Mutex<SyncStatus>>,
}

impl ProgressSync {
    pub fn new(remote: Arc<dyn RemoteStore>, min_interval: Duration) -> Self {
        Self {
            remote,
            debounce: Arc::new(Mutex::new(SaveDebounce::new(min_interval))),
            status: Arc::new(Mutex::new(SyncStatus::Idle)),
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
            .lock()
            .map(|status| *status)
            .unwrap_or(SyncStatus::Failed)
    }

    /// Fetches the remote set. `None` means the remote could not be read; a
    /// missing record is an empty set.
    pub async fn load(&self) -> Option<ProgressSet> {
        match self.remote.get().await {
            Ok(Some(record)) => {
                info!(days = record.completed_days.len(), "loaded progress from cloud");
                Some(record.to_set())
            }
            Ok(None) => {
                info!("no cloud progress stored yet");
                Some(ProgressSet::new())
            }
            Err(err) => {
                warn!(error = %err, "cloud load failed");
                None
            }
        }
    }

    /// Starts a background write unless the debounce window suppresses it.
    ///
    /// Must be called from within a Tokio runtime. The returned handle may be
    /// dropped; the write still runs to completion.
    pub fn save(&self, progress: &ProgressSet, force: bool) -> Result<Option<JoinHandle<bool>>> {
        let started_at = Instant::now();
        if !self.debounce.lock()?.allows(started_at, force) {
            debug!("debouncing cloud save");
            return Ok(None);
        }

        let this = self.clone();
        let record = ProgressRecord::from_set(progress);
        Ok(Some(tokio::spawn(async move {
            this.push(record, started_at).await
        })))
    }

    /// Forced write, awaited by the caller.
    pub async fn save_now(&self, progress: &ProgressSet) -> bool {
        self.push(ProgressRecord::from_set(progress), Instant::now())
            .await
    }

    pub async fn clear_remote(&self) -> Result<()> {
        self.remote.delete().await?;
        info!("cleared cloud progress");
        Ok(())
    }

    async fn push(&self, record: ProgressRecord, started_at: Instant) -> bool {
        let saved = match self.remote.set(&record).await {
            Ok(()) => {
                if let Ok(mut debounce) = self.debounce.lock() {
                    debounce.record_success(started_at);
                }
                info!(days = record.completed_days.len(), "saved progress to cloud");
                true
            }
            Err(err) => {
                warn!(error = %err, "cloud save failed");
                false
            }
        };

        if let Ok(mut status) = self.status.lock() {
            *status = if saved {
                SyncStatus::Synced
            } else {
                SyncStatus::Failed
            };
        }
        saved
    }
}
