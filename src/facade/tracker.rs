use crate::core::{Clock, DayPlan, Result};
use crate::plan::{ProgressSummary, ReadingPlan};
use crate::storage::{LocalStore, read_local_progress, write_local_progress};
use crate::sync::{ProgressSource, ProgressSync, SyncStatus, reconcile};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// What happened while loading progress at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub source: ProgressSource,
    pub remote_available: bool,
    /// `Some(saved)` when local progress was ahead and pushed to the remote.
    pub pushed: Option<bool>,
    pub completed: usize,
}

#[derive(Debug)]
pub struct ToggleOutcome {
    pub day: u32,
    pub completed: bool,
    /// Background remote write, `None` when the debounce suppressed it.
    pub remote_save: Option<JoinHandle<bool>>,
}

/// One user session: owns the plan and routes every completion change through
/// local and remote persistence.
pub struct ReadingTracker {
    plan: ReadingPlan,
    local: Arc<dyn LocalStore>,
    sync: ProgressSync,
}

impl ReadingTracker {
    pub fn new(plan: ReadingPlan, local: Arc<dyn LocalStore>, sync: ProgressSync) -> Self {
        Self { plan, local, sync }
    }

    pub fn plan(&self) -> &ReadingPlan {
        &self.plan
    }

    pub fn progress(&self) -> ProgressSummary {
        self.plan.progress()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync.status()
    }

    /// Reconciles remote and local progress and applies the winner to the plan.
    pub async fn load(&mut self) -> LoadOutcome {
        let remote = self.sync.load().await;
        let remote_available = remote.is_some();

        let local = read_local_progress(self.local.as_ref()).unwrap_or_else(|err| {
            warn!(error = %err, "local progress unreadable; treating it as empty");
            Default::default()
        });

        let reconciliation = reconcile(remote, local);
        info!(
            source = ?reconciliation.source,
            days = reconciliation.authoritative.len(),
            push = reconciliation.should_push_to_remote,
            "reconciled progress"
        );

        let pushed = if reconciliation.should_push_to_remote {
            Some(self.sync.save_now(&reconciliation.authoritative).await)
        } else {
            None
        };

        self.plan.apply_progress(&reconciliation.authoritative);

        LoadOutcome {
            source: reconciliation.source,
            remote_available,
            pushed,
            completed: reconciliation.authoritative.len(),
        }
    }

    /// Flips `day`, writes local progress immediately and starts a debounced
    /// remote write. Fails on a day outside the plan without touching state.
    /// If the local write fails the flip is undone before the error returns.
    pub fn toggle(&mut self, day: u32) -> Result<ToggleOutcome> {
        let completed = self.plan.toggle(day)?;
        let progress = self.plan.completed_set();

        if let Err(err) = write_local_progress(self.local.as_ref(), &progress) {
            self.plan.toggle(day)?;
            return Err(err);
        }
        let remote_save = self.sync.save(&progress, false)?;

        Ok(ToggleOutcome {
            day,
            completed,
            remote_save,
        })
    }

    /// Waits for the remote write started by a toggle, or forces one when the
    /// debounce suppressed it. For callers about to exit.
    pub async fn settle(&self, remote_save: Option<JoinHandle<bool>>) -> bool {
        match remote_save {
            Some(handle) => match handle.await {
                Ok(saved) => saved,
                Err(err) => {
                    error!(error = %err, "cloud save task failed");
                    false
                }
            },
            None => {
                debug!("flushing debounced cloud save");
                self.sync_now().await
            }
        }
    }

    /// Manual sync: forced remote write of the current completion set.
    pub async fn sync_now(&self) -> bool {
        self.sync.save_now(&self.plan.completed_set()).await
    }

    pub async fn clear_remote(&self) -> Result<()> {
        self.sync.clear_remote().await
    }

    pub fn today_reading(&self, clock: &dyn Clock) -> Option<&DayPlan> {
        self.plan.on_date(clock.today())
    }
}
