use std::time::{Duration, Instant};

pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_millis(2000);

/// Minimum-interval gate for remote writes.
///
/// Only successful writes move the window; a failed write leaves the next
/// attempt free to go through.
#[derive(Debug, Clone)]
pub struct SaveDebounce {
    min_interval: Duration,
    last_success: Option<Instant>,
}

impl SaveDebounce {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_success: None,
        }
    }

    pub fn last_success(&self) -> Option<Instant> {
        self.last_success
    }

    /// Whether a write started at `now` may proceed. Forced writes always may.
    pub fn allows(&self, now: Instant, force: bool) -> bool {
        if force {
            return true;
        }
        match self.last_success {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        }
    }

    /// Records a successful write that was started at `started_at`.
    pub fn record_success(&mut self, started_at: Instant) {
        self.last_success = Some(match self.last_success {
            Some(last) if last > started_at => last,
            _ => started_at,
        });
    }
}

impl Default for SaveDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_INTERVAL)
    }
}
