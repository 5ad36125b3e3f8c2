// ============================================================================
// Ephi Library
// ============================================================================

pub mod calendar;
pub mod config;
pub mod core;
pub mod facade;
pub mod plan;
pub mod reminder;
pub mod storage;
pub mod sync;
pub mod web;

// Re-export main types for convenience
pub use crate::core::{
    Clock, DayPlan, FixedClock, Passage, ProgressRecord, ProgressSet, ReadableUnit, Result,
    SystemClock, TrackerError,
};
pub use facade::{LoadOutcome, ReadingTracker, ToggleOutcome};
pub use plan::{ProgressSummary, ReadingPlan, build_plan, mark_current};
pub use sync::{ProgressSync, Reconciliation, reconcile};
