//! Keeping local and remote completion sets in step.

pub mod coordinator;
pub mod debounce;
pub mod reconcile;

pub use coordinator::{ProgressSync, SyncStatus};
pub use debounce::{DEFAULT_SAVE_INTERVAL, SaveDebounce};
pub use reconcile::{ProgressSource, Reconciliation, reconcile};
