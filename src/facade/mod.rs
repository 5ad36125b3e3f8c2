pub mod tracker;

pub use tracker::{LoadOutcome, ReadingTracker, ToggleOutcome};
