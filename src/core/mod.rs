pub mod clock;
pub mod error;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, TrackerError};
pub use types::{DayPlan, Passage, ProgressRecord, ProgressSet, ReadableUnit, Testament};
