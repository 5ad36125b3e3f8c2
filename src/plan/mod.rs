//! Reading plan: generation, completion state and the current-day rule.

pub mod builder;
pub mod catalogue;
pub mod current;
pub mod format;

pub use builder::{MAX_CHAPTERS_PER_DAY, MIN_CHAPTERS_PER_DAY, build_plan, daily_target};
pub use catalogue::{DEFAULT_START_DATE, DEFAULT_TOTAL_DAYS, new_testament, total_chapters};
pub use current::{apply_progress, mark_current};
pub use format::{CARD_SEPARATOR, TOOLTIP_SEPARATOR, format_passages, ordinal_suffix};

use crate::core::{DayPlan, ProgressSet, ReadableUnit, Result, TrackerError};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Completed/total counters shown by the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

/// An owned plan. The day structure is fixed at construction; only the
/// `completed` and `is_current` flags change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReadingPlan {
    days: Vec<DayPlan>,
}

impl ReadingPlan {
    pub fn new(catalogue: &[ReadableUnit], total_days: u32, start_date: NaiveDate) -> Result<Self> {
        let mut days = build_plan(catalogue, total_days, start_date)?;
        mark_current(&mut days);
        Ok(Self { days })
    }

    /// The 55-day New Testament plan starting 2026-02-16.
    pub fn new_testament() -> Result<Self> {
        Self::new(&new_testament(), DEFAULT_TOTAL_DAYS, DEFAULT_START_DATE)
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn current(&self) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.is_current)
    }

    /// The day scheduled on `date`, compared by calendar date only.
    pub fn on_date(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn scheduled_chapters(&self) -> u32 {
        self.days.iter().map(DayPlan::chapter_count).sum()
    }

    pub fn completed_set(&self) -> ProgressSet {
        self.days.iter().filter(|d| d.completed).map(|d| d.day).collect()
    }

    pub fn apply_progress(&mut self, progress: &ProgressSet) {
        let unknown = apply_progress(&mut self.days, progress);
        if unknown > 0 {
            debug!(unknown, "ignored completed days outside the plan");
        }
    }

    /// Flips completion of `day` and returns the new state.
    pub fn toggle(&mut self, day: u32) -> Result<bool> {
        let entry = self
            .days
            .iter_mut()
            .find(|d| d.day == day)
            .ok_or(TrackerError::UnknownDay(day))?;

        entry.completed = !entry.completed;
        let completed = entry.completed;
        mark_current(&mut self.days);
        Ok(completed)
    }

    pub fn progress(&self) -> ProgressSummary {
        let completed = self.days.iter().filter(|d| d.completed).count();
        let total = self.days.len();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        ProgressSummary {
            completed,
            total,
            percentage,
        }
    }
}
