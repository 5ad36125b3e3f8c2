//! Deterministic partition of a catalogue into per-day passages.
//!
//! Each day recomputes its chapter target from what is left:
//! `round(remaining_chapters / remaining_days)`, clamped to
//! `[MIN_CHAPTERS_PER_DAY, MAX_CHAPTERS_PER_DAY]`. The greedy recomputation
//! means the realized distribution is close to, but not exactly, an even split.
//! When the clamp caps every remaining day the tail of the catalogue stays
//! unscheduled.

use crate::core::{DayPlan, Passage, ReadableUnit, Result, TrackerError};
use chrono::{Days, NaiveDate};

use super::catalogue::total_chapters;

pub const MIN_CHAPTERS_PER_DAY: u32 = 1;
pub const MAX_CHAPTERS_PER_DAY: u32 = 8;

/// Position of the next unread chapter.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    unit: usize,
    chapter: u32,
}

/// Builds the plan with every day incomplete and none marked current.
pub fn build_plan(
    catalogue: &[ReadableUnit],
    total_days: u32,
    start_date: NaiveDate,
) -> Result<Vec<DayPlan>> {
    if total_days == 0 {
        return Err(TrackerError::InvalidDayCount(total_days));
    }
    if catalogue.is_empty() {
        return Err(TrackerError::InvalidCatalogue(
            "catalogue must contain at least one unit".to_string(),
        ));
    }
    if let Some(unit) = catalogue.iter().find(|unit| unit.chapter_count == 0) {
        return Err(TrackerError::InvalidCatalogue(format!(
            "unit '{}' has no chapters",
            unit.name
        )));
    }

    let total = total_chapters(catalogue);
    let mut cursor = Cursor { unit: 0, chapter: 1 };
    let mut assigned = 0u32;
    let mut passages_by_day = Vec::with_capacity(total_days as usize);

    for day in 1..=total_days {
        let remaining_days = total_days - day + 1;
        let remaining_chapters = total - assigned;
        let mut target = daily_target(remaining_chapters, remaining_days);
        let mut passages = Vec::new();

        while target > 0 {
            let Some(unit) = catalogue.get(cursor.unit) else {
                return Err(TrackerError::CatalogueExhausted { day });
            };

            let left_in_unit = unit.chapter_count - cursor.chapter + 1;
            if left_in_unit <= target {
                passages.push(Passage::new(&unit.name, cursor.chapter, unit.chapter_count));
                target -= left_in_unit;
                assigned += left_in_unit;
                cursor = Cursor {
                    unit: cursor.unit + 1,
                    chapter: 1,
                };
            } else {
                passages.push(Passage::new(
                    &unit.name,
                    cursor.chapter,
                    cursor.chapter + target - 1,
                ));
                cursor.chapter += target;
                assigned += target;
                target = 0;
            }
        }

        passages_by_day.push(passages);
    }

    assign_dates(passages_by_day, start_date)
}

/// `round(remaining_chapters / remaining_days)` with halves rounded up,
/// clamped to the per-day bounds.
pub fn daily_target(remaining_chapters: u32, remaining_days: u32) -> u32 {
    let chapters = u64::from(remaining_chapters);
    let days = u64::from(remaining_days.max(1));
    let rounded = (2 * chapters + days) / (2 * days);

    (rounded.min(u64::from(MAX_CHAPTERS_PER_DAY)) as u32).max(MIN_CHAPTERS_PER_DAY)
}

fn assign_dates(passages_by_day: Vec<Vec<Passage>>, start_date: NaiveDate) -> Result<Vec<DayPlan>> {
    let total_days = passages_by_day.len() as u32;

    passages_by_day
        .into_iter()
        .zip(1u32..)
        .map(|(passages, day)| {
            let date = start_date
                .checked_add_days(Days::new(u64::from(day - 1)))
                .ok_or(TrackerError::InvalidDayCount(total_days))?;

            Ok(DayPlan {
                day,
                passages,
                date,
                completed: false,
                is_current: false,
            })
        })
        .collect()
}
