//! Month grid for the calendar view.

use crate::plan::{ReadingPlan, TOOLTIP_SEPARATOR, format_passages};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// A calendar month, always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn prev(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            None => 31,
        }
    }

    /// e.g. "February 2026".
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub reading_day: Option<u32>,
    pub completed: bool,
    pub is_today: bool,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month: MonthCursor,
    /// Empty cells before the 1st in a Sunday-first week.
    pub leading_blanks: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthView {
    pub fn build(month: MonthCursor, plan: &ReadingPlan, today: NaiveDate) -> Self {
        let cells = month
            .first_day()
            .iter_days()
            .take(month.days_in_month() as usize)
            .map(|date| {
                let reading = plan.on_date(date);
                CalendarCell {
                    date,
                    day_of_month: date.day(),
                    reading_day: reading.map(|d| d.day),
                    completed: reading.is_some_and(|d| d.completed),
                    is_today: date == today,
                    tooltip: reading.map(|d| {
                        format!(
                            "Day {}: {}",
                            d.day,
                            format_passages(&d.passages, TOOLTIP_SEPARATOR)
                        )
                    }),
                }
            })
            .collect();

        Self {
            month,
            leading_blanks: month.first_day().weekday().num_days_from_sunday(),
            cells,
        }
    }

    pub fn cell(&self, day_of_month: u32) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.day_of_month == day_of_month)
    }
}
