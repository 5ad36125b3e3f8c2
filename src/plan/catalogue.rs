//! The fixed New Testament catalogue and the default plan shape.

use crate::core::{ReadableUnit, Testament};
use chrono::NaiveDate;

/// Length of the default plan in days.
pub const DEFAULT_TOTAL_DAYS: u32 = 55;

/// Canonical New Testament order with chapter counts (260 chapters).
const NEW_TESTAMENT: [(&str, u32); 27] = [
    ("Matthew", 28),
    ("Mark", 16),
    ("Luke", 24),
    ("John", 21),
    ("Acts", 28),
    ("Romans", 16),
    ("1 Corinthians", 16),
    ("2 Corinthians", 13),
    ("Galatians", 6),
    ("Ephesians", 6),
    ("Philippians", 4),
    ("Colossians", 4),
    ("1 Thessalonians", 5),
    ("2 Thessalonians", 3),
    ("1 Timothy", 6),
    ("2 Timothy", 4),
    ("Titus", 3),
    ("Philemon", 1),
    ("Hebrews", 13),
    ("James", 5),
    ("1 Peter", 5),
    ("2 Peter", 3),
    ("1 John", 5),
    ("2 John", 1),
    ("3 John", 1),
    ("Jude", 1),
    ("Revelation", 22),
];

pub fn new_testament() -> Vec<ReadableUnit> {
    NEW_TESTAMENT
        .iter()
        .map(|&(name, chapter_count)| ReadableUnit {
            name: name.to_string(),
            chapter_count,
            testament: Testament::New,
        })
        .collect()
}

/// February 16, 2026.
pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2026, 2, 16) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};

pub fn total_chapters(catalogue: &[ReadableUnit]) -> u32 {
    catalogue.iter().map(|unit| unit.chapter_count).sum()
}
