use super::{Result, TrackerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Testament {
    #[serde(rename = "NT")]
    New,
}

impl Testament {
    pub fn label(&self) -> &'static str {
        match self {
            Testament::New => "New Testament",
        }
    }
}

/// One book-like item of the catalogue. Order within the catalogue defines
/// the reading sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadableUnit {
    pub name: String,
    pub chapter_count: u32,
    pub testament: Testament,
}

impl ReadableUnit {
    pub fn new(name: impl Into<String>, chapter_count: u32) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TrackerError::InvalidCatalogue(
                "unit name must not be blank".to_string(),
            ));
        }
        if chapter_count == 0 {
            return Err(TrackerError::InvalidCatalogue(format!(
                "unit '{}' must have at least one chapter",
                name
            )));
        }

        Ok(Self {
            name,
            chapter_count,
            testament: Testament::New,
        })
    }
}

/// Contiguous chapter range within one unit. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    #[serde(rename = "book")]
    pub unit_name: String,
    pub start_chapter: u32,
    pub end_chapter: u32,
}

impl Passage {
    pub fn new(unit_name: impl Into<String>, start_chapter: u32, end_chapter: u32) -> Self {
        debug_assert!(start_chapter >= 1 && end_chapter >= start_chapter);
        Self {
            unit_name: unit_name.into(),
            start_chapter,
            end_chapter,
        }
    }

    pub fn chapter_count(&self) -> u32 {
        self.end_chapter - self.start_chapter + 1
    }

    /// Chapter range without the book name, e.g. `3` or `3-7`.
    pub fn chapter_label(&self) -> String {
        if self.start_chapter == self.end_chapter {
            self.start_chapter.to_string()
        } else {
            format!("{}-{}", self.start_chapter, self.end_chapter)
        }
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit_name, self.chapter_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based position in the plan.
    pub day: u32,
    pub passages: Vec<Passage>,
    pub date: NaiveDate,
    pub completed: bool,
    pub is_current: bool,
}

impl DayPlan {
    pub fn chapter_count(&self) -> u32 {
        self.passages.iter().map(Passage::chapter_count).sum()
    }
}

/// Set of completed day indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressSet(BTreeSet<u32>);

impl ProgressSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, day: u32) -> bool {
        self.0.contains(&day)
    }

    pub fn insert(&mut self, day: u32) -> bool {
        self.0.insert(day)
    }

    pub fn remove(&mut self, day: u32) -> bool {
        self.0.remove(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<u32> for ProgressSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[u32; N]> for ProgressSet {
    fn from(days: [u32; N]) -> Self {
        days.into_iter().collect()
    }
}

/// Wire shape of the remote blob: `{ "completedDays": [..] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed_days: Vec<u32>,
}

impl ProgressRecord {
    pub fn from_set(set: &ProgressSet) -> Self {
        Self {
            completed_days: set.to_vec(),
        }
    }

    pub fn to_set(&self) -> ProgressSet {
        self.completed_days.iter().copied().collect()
    }
}
