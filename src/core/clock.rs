use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for everything that needs the wall clock. The plan builder
/// never consults it.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Calendar date with the time of day stripped.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at_midnight(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
