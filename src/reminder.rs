//! Daily reading reminder timing. Delivery is left to the caller.

use chrono::{Days, NaiveDateTime, NaiveTime};
use std::time::Duration;

pub const DEFAULT_REMINDER_HOUR: u32 = 8;
pub const REMINDER_TITLE: &str = "Ephi - Daily Reading Reminder";
pub const REMINDER_BODY: &str = "Time for today's New Testament reading!";

/// Next reminder instant: today at `hour:00`, or tomorrow once that has passed.
/// Hours past 23 clamp to 23.
pub fn next_reminder(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date().and_time(at);

    if now > today {
        today
            .checked_add_days(Days::new(1))
            .unwrap_or(today)
    } else {
        today
    }
}

/// Time left until the next reminder.
pub fn until_next_reminder(now: NaiveDateTime, hour: u32) -> Duration {
    (next_reminder(now, hour) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}
