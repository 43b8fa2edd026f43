//! Study-day arithmetic.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// The current study day.
///
/// Before `daily_reset_hour` the learner is still on the previous day, so
/// late-night practice counts towards the day it started on.
pub fn study_day(daily_reset_hour: u32) -> NaiveDate {
    study_day_at(Local::now().naive_local(), daily_reset_hour)
}

/// Study day for a given local timestamp.
pub fn study_day_at(now: NaiveDateTime, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date()
    } else {
        now.date()
    }
}

/// Whole calendar days between `last_seen` and `today`, or `None` if never seen.
pub fn days_since(last_seen: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    last_seen.map(|seen| (today - seen).num_days().abs())
}

/// Format a date as YYYY-MM-DD.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
