// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting and log deadlines.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Hour of the day after a log date until which it can still be submitted.
pub const PREVIOUS_DAY_CUTOFF_HOUR: u32 = 18;

/// Format a date the way the API expects it in query strings.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// "YYYY-MM" key used by the monthly endpoints.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Last moment the log for `log_date` is accepted: 6 PM the next day.
pub fn previous_day_deadline(log_date: NaiveDate) -> NaiveDateTime {
    let cutoff = NaiveTime::from_hms_opt(PREVIOUS_DAY_CUTOFF_HOUR, 0, 0).unwrap_or_default();
    (log_date + Duration::days(1)).and_time(cutoff)
}

/// Whether a past day can still be logged at local time `now`.
///
/// Advisory only; the backend makes the final call.
pub fn can_submit_previous_day(log_date: NaiveDate, now: NaiveDateTime) -> bool {
    log_date < now.date() && now <= previous_day_deadline(log_date)
}
