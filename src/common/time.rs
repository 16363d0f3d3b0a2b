//! Time-related utilities with clock abstraction for testability.
//!
//! All timestamps are Unix milliseconds in UTC. Calendar-day comparisons and
//! display formatting are done in UTC as well, so they are deterministic
//! regardless of the host timezone.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_utc_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc_millis(&self) -> i64 {
        get_utc_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to a UTC datetime
pub fn millis_to_utc(timestamp_millis: i64) -> DateTime<Utc> {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    Utc.timestamp_opt(seconds, nanos).unwrap()
}

/// Check whether two timestamps fall on the same calendar day (UTC)
pub fn same_calendar_day(a_millis: i64, b_millis: i64) -> bool {
    let a = millis_to_utc(a_millis);
    let b = millis_to_utc(b_millis);
    a.year() == b.year() && a.ordinal() == b.ordinal()
}

/// Format a room-list preview timestamp relative to "now":
/// same calendar day yields time of day, otherwise a short date.
pub fn format_preview_timestamp(timestamp_millis: i64, now_millis: i64) -> String {
    let dt = millis_to_utc(timestamp_millis);
    if same_calendar_day(timestamp_millis, now_millis) {
        dt.format("%H:%M").to_string()
    } else {
        dt.format("%b %-d").to_string()
    }
}

/// Format the time-of-day stamp shown next to a message bubble
pub fn format_message_time(timestamp_millis: i64) -> String {
    millis_to_utc(timestamp_millis).format("%H:%M").to_string()
}

/// Format the heading of a calendar-day separator in the message thread
pub fn format_day_heading(timestamp_millis: i64) -> String {
    millis_to_utc(timestamp_millis)
        .format("%B %-d, %Y")
        .to_string()
}
