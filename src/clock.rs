//! Wall clock arithmetic
//!
//! The firmware only knows the UTC time it was built at and the uptime
//! since boot. Local time is derived from both plus the configured offset.

use chrono::{DateTime, NaiveDateTime, Timelike};

/// Local time `elapsed_secs` after the UTC timestamp `epoch`.
///
/// Timestamps outside the range chrono can represent fall back to the Unix
/// epoch.
pub fn local_time(epoch: i64, elapsed_secs: u64, utc_offset_secs: i32) -> NaiveDateTime {
    let secs = i64::try_from(elapsed_secs)
        .ok()
        .and_then(|elapsed| epoch.checked_add(elapsed))
        .and_then(|utc| utc.checked_add(i64::from(utc_offset_secs)));
    secs.and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.naive_utc())
        .unwrap_or_default()
}

/// Seconds until the minute shown on the watchface changes (1..=60)
pub fn secs_until_next_minute(now: &NaiveDateTime) -> u64 {
    60 - u64::from(now.second().min(59))
}
