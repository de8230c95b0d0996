//! Time utilities: parsing HH:MM and building shift timestamps.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn require_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// `date` at wall-clock `time` in the local timezone, with its offset.
///
/// A time that does not exist locally (DST gap) is rejected; an ambiguous
/// one resolves to the earlier instant.
pub fn local_timestamp(date: NaiveDate, time: NaiveTime) -> AppResult<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| AppError::InvalidTime(format!("{} {} (not a local time)", date, time)))
}
