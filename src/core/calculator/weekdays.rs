use crate::models::YearMonth;
use chrono::{Datelike, Weekday};

/// Number of Monday–Friday days in the month.
pub fn weekday_count(ym: YearMonth) -> u32 {
    ym.days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}
