//! Contract targets.
//!
//! A month's target spreads the weekly target over its weekdays assuming a
//! five-day week, whatever the user's actual work pattern.

use crate::core::calculator::weekdays::weekday_count;
use crate::models::YearMonth;

pub const WORKDAYS_PER_WEEK: f64 = 5.0;

/// `round(weekly * weekdays / 5)`, half away from zero.
pub fn monthly_target(ym: YearMonth, weekly_target_minutes: f64) -> i64 {
    (weekly_target_minutes * weekday_count(ym) as f64 / WORKDAYS_PER_WEEK).round() as i64
}
