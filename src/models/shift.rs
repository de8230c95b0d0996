use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One worked interval attached to a time entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkShift {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub unpaid_break_minutes: i64,
}

impl WorkShift {
    pub fn new(
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
        unpaid_break_minutes: i64,
    ) -> Self {
        Self {
            start_time,
            end_time,
            unpaid_break_minutes,
        }
    }

    /// Raw span between start and end, in (fractional) minutes.
    /// Negative when the shift ends before it starts.
    pub fn span_minutes(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 60_000.0
    }

    /// Span minus the unpaid break, never below zero.
    pub fn worked_minutes(&self) -> f64 {
        (self.span_minutes() - self.unpaid_break_minutes as f64).max(0.0)
    }
}
