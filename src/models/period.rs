//! Calendar periods used by the balance engine.
//! Everything here works on naive calendar dates: no timezone is involved.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A validated `(year, month)` pair, month in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(AppError::InvalidDate(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // validated in `new`, so the first of the month always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_else(|| self.first_day())
    }

    /// Every calendar day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(move |d| d.month() == month)
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.first_day(), self.last_day())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Jan 1 – Dec 31 of `year`.
    pub fn year(year: i32) -> AppResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-01-01")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-12-31")))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Lower bound as stored in the database (`YYYY-MM-DD`).
    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Upper bound as stored in the database (`YYYY-MM-DD`).
    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
