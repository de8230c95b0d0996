use super::entry_type::EntryType;
use super::shift::WorkShift;
use chrono::NaiveDate;
use serde::Serialize;

/// A per-day time entry of one user (⇔ `entries` table), with its shifts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub work_shifts: Vec<WorkShift>,
}
