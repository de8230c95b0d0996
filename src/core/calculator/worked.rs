use crate::db::store::BalanceStore;
use crate::errors::AppResult;
use crate::models::{EntryType, WorkShift, YearMonth};

/// Net worked minutes of a set of shifts, rounded once after summing.
///
/// A shift ending before it starts contributes zero.
pub fn sum_worked_minutes(shifts: &[WorkShift]) -> i64 {
    shifts
        .iter()
        .map(WorkShift::worked_minutes)
        .sum::<f64>()
        .round() as i64
}

/// Minutes actually worked by `user_id` in the month (work entries only).
///
/// No entries is a normal zero; a failed lookup is an error.
pub fn worked_minutes<S>(store: &S, user_id: &str, ym: YearMonth) -> AppResult<i64>
where
    S: BalanceStore + ?Sized,
{
    let range = ym.range();
    let entry_ids = store.entry_ids(user_id, EntryType::Work, &range)?;

    if entry_ids.is_empty() {
        tracing::debug!(user_id, month = %ym, "no work entries");
        return Ok(0);
    }

    let shifts = store.shifts_for_entries(&entry_ids)?;
    let total = sum_worked_minutes(&shifts);

    tracing::debug!(
        user_id,
        month = %ym,
        entries = entry_ids.len(),
        shifts = shifts.len(),
        worked = total,
        "worked minutes aggregated"
    );
    Ok(total)
}
