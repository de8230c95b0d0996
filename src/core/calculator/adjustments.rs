use crate::db::store::BalanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::DateRange;

/// Sum of the manual adjustments effective in `year` (Jan 1 – Dec 31).
pub fn adjustment_total<S>(store: &S, user_id: &str, year: i32) -> AppResult<i64>
where
    S: BalanceStore + ?Sized,
{
    let range = DateRange::year(year)?;
    let total = store
        .adjustments(user_id, &range)?
        .iter()
        .try_fold(0i64, |acc, a| acc.checked_add(a.delta_minutes))
        .ok_or_else(|| AppError::BalanceOverflow(format!("adjustments of {user_id} in {year}")))?;

    tracing::debug!(user_id, year, total, "adjustments summed");
    Ok(total)
}
