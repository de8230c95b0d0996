//! Running balance over a calendar year.

use crate::core::calculator::adjustments::adjustment_total;
use crate::core::calculator::target::monthly_target;
use crate::core::calculator::worked::worked_minutes;
use crate::db::store::BalanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::YearMonth;
use chrono::{Datelike, NaiveDate};

/// Last month of `year` that counts as elapsed on `today`.
///
/// The current year stops at the current month; any other year, past or
/// future, is summed in full.
pub fn last_month(year: i32, today: NaiveDate) -> u32 {
    if year == today.year() {
        today.month()
    } else {
        12
    }
}

/// `opening + Σ(actual - target) over months 1..=last_month + adjustments`.
///
/// Contract settings are read once; a user without a profile keeps the
/// opening balance. Months are fetched one after the other.
pub fn yearly_balance<S>(
    store: &S,
    user_id: &str,
    year: i32,
    opening_flex_minutes: i64,
    today: NaiveDate,
) -> AppResult<i64>
where
    S: BalanceStore + ?Sized,
{
    if year > today.year() {
        tracing::warn!(
            user_id,
            year,
            "yearly balance requested for a future year: all 12 months are summed"
        );
    }

    let Some(contract) = store.contract_settings(user_id)? else {
        return Ok(opening_flex_minutes);
    };
    let weekly = contract.weekly_target_minutes();

    let overflow = || AppError::BalanceOverflow(format!("yearly balance of {user_id} in {year}"));

    let mut yearly_variance = 0i64;
    for month in 1..=last_month(year, today) {
        let ym = YearMonth::new(year, month)?;
        let target = monthly_target(ym, weekly);
        let actual = worked_minutes(store, user_id, ym)?;
        yearly_variance = actual
            .checked_sub(target)
            .and_then(|v| yearly_variance.checked_add(v))
            .ok_or_else(overflow)?;
    }

    let adjustments = adjustment_total(store, user_id, year)?;

    opening_flex_minutes
        .checked_add(yearly_variance)
        .and_then(|v| v.checked_add(adjustments))
        .ok_or_else(overflow)
}
