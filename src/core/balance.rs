//! Balance façade: month variance, yearly running balance and opening
//! balance of one user, recomputed from stored data on every call.

use crate::core::calculator::target::monthly_target;
use crate::core::calculator::worked::worked_minutes;
use crate::core::calculator::yearly::yearly_balance;
use crate::db::store::BalanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::{UserBalances, YearMonth};
use crate::utils::date;
use chrono::{Datelike, NaiveDate};

/// Shown wherever balances are requested for a user without a result.
pub const NOT_AVAILABLE: &str = "Balance calculation not available (tracking not configured)";

pub struct BalanceEngine<'a, S: BalanceStore + ?Sized> {
    store: &'a S,
    today: NaiveDate,
}

impl<'a, S: BalanceStore + ?Sized> BalanceEngine<'a, S> {
    /// Engine reading from `store`, with "today" taken from the local clock.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            today: date::today(),
        }
    }

    /// Pin the reference date used for defaults and for the yearly cut-off.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Balances of `user_id` for `ym`.
    ///
    /// `Ok(None)` when the user has no profile or tracking has not started;
    /// `Err` when any lookup fails. Nothing partial is ever returned.
    pub fn compute(&self, user_id: &str, ym: YearMonth) -> AppResult<Option<UserBalances>> {
        let Some(contract) = self.store.contract_settings(user_id)? else {
            tracing::debug!(user_id, "no profile: balances not computed");
            return Ok(None);
        };

        if !contract.is_tracking() {
            tracing::debug!(user_id, "tracking start date not set: balances not computed");
            return Ok(None);
        }

        let weekly = contract.weekly_target_minutes();
        let target = monthly_target(ym, weekly);
        let actual = worked_minutes(self.store, user_id, ym)?;
        let month_net = actual
            .checked_sub(target)
            .ok_or_else(|| AppError::BalanceOverflow(format!("month {ym} of {user_id}")))?;

        // the requested month is part of the yearly loop as well
        let opening = contract.opening_flex();
        let year_net = yearly_balance(self.store, user_id, ym.year(), opening, self.today)?;

        tracing::debug!(user_id, month = %ym, month_net, year_net, "balances computed");

        Ok(Some(UserBalances {
            balance_today: month_net,
            month_net,
            year_net,
            opening_balance: opening,
        }))
    }

    /// Balances for `year`/`month` (default: current year and month).
    ///
    /// Failures are logged and reported as `None`, the same as a user whose
    /// tracking is not configured. Use [`BalanceEngine::compute`] to tell the
    /// two apart.
    pub fn calculate_user_balances(
        &self,
        user_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Option<UserBalances> {
        let year = year.unwrap_or_else(|| self.today.year());
        let month = month.unwrap_or_else(|| self.today.month());

        match YearMonth::new(year, month).and_then(|ym| self.compute(user_id, ym)) {
            Ok(balances) => balances,
            Err(e) => {
                tracing::error!(user_id, year, month, error = %e, "error calculating balances");
                None
            }
        }
    }
}

/// Shorthand for `BalanceEngine::new(store).calculate_user_balances(..)`.
pub fn calculate_user_balances<S>(
    store: &S,
    user_id: &str,
    year: Option<i32>,
    month: Option<u32>,
) -> Option<UserBalances>
where
    S: BalanceStore + ?Sized,
{
    BalanceEngine::new(store).calculate_user_balances(user_id, year, month)
}
