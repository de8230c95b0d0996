//! Data-access seam of the balance engine.
//!
//! The engine never talks to SQLite directly: it reads through
//! [`BalanceStore`], which the SQLite pool implements and tests replace
//! with an in-memory double.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{BalanceAdjustment, ContractSettings, DateRange, EntryType, WorkShift};

/// Read-only lookups needed to compute balances.
pub trait BalanceStore {
    /// Contract settings of the user, `None` when the profile does not exist.
    fn contract_settings(&self, user_id: &str) -> AppResult<Option<ContractSettings>>;

    /// Ids of the user's entries of `entry_type` dated within `range`.
    fn entry_ids(
        &self,
        user_id: &str,
        entry_type: EntryType,
        range: &DateRange,
    ) -> AppResult<Vec<i64>>;

    /// Every shift linked to one of `entry_ids`.
    fn shifts_for_entries(&self, entry_ids: &[i64]) -> AppResult<Vec<WorkShift>>;

    /// Adjustments of the user with an effective date within `range`.
    fn adjustments(&self, user_id: &str, range: &DateRange) -> AppResult<Vec<BalanceAdjustment>>;
}

fn lookup_failed(what: String, err: AppError) -> AppError {
    AppError::Lookup(format!("{what}: {err}"))
}

impl BalanceStore for DbPool {
    fn contract_settings(&self, user_id: &str) -> AppResult<Option<ContractSettings>> {
        queries::load_profile(&self.conn, user_id)
            .map_err(|e| lookup_failed(format!("profile {user_id}"), e))
    }

    fn entry_ids(
        &self,
        user_id: &str,
        entry_type: EntryType,
        range: &DateRange,
    ) -> AppResult<Vec<i64>> {
        queries::load_entry_ids(&self.conn, user_id, entry_type, range).map_err(|e| {
            lookup_failed(
                format!(
                    "{} entries of {user_id} in {}..{}",
                    entry_type.to_db_str(),
                    range.start_str(),
                    range.end_str()
                ),
                e,
            )
        })
    }

    fn shifts_for_entries(&self, entry_ids: &[i64]) -> AppResult<Vec<WorkShift>> {
        let shifts = queries::load_shifts_by_entries(&self.conn, entry_ids)
            .map_err(|e| lookup_failed(format!("shifts of {} entries", entry_ids.len()), e))?;
        Ok(shifts.into_iter().map(|(_, s)| s).collect())
    }

    fn adjustments(&self, user_id: &str, range: &DateRange) -> AppResult<Vec<BalanceAdjustment>> {
        queries::load_adjustments(&self.conn, user_id, Some(range))
            .map_err(|e| lookup_failed(format!("adjustments of {user_id}"), e))
    }
}
