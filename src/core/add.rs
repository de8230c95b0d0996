use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_or_create_entry, insert_adjustment, insert_shift, load_profile};
use crate::errors::{AppError, AppResult};
use crate::models::{EntryType, WorkShift};
use crate::ui::messages::{success, warning};
use crate::utils::formatting::mins2readable;
use crate::utils::time::local_timestamp;
use chrono::{NaiveDate, NaiveTime};

/// High-level business logic for the `shift add` and `adjust` commands.
pub struct AddLogic;

impl AddLogic {
    /// Record a shift on the user's entry for `date` (created if missing).
    ///
    /// Returns the new shift id. An `end` earlier than `start` is stored as
    /// given; balances count such a shift as zero minutes.
    pub fn add_shift(
        pool: &mut DbPool,
        user_id: &str,
        date: NaiveDate,
        entry_type: EntryType,
        start: NaiveTime,
        end: NaiveTime,
        unpaid_break: i64,
    ) -> AppResult<i64> {
        if unpaid_break < 0 {
            return Err(AppError::InvalidTime(format!(
                "unpaid break must be >= 0 minutes (got {unpaid_break})"
            )));
        }

        if load_profile(&pool.conn, user_id)?.is_none() {
            return Err(AppError::UserNotFound(user_id.to_string()));
        }

        let shift = WorkShift::new(
            local_timestamp(date, start)?,
            local_timestamp(date, end)?,
            unpaid_break,
        );

        if shift.worked_minutes() == 0.0 {
            warning(format!(
                "Shift {} → {} on {} counts as 0 worked minutes.",
                start.format("%H:%M"),
                end.format("%H:%M"),
                date
            ));
        }

        let tx = pool.conn.transaction()?;
        let entry_id = find_or_create_entry(&tx, user_id, date, entry_type)?;
        let shift_id = insert_shift(&tx, entry_id, &shift)?;
        tx.commit()?;

        if let Err(e) = ttlog(
            &pool.conn,
            "shift",
            user_id,
            &format!(
                "{} {} {}-{} break={}",
                entry_type.to_db_str(),
                date,
                start.format("%H:%M"),
                end.format("%H:%M"),
                unpaid_break
            ),
        ) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        success(format!(
            "Added {} shift on {} ({} → {}, {} worked).",
            entry_type.to_db_str(),
            date,
            start.format("%H:%M"),
            end.format("%H:%M"),
            mins2readable(shift.worked_minutes().round() as i64, false, true)
        ));

        Ok(shift_id)
    }

    /// Record a manual balance correction.
    pub fn add_adjustment(
        pool: &DbPool,
        user_id: &str,
        effective_date: NaiveDate,
        delta_minutes: i64,
        note: Option<&str>,
    ) -> AppResult<i64> {
        if load_profile(&pool.conn, user_id)?.is_none() {
            return Err(AppError::UserNotFound(user_id.to_string()));
        }

        let id = insert_adjustment(&pool.conn, user_id, effective_date, delta_minutes, note)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "adjust",
            user_id,
            &format!("{} delta={}", effective_date, delta_minutes),
        ) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        success(format!(
            "Adjustment of {} recorded on {}.",
            mins2readable(delta_minutes, true, false),
            effective_date
        ));

        Ok(id)
    }
}
