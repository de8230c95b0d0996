use crate::cli::parser::{Commands, ShiftAction};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::EntryType;
use crate::utils::date::require_date;
use crate::utils::ids::validate_user_id;
use crate::utils::time::require_time;

/// Add a shift to a user's day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = cmd else {
        return Ok(());
    };

    match action {
        ShiftAction::Add {
            user,
            date,
            start,
            end,
            unpaid_break,
            kind,
        } => {
            let user_id = validate_user_id(user)?;
            let d = require_date(date)?;
            let start = require_time(start)?;
            let end = require_time(end)?;
            let entry_type =
                EntryType::from_code(kind).ok_or_else(|| AppError::InvalidEntryType(kind.clone()))?;

            let mut pool = DbPool::new(&cfg.database)?;
            AddLogic::add_shift(&mut pool, user_id, d, entry_type, start, end, *unpaid_break)?;
        }
    }

    Ok(())
}
