use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::require_date;
use crate::utils::ids::validate_user_id;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Adjust {
        user,
        date,
        delta,
        note,
    } = cmd
    {
        let user_id = validate_user_id(user)?;
        let d = require_date(date)?;

        let pool = DbPool::new(&cfg.database)?;
        AddLogic::add_adjustment(&pool, user_id, d, *delta, note.as_deref())?;
    }
    Ok(())
}
