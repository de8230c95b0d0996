use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::ids::validate_user_id;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Export { user, file, force } = cmd {
        let user_id = validate_user_id(user)?;
        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&pool, user_id, file, *force, today, cfg.max_export_entries)?;
    }
    Ok(())
}
