use crate::cli::parser::{Commands, ProfileAction};
use crate::config::Config;
use crate::core::profile::{ProfileLogic, ProfileUpdate};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::parse_optional_date;
use crate::utils::ids::validate_user_id;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };

    match action {
        ProfileAction::Set {
            user,
            hours,
            percent,
            opening,
            start,
            no_tracking,
        } => {
            let user_id = validate_user_id(user)?;
            let update = ProfileUpdate {
                full_time_hours: *hours,
                contract_percent: *percent,
                opening_flex_minutes: *opening,
                tracking_start_date: parse_optional_date(start.as_ref())?,
                clear_tracking: *no_tracking,
            };

            let pool = DbPool::new(&cfg.database)?;
            ProfileLogic::set(&pool, user_id, &update)?;
        }
        ProfileAction::Show { user } => {
            let user_id = validate_user_id(user)?;
            let pool = DbPool::new(&cfg.database)?;
            ProfileLogic::show(&pool, user_id, today)?;
        }
    }

    Ok(())
}
