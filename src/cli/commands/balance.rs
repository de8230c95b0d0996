use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::balance::{BalanceEngine, NOT_AVAILABLE};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{UserBalances, YearMonth};
use crate::ui::messages::{header, warning};
use crate::utils::formatting::colored_balance;
use crate::utils::ids::validate_user_id;
use chrono::{Datelike, NaiveDate};

/// Print the balances of a user for a month.
///
/// A lookup failure is reported as an error, unlike an unconfigured user
/// which prints the "not available" notice.
pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Balance {
        user,
        year,
        month,
        json,
    } = cmd
    {
        let user_id = validate_user_id(user)?;
        let ym = YearMonth::new(
            year.unwrap_or_else(|| today.year()),
            month.unwrap_or_else(|| today.month()),
        )?;

        let pool = DbPool::new(&cfg.database)?;
        let balances = BalanceEngine::new(&pool)
            .with_today(today)
            .compute(user_id, ym)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&balances)?);
            return Ok(());
        }

        match balances {
            Some(b) => print_balances(user_id, ym, &b),
            None => warning(NOT_AVAILABLE),
        }
    }
    Ok(())
}

fn print_balances(user_id: &str, ym: YearMonth, b: &UserBalances) {
    header(format!("Balances {} ({})", ym, user_id));
    println!("Balance today   : {}", colored_balance(b.balance_today));
    println!("Month net       : {}", colored_balance(b.month_net));
    println!("Year net        : {}", colored_balance(b.year_net));
    println!("Opening balance : {}", colored_balance(b.opening_balance));
}
