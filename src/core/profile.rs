use crate::core::balance::{BalanceEngine, NOT_AVAILABLE};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{count_adjustments, count_entries, load_profile, upsert_profile};
use crate::errors::{AppError, AppResult};
use crate::models::ContractSettings;
use crate::ui::messages::{header, success, warning};
use crate::utils::formatting::{colored_balance, mins2readable};
use chrono::NaiveDate;

/// Changes requested by `profile set`; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub full_time_hours: Option<f64>,
    pub contract_percent: Option<f64>,
    pub opening_flex_minutes: Option<i64>,
    pub tracking_start_date: Option<NaiveDate>,
    /// Unset the tracking start date (balances stop being computed).
    pub clear_tracking: bool,
}

impl ProfileUpdate {
    fn validate(&self) -> AppResult<()> {
        if let Some(h) = self.full_time_hours
            && !(0.0..=168.0).contains(&h)
        {
            return Err(AppError::InvalidContract(format!(
                "full-time hours must be within 0-168 (got {h})"
            )));
        }
        if let Some(p) = self.contract_percent
            && !(0.0..=100.0).contains(&p)
        {
            return Err(AppError::InvalidContract(format!(
                "contract percent must be within 0-100 (got {p})"
            )));
        }
        if self.clear_tracking && self.tracking_start_date.is_some() {
            return Err(AppError::InvalidContract(
                "cannot set and clear the tracking start date at once".into(),
            ));
        }
        Ok(())
    }

    fn apply_to(&self, mut c: ContractSettings) -> ContractSettings {
        if self.full_time_hours.is_some() {
            c.full_time_hours = self.full_time_hours;
        }
        if self.contract_percent.is_some() {
            c.contract_percent = self.contract_percent;
        }
        if self.opening_flex_minutes.is_some() {
            c.opening_flex_minutes = self.opening_flex_minutes;
        }
        if self.tracking_start_date.is_some() {
            c.tracking_start_date = self.tracking_start_date;
        }
        if self.clear_tracking {
            c.tracking_start_date = None;
        }
        c
    }
}

pub struct ProfileLogic;

impl ProfileLogic {
    /// Create the profile or merge `update` into the stored one.
    pub fn set(pool: &DbPool, user_id: &str, update: &ProfileUpdate) -> AppResult<ContractSettings> {
        update.validate()?;

        let current = load_profile(&pool.conn, user_id)?.unwrap_or_default();
        let merged = update.apply_to(current);
        upsert_profile(&pool.conn, user_id, &merged)?;

        if let Err(e) = ttlog(&pool.conn, "profile", user_id, &describe(&merged)) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        success(format!("Profile {} saved.", user_id));
        Ok(merged)
    }

    /// Contract, current balances and record counts of one user.
    pub fn show(pool: &DbPool, user_id: &str, today: NaiveDate) -> AppResult<ContractSettings> {
        let contract = load_profile(&pool.conn, user_id)?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        header(format!("Profile {}", user_id));
        println!(
            "Weekly hours      : {}h",
            contract.effective_full_time_hours()
        );
        println!(
            "Contract percent  : {}%",
            contract.effective_contract_percent()
        );
        println!(
            "Weekly target     : {} min",
            contract.weekly_target_minutes().round() as i64
        );
        println!(
            "Opening balance   : {}",
            mins2readable(contract.opening_flex(), true, false)
        );
        println!(
            "Tracking start    : {}",
            contract
                .tracking_start_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "not set".to_string())
        );

        println!(
            "Records           : {} entries, {} adjustments",
            count_entries(&pool.conn, user_id)?,
            count_adjustments(&pool.conn, user_id)?
        );

        let balances = BalanceEngine::new(pool)
            .with_today(today)
            .calculate_user_balances(user_id, None, None);

        match balances {
            Some(b) => {
                println!("Balance today     : {}", colored_balance(b.balance_today));
                println!("Month net         : {}", colored_balance(b.month_net));
                println!("Year net          : {}", colored_balance(b.year_net));
            }
            None => warning(NOT_AVAILABLE),
        }

        Ok(contract)
    }
}

fn describe(c: &ContractSettings) -> String {
    format!(
        "hours={:?} percent={:?} opening={:?} start={:?}",
        c.full_time_hours, c.contract_percent, c.opening_flex_minutes, c.tracking_start_date
    )
}
