use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_FULL_TIME_HOURS: f64 = 40.0;
pub const DEFAULT_CONTRACT_PERCENT: f64 = 100.0;

/// Contract settings stored on the user profile.
///
/// Numeric fields are nullable in storage. A missing or zero value for
/// hours or percent falls back to the full-time default.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractSettings {
    pub full_time_hours: Option<f64>,
    pub contract_percent: Option<f64>,
    pub opening_flex_minutes: Option<i64>,
    pub tracking_start_date: Option<NaiveDate>,
}

impl ContractSettings {
    pub fn effective_full_time_hours(&self) -> f64 {
        match self.full_time_hours {
            Some(h) if h != 0.0 => h,
            _ => DEFAULT_FULL_TIME_HOURS,
        }
    }

    pub fn effective_contract_percent(&self) -> f64 {
        match self.contract_percent {
            Some(p) if p != 0.0 => p,
            _ => DEFAULT_CONTRACT_PERCENT,
        }
    }

    /// `full_time_hours * 60 * contract_percent / 100`
    pub fn weekly_target_minutes(&self) -> f64 {
        self.effective_full_time_hours() * 60.0 * (self.effective_contract_percent() / 100.0)
    }

    pub fn opening_flex(&self) -> i64 {
        self.opening_flex_minutes.unwrap_or(0)
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking_start_date.is_some()
    }
}
