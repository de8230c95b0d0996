use chrono::NaiveDate;
use serde::Serialize;

/// Manual correction of a user's yearly balance.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAdjustment {
    pub id: i64,
    pub user_id: String,
    pub effective_date: NaiveDate,
    pub delta_minutes: i64,
    pub note: Option<String>,
}
