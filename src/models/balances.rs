use serde::Serialize;

/// Computed flex balances for one user, in signed minutes.
///
/// Never persisted: recomputed from stored data on every request.
/// `balance_today` is defined as the month variance, not as a same-day value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserBalances {
    pub balance_today: i64,
    pub month_net: i64,
    pub year_net: i64,
    pub opening_balance: i64,
}
