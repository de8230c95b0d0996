pub mod add;
pub mod balance;
pub mod calculator;
pub mod export;
pub mod log;
pub mod profile;

pub use balance::{BalanceEngine, calculate_user_balances};
