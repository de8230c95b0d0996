pub mod adjustment;
pub mod balances;
pub mod contract;
pub mod entry;
pub mod entry_type;
pub mod period;
pub mod shift;

pub use adjustment::BalanceAdjustment;
pub use balances::UserBalances;
pub use contract::ContractSettings;
pub use entry::TimeEntry;
pub use entry_type::EntryType;
pub use period::{DateRange, YearMonth};
pub use shift::WorkShift;
