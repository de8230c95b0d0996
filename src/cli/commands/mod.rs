pub mod adjust;
pub mod balance;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod profile;
pub mod shift;
