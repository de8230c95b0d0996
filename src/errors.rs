//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// A balance lookup could not be served by the backing store.
    #[error("Store lookup failed: {0}")]
    Lookup(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid user ID format: {0}")]
    InvalidUserId(String),

    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),

    #[error("Invalid contract setting: {0}")]
    InvalidContract(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// A minute total does not fit in an `i64`.
    #[error("Balance out of range: {0}")]
    BalanceOverflow(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration format error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("User data too large for export ({count} entries, limit {limit})")]
    ExportTooLarge { count: usize, limit: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
