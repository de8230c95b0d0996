//! Per-user JSON export bundle: contract, balances and raw data.

use crate::core::balance::BalanceEngine;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{count_entries, load_adjustments, load_entries_with_shifts, load_profile};
use crate::errors::{AppError, AppResult};
use crate::models::{BalanceAdjustment, ContractSettings, TimeEntry, UserBalances};
use crate::ui::messages::{info, success, warning};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExport {
    pub exported_at: String,
    pub user_id: String,
    pub contract: ContractSettings,
    /// `null` when balances are unavailable.
    pub balances: Option<UserBalances>,
    pub data: ExportData,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Serialize)]
pub struct ExportData {
    pub entries: Vec<TimeEntry>,
    pub adjustments: Vec<BalanceAdjustment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_entries: usize,
    pub total_adjustments: usize,
    pub date_range: ExportDateRange,
}

#[derive(Debug, Serialize)]
pub struct ExportDateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Check whether `path` may be written.
///
/// - file missing, or `force` → Ok
/// - file present and no `force` → ask the user for confirmation
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Assemble the bundle for `user_id`, balances as of `today`.
    pub fn build(
        pool: &DbPool,
        user_id: &str,
        today: NaiveDate,
        max_entries: usize,
    ) -> AppResult<UserExport> {
        let contract = load_profile(&pool.conn, user_id)?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        let count = count_entries(&pool.conn, user_id)?;
        if count > max_entries {
            return Err(AppError::ExportTooLarge {
                count,
                limit: max_entries,
            });
        }

        let entries = load_entries_with_shifts(&pool.conn, user_id)?;
        let adjustments = load_adjustments(&pool.conn, user_id, None)?;
        let balances = BalanceEngine::new(pool)
            .with_today(today)
            .calculate_user_balances(user_id, None, None);

        // entries are sorted newest first
        let date_range = ExportDateRange {
            earliest: entries.last().map(|e| e.date),
            latest: entries.first().map(|e| e.date),
        };

        Ok(UserExport {
            exported_at: Utc::now().to_rfc3339(),
            user_id: user_id.to_string(),
            contract,
            balances,
            metadata: ExportMetadata {
                total_entries: entries.len(),
                total_adjustments: adjustments.len(),
                date_range,
            },
            data: ExportData {
                entries,
                adjustments,
            },
        })
    }

    /// Build the bundle and write it as pretty JSON to `file`.
    pub fn export(
        pool: &DbPool,
        user_id: &str,
        file: &str,
        force: bool,
        today: NaiveDate,
        max_entries: usize,
    ) -> AppResult<UserExport> {
        let path = Path::new(file);
        let bundle = Self::build(pool, user_id, today, max_entries)?;

        ensure_writable(path, force)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&bundle)?)?;

        if let Err(e) = ttlog(&pool.conn, "export", user_id, &format!("Exported to {}", file)) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        success(format!("Export completed: {}", path.display()));
        Ok(bundle)
    }
}
