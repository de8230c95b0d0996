//! Schema migrations.
//!
//! Every migration is recorded in the `log` table as a `migration_applied`
//! row whose `target` is the migration version, so each one runs only once.

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists: it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_profiles",
        description: "Created profiles table (contract settings)",
        sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id                   TEXT PRIMARY KEY,
            full_time_hours      REAL,
            contract_percent     REAL,
            opening_flex_minutes INTEGER,
            tracking_start_date  TEXT,
            created_at           TEXT NOT NULL,
            updated_at           TEXT
        );
        "#,
    },
    Migration {
        version: "20250901_0002_create_entries_and_shifts",
        description: "Created entries and work_shifts tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS entries (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    TEXT NOT NULL,
            date       TEXT NOT NULL,
            type       TEXT NOT NULL DEFAULT 'work' CHECK(type IN ('work','travel')),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_user_type_date ON entries(user_id, type, date);

        CREATE TABLE IF NOT EXISTS work_shifts (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_id             INTEGER NOT NULL REFERENCES entries(id) ON DELETE CASCADE,
            start_time           TEXT NOT NULL,
            end_time             TEXT NOT NULL,
            unpaid_break_minutes INTEGER DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_work_shifts_entry ON work_shifts(entry_id);
        "#,
    },
    Migration {
        version: "20250901_0003_create_balance_adjustments",
        description: "Created balance_adjustments table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS balance_adjustments (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id        TEXT NOT NULL,
            effective_date TEXT NOT NULL,
            delta_minutes  INTEGER NOT NULL,
            note           TEXT,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_adjustments_user_date
            ON balance_adjustments(user_id, effective_date);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tracing::info!(version = m.version, "migration applied");
    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
///
/// Returns the number of migrations applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
