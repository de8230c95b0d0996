use crate::errors::{AppError, AppResult};
use crate::models::{
    BalanceAdjustment, ContractSettings, DateRange, EntryType, TimeEntry, WorkShift,
};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};
use std::collections::HashMap;

const DATE_FMT: &str = "%Y-%m-%d";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_date(idx: usize, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(s.to_string())))
}

fn parse_db_timestamp(idx: usize, s: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .map_err(|_| conversion_error(idx, AppError::InvalidTime(s.to_string())))
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

pub fn map_profile(row: &Row) -> Result<ContractSettings> {
    let start: Option<String> = row.get("tracking_start_date")?;
    let tracking_start_date = match start.as_deref() {
        Some(s) if !s.is_empty() => Some(parse_db_date(3, s)?),
        _ => None,
    };

    Ok(ContractSettings {
        full_time_hours: row.get("full_time_hours")?,
        contract_percent: row.get("contract_percent")?,
        opening_flex_minutes: row.get("opening_flex_minutes")?,
        tracking_start_date,
    })
}

pub fn load_profile(conn: &Connection, user_id: &str) -> AppResult<Option<ContractSettings>> {
    let profile = conn
        .prepare_cached(
            "SELECT full_time_hours, contract_percent, opening_flex_minutes, tracking_start_date
             FROM profiles WHERE id = ?1",
        )?
        .query_row([user_id], map_profile)
        .optional()?;
    Ok(profile)
}

/// Insert or replace the contract settings of `user_id`.
pub fn upsert_profile(conn: &Connection, user_id: &str, c: &ContractSettings) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO profiles (id, full_time_hours, contract_percent, opening_flex_minutes,
                               tracking_start_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
         ON CONFLICT(id) DO UPDATE SET
            full_time_hours      = excluded.full_time_hours,
            contract_percent     = excluded.contract_percent,
            opening_flex_minutes = excluded.opening_flex_minutes,
            tracking_start_date  = excluded.tracking_start_date,
            updated_at           = excluded.updated_at",
        params![
            user_id,
            c.full_time_hours,
            c.contract_percent,
            c.opening_flex_minutes,
            c.tracking_start_date.map(|d| d.format(DATE_FMT).to_string()),
            now,
        ],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entries & shifts
// ---------------------------------------------------------------------------

/// Id of the user's entry for `date`/`entry_type`, created when missing.
pub fn find_or_create_entry(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
    entry_type: EntryType,
) -> AppResult<i64> {
    let date_str = date.format(DATE_FMT).to_string();

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM entries WHERE user_id = ?1 AND date = ?2 AND type = ?3
             ORDER BY id ASC LIMIT 1",
            params![user_id, date_str, entry_type.to_db_str()],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO entries (user_id, date, type, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            user_id,
            date_str,
            entry_type.to_db_str(),
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_shift(conn: &Connection, entry_id: i64, shift: &WorkShift) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_shifts (entry_id, start_time, end_time, unpaid_break_minutes)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            entry_id,
            shift.start_time.to_rfc3339(),
            shift.end_time.to_rfc3339(),
            shift.unpaid_break_minutes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_entry_ids(
    conn: &Connection,
    user_id: &str,
    entry_type: EntryType,
    range: &DateRange,
) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id FROM entries
         WHERE user_id = ?1 AND type = ?2 AND date >= ?3 AND date <= ?4
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            user_id,
            entry_type.to_db_str(),
            range.start_str(),
            range.end_str()
        ],
        |row| row.get::<_, i64>(0),
    )?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn map_shift(row: &Row) -> Result<(i64, WorkShift)> {
    let entry_id: i64 = row.get("entry_id")?;
    let start: String = row.get("start_time")?;
    let end: String = row.get("end_time")?;
    let unpaid: Option<i64> = row.get("unpaid_break_minutes")?;

    Ok((
        entry_id,
        WorkShift::new(
            parse_db_timestamp(1, &start)?,
            parse_db_timestamp(2, &end)?,
            unpaid.unwrap_or(0),
        ),
    ))
}

/// Shifts linked to any of `entry_ids`, tagged with their entry id.
pub fn load_shifts_by_entries(
    conn: &Connection,
    entry_ids: &[i64],
) -> AppResult<Vec<(i64, WorkShift)>> {
    if entry_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; entry_ids.len()].join(",");
    let sql = format!(
        "SELECT entry_id, start_time, end_time, unpaid_break_minutes
         FROM work_shifts
         WHERE entry_id IN ({})
         ORDER BY entry_id ASC, start_time ASC",
        placeholders
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(entry_ids.iter()), map_shift)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn count_entries(conn: &Connection, user_id: &str) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

/// All entries of a user, newest date first, each with its shifts.
pub fn load_entries_with_shifts(conn: &Connection, user_id: &str) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, date, type FROM entries
         WHERE user_id = ?1
         ORDER BY date DESC, id DESC",
    )?;

    let rows = stmt.query_map([user_id], |row| {
        let date: String = row.get("date")?;
        let kind: String = row.get("type")?;
        let entry_type = EntryType::from_db_str(&kind)
            .ok_or_else(|| conversion_error(3, AppError::InvalidEntryType(kind.clone())))?;

        Ok(TimeEntry {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: parse_db_date(2, &date)?,
            entry_type,
            work_shifts: Vec::new(),
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }

    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    let mut by_entry: HashMap<i64, Vec<WorkShift>> = HashMap::new();
    for (entry_id, shift) in load_shifts_by_entries(conn, &ids)? {
        by_entry.entry(entry_id).or_default().push(shift);
    }

    for entry in &mut entries {
        entry.work_shifts = by_entry.remove(&entry.id).unwrap_or_default();
    }

    Ok(entries)
}

// ---------------------------------------------------------------------------
// Balance adjustments
// ---------------------------------------------------------------------------

pub fn insert_adjustment(
    conn: &Connection,
    user_id: &str,
    effective_date: NaiveDate,
    delta_minutes: i64,
    note: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO balance_adjustments (user_id, effective_date, delta_minutes, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            effective_date.format(DATE_FMT).to_string(),
            delta_minutes,
            note,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_adjustments(conn: &Connection, user_id: &str) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM balance_adjustments WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

fn map_adjustment(row: &Row) -> Result<BalanceAdjustment> {
    let date: String = row.get("effective_date")?;
    Ok(BalanceAdjustment {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        effective_date: parse_db_date(2, &date)?,
        delta_minutes: row.get::<_, Option<i64>>("delta_minutes")?.unwrap_or(0),
        note: row.get("note")?,
    })
}

/// Adjustments of `user_id` whose effective date lies in `range`.
/// With no range, every adjustment of the user, newest first.
pub fn load_adjustments(
    conn: &Connection,
    user_id: &str,
    range: Option<&DateRange>,
) -> AppResult<Vec<BalanceAdjustment>> {
    let mut out = Vec::new();

    match range {
        Some(r) => {
            let mut stmt = conn.prepare_cached(
                "SELECT id, user_id, effective_date, delta_minutes, note
                 FROM balance_adjustments
                 WHERE user_id = ?1 AND effective_date >= ?2 AND effective_date <= ?3
                 ORDER BY effective_date ASC, id ASC",
            )?;
            let rows = stmt.query_map(
                params![user_id, r.start_str(), r.end_str()],
                map_adjustment,
            )?;
            for row in rows {
                out.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare_cached(
                "SELECT id, user_id, effective_date, delta_minutes, note
                 FROM balance_adjustments
                 WHERE user_id = ?1
                 ORDER BY effective_date DESC, id DESC",
            )?;
            let rows = stmt.query_map([user_id], map_adjustment)?;
            for row in rows {
                out.push(row?);
            }
        }
    }

    Ok(out)
}
