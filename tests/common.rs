#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use kviktime::BalanceStore;
use kviktime::errors::{AppError, AppResult};
use kviktime::models::{
    BalanceAdjustment, ContractSettings, DateRange, EntryType, WorkShift,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const USER: &str = "3f2b8c1e-9a4d-4e7f-b5c6-1d2e3f4a5b6c";
pub const OTHER_USER: &str = "a1b2c3d4-e5f6-4711-8899-aabbccddeeff";

pub fn kvik() -> Command {
    cargo_bin_cmd!("kviktime")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_kviktime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// UTC timestamp for `day` at `hh:mm`.
pub fn ts(day: &str, hhmm: &str) -> DateTime<FixedOffset> {
    let t = NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid test time");
    Utc.from_utc_datetime(&date(day).and_time(t)).fixed_offset()
}

pub fn full_time(start: &str) -> ContractSettings {
    ContractSettings {
        full_time_hours: Some(40.0),
        contract_percent: Some(100.0),
        opening_flex_minutes: Some(0),
        tracking_start_date: Some(date(start)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Profile,
    Entries,
    Shifts,
    Adjustments,
}

/// In-memory `BalanceStore` double with lookup counters and failure injection.
#[derive(Default)]
pub struct MemoryStore {
    profiles: HashMap<String, ContractSettings>,
    entries: Vec<(i64, String, NaiveDate, EntryType)>,
    shifts: Vec<(i64, WorkShift)>,
    adjustments: Vec<BalanceAdjustment>,
    fail_on: Option<FailOn>,
    pub profile_lookups: Cell<usize>,
    pub entry_lookups: Cell<usize>,
    pub shift_lookups: Cell<usize>,
    pub adjustment_lookups: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, user: &str, contract: ContractSettings) -> Self {
        self.profiles.insert(user.to_string(), contract);
        self
    }

    pub fn failing_on(mut self, what: FailOn) -> Self {
        self.fail_on = Some(what);
        self
    }

    fn entry_for(&mut self, user: &str, day: &str, kind: EntryType) -> i64 {
        let d = date(day);
        if let Some((id, ..)) = self
            .entries
            .iter()
            .find(|(_, u, ed, k)| u == user && *ed == d && *k == kind)
        {
            return *id;
        }
        let id = self.entries.len() as i64 + 1;
        self.entries.push((id, user.to_string(), d, kind));
        id
    }

    /// Shift on `day` from `start` to `end` (same day, UTC).
    pub fn shift(self, user: &str, day: &str, start: &str, end: &str, unpaid: i64) -> Self {
        self.shift_of(EntryType::Work, user, day, start, end, unpaid)
    }

    pub fn shift_of(
        mut self,
        kind: EntryType,
        user: &str,
        day: &str,
        start: &str,
        end: &str,
        unpaid: i64,
    ) -> Self {
        let entry_id = self.entry_for(user, day, kind);
        self.shifts
            .push((entry_id, WorkShift::new(ts(day, start), ts(day, end), unpaid)));
        self
    }

    pub fn raw_shift(mut self, user: &str, day: &str, shift: WorkShift) -> Self {
        let entry_id = self.entry_for(user, day, EntryType::Work);
        self.shifts.push((entry_id, shift));
        self
    }

    pub fn adjustment(mut self, user: &str, day: &str, delta: i64) -> Self {
        let id = self.adjustments.len() as i64 + 1;
        self.adjustments.push(BalanceAdjustment {
            id,
            user_id: user.to_string(),
            effective_date: date(day),
            delta_minutes: delta,
            note: None,
        });
        self
    }

    fn check(&self, what: FailOn) -> AppResult<()> {
        if self.fail_on == Some(what) {
            Err(AppError::Lookup(format!("{:?} store unavailable", what)))
        } else {
            Ok(())
        }
    }
}

fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

impl BalanceStore for MemoryStore {
    fn contract_settings(&self, user_id: &str) -> AppResult<Option<ContractSettings>> {
        bump(&self.profile_lookups);
        self.check(FailOn::Profile)?;
        Ok(self.profiles.get(user_id).cloned())
    }

    fn entry_ids(
        &self,
        user_id: &str,
        entry_type: EntryType,
        range: &DateRange,
    ) -> AppResult<Vec<i64>> {
        bump(&self.entry_lookups);
        self.check(FailOn::Entries)?;
        Ok(self
            .entries
            .iter()
            .filter(|(_, u, d, k)| u == user_id && *k == entry_type && range.contains(*d))
            .map(|(id, ..)| *id)
            .collect())
    }

    fn shifts_for_entries(&self, entry_ids: &[i64]) -> AppResult<Vec<WorkShift>> {
        bump(&self.shift_lookups);
        self.check(FailOn::Shifts)?;
        Ok(self
            .shifts
            .iter()
            .filter(|(id, _)| entry_ids.contains(id))
            .map(|(_, s)| s.clone())
            .collect())
    }

    fn adjustments(&self, user_id: &str, range: &DateRange) -> AppResult<Vec<BalanceAdjustment>> {
        bump(&self.adjustment_lookups);
        self.check(FailOn::Adjustments)?;
        Ok(self
            .adjustments
            .iter()
            .filter(|a| a.user_id == user_id && range.contains(a.effective_date))
            .cloned()
            .collect())
    }
}

/// Initialize a DB through the CLI and give `USER` a full-time contract.
pub fn init_db_with_profile(db_path: &str, start: &str) {
    kvik()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    kvik()
        .args([
            "--db", db_path, "profile", "set", "--user", USER, "--hours", "40", "--percent",
            "100", "--opening", "0", "--start", start,
        ])
        .assert()
        .success();
}
