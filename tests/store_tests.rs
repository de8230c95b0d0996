mod common;
use common::{OTHER_USER, USER, date, full_time, setup_test_db, ts};
use kviktime::BalanceStore;
use kviktime::core::BalanceEngine;
use kviktime::core::export::ExportLogic;
use kviktime::db::initialize::init_db;
use kviktime::db::migrate::run_pending_migrations;
use kviktime::db::pool::DbPool;
use kviktime::db::queries::{
    count_adjustments, count_entries, find_or_create_entry, insert_adjustment, insert_shift,
    load_entries_with_shifts, load_profile, upsert_profile,
};
use kviktime::errors::AppError;
use kviktime::models::{ContractSettings, EntryType, WorkShift, YearMonth};

fn open_db(name: &str) -> DbPool {
    let path = setup_test_db(name);
    let pool = DbPool::new(&path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

fn add_shift(pool: &DbPool, user: &str, day: &str, start: &str, end: &str, unpaid: i64) {
    let entry = find_or_create_entry(&pool.conn, user, date(day), EntryType::Work).unwrap();
    insert_shift(
        &pool.conn,
        entry,
        &WorkShift::new(ts(day, start), ts(day, end), unpaid),
    )
    .unwrap();
}

#[test]
fn test_migrations_run_once() {
    let pool = DbPool::in_memory().unwrap();
    assert_eq!(run_pending_migrations(&pool.conn).unwrap(), 3);
    assert_eq!(run_pending_migrations(&pool.conn).unwrap(), 0);
}

#[test]
fn test_profile_roundtrip_keeps_nulls() {
    let pool = open_db("store_profile_nulls");

    assert_eq!(load_profile(&pool.conn, USER).unwrap(), None);

    let contract = ContractSettings {
        full_time_hours: None,
        contract_percent: Some(80.0),
        opening_flex_minutes: None,
        tracking_start_date: Some(date("2025-01-01")),
    };
    upsert_profile(&pool.conn, USER, &contract).unwrap();
    assert_eq!(load_profile(&pool.conn, USER).unwrap(), Some(contract));
}

#[test]
fn test_bad_tracking_date_names_its_column() {
    let pool = open_db("store_bad_tracking_date");
    pool.conn
        .execute(
            "INSERT INTO profiles (id, tracking_start_date, created_at)
             VALUES (?1, '01/03/2025', datetime('now'))",
            [USER],
        )
        .unwrap();

    let err = load_profile(&pool.conn, USER).unwrap_err();
    assert!(
        matches!(
            err,
            AppError::Db(rusqlite::Error::FromSqlConversionFailure(3, _, _))
        ),
        "{err}"
    );
}

#[test]
fn test_record_counts_per_user() {
    let pool = open_db("store_record_counts");
    add_shift(&pool, USER, "2025-03-03", "09:00", "12:00", 0);
    add_shift(&pool, USER, "2025-03-03", "13:00", "17:00", 0);
    add_shift(&pool, USER, "2025-03-04", "09:00", "17:00", 0);
    add_shift(&pool, OTHER_USER, "2025-03-04", "09:00", "17:00", 0);
    insert_adjustment(&pool.conn, USER, date("2025-02-01"), 60, None).unwrap();

    assert_eq!(count_entries(&pool.conn, USER).unwrap(), 2);
    assert_eq!(count_adjustments(&pool.conn, USER).unwrap(), 1);
    assert_eq!(count_adjustments(&pool.conn, OTHER_USER).unwrap(), 0);
}

#[test]
fn test_one_entry_per_user_day_and_type() {
    let pool = open_db("store_entry_reuse");

    let a = find_or_create_entry(&pool.conn, USER, date("2025-03-03"), EntryType::Work).unwrap();
    let b = find_or_create_entry(&pool.conn, USER, date("2025-03-03"), EntryType::Work).unwrap();
    let c = find_or_create_entry(&pool.conn, USER, date("2025-03-03"), EntryType::Travel).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_store_lookups_filter_by_user_type_and_range() {
    let pool = open_db("store_lookups");
    upsert_profile(&pool.conn, USER, &full_time("2025-01-01")).unwrap();

    add_shift(&pool, USER, "2025-03-03", "09:00", "12:00", 0);
    add_shift(&pool, USER, "2025-03-03", "13:00", "17:00", 0);
    add_shift(&pool, USER, "2025-04-01", "09:00", "17:00", 0);
    add_shift(&pool, OTHER_USER, "2025-03-03", "09:00", "17:00", 0);
    let travel =
        find_or_create_entry(&pool.conn, USER, date("2025-03-05"), EntryType::Travel).unwrap();
    insert_shift(
        &pool.conn,
        travel,
        &WorkShift::new(ts("2025-03-05", "06:00"), ts("2025-03-05", "08:00"), 0),
    )
    .unwrap();

    let march = YearMonth::new(2025, 3).unwrap().range();
    let ids = pool.entry_ids(USER, EntryType::Work, &march).unwrap();
    assert_eq!(ids.len(), 1);

    let shifts = pool.shifts_for_entries(&ids).unwrap();
    assert_eq!(shifts.len(), 2);
    assert!(pool.shifts_for_entries(&[]).unwrap().is_empty());
}

#[test]
fn test_sqlite_store_drives_engine() {
    let pool = open_db("store_engine");
    let mut contract = full_time("2025-01-01");
    contract.opening_flex_minutes = Some(-30);
    upsert_profile(&pool.conn, USER, &contract).unwrap();

    add_shift(&pool, USER, "2025-03-03", "09:00", "17:00", 30);
    add_shift(&pool, USER, "2025-03-04", "17:00", "09:00", 0);
    insert_adjustment(&pool.conn, USER, date("2025-02-01"), 90, Some("carry-over")).unwrap();

    let b = BalanceEngine::new(&pool)
        .with_today(date("2025-03-15"))
        .calculate_user_balances(USER, Some(2025), Some(3))
        .expect("balances computed");

    assert_eq!(b.month_net, 450 - 10080);
    assert_eq!(b.year_net, -30 - 30720 + 450 + 90);
    assert_eq!(b.opening_balance, -30);
}

#[test]
fn test_missing_table_is_a_lookup_error() {
    let pool = DbPool::in_memory().unwrap();

    let err = pool.contract_settings(USER).unwrap_err();
    assert!(matches!(err, AppError::Lookup(_)));

    let engine = BalanceEngine::new(&pool).with_today(date("2025-03-15"));
    assert!(engine.compute(USER, YearMonth::new(2025, 3).unwrap()).is_err());
    assert_eq!(engine.calculate_user_balances(USER, None, None), None);
}

#[test]
fn test_entries_with_shifts_newest_first() {
    let pool = open_db("store_entries_with_shifts");
    add_shift(&pool, USER, "2025-01-10", "09:00", "17:00", 0);
    add_shift(&pool, USER, "2025-03-03", "09:00", "12:00", 0);
    add_shift(&pool, USER, "2025-03-03", "13:00", "17:00", 15);

    let entries = load_entries_with_shifts(&pool.conn, USER).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, date("2025-03-03"));
    assert_eq!(entries[0].work_shifts.len(), 2);
    assert_eq!(entries[1].work_shifts.len(), 1);
}

#[test]
fn test_export_bundle_contents_and_limits() {
    let pool = open_db("store_export_bundle");
    upsert_profile(&pool.conn, USER, &full_time("2025-01-01")).unwrap();
    add_shift(&pool, USER, "2025-01-10", "09:00", "17:00", 0);
    add_shift(&pool, USER, "2025-03-03", "09:00", "17:00", 30);
    insert_adjustment(&pool.conn, USER, date("2025-02-01"), 60, None).unwrap();

    let bundle = ExportLogic::build(&pool, USER, date("2025-03-15"), 10_000).unwrap();
    assert_eq!(bundle.metadata.total_entries, 2);
    assert_eq!(bundle.metadata.total_adjustments, 1);
    assert_eq!(bundle.metadata.date_range.earliest, Some(date("2025-01-10")));
    assert_eq!(bundle.metadata.date_range.latest, Some(date("2025-03-03")));
    assert_eq!(bundle.balances.map(|b| b.month_net), Some(450 - 10080));

    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["data"]["entries"][0]["type"], "work");
    assert!(json["data"]["entries"][0]["workShifts"].is_array());
    assert_eq!(json["contract"]["trackingStartDate"], "2025-01-01");
    assert!(bundle.exported_at.ends_with("+00:00"), "{}", bundle.exported_at);

    let too_large = ExportLogic::build(&pool, USER, date("2025-03-15"), 1).unwrap_err();
    assert!(matches!(
        too_large,
        AppError::ExportTooLarge { count: 2, limit: 1 }
    ));

    let unknown = ExportLogic::build(&pool, OTHER_USER, date("2025-03-15"), 10_000).unwrap_err();
    assert!(matches!(unknown, AppError::UserNotFound(_)));
}

#[test]
fn test_export_without_tracking_has_null_balances() {
    let pool = open_db("store_export_null_balances");
    let contract = ContractSettings {
        tracking_start_date: None,
        ..full_time("2025-01-01")
    };
    upsert_profile(&pool.conn, USER, &contract).unwrap();

    let bundle = ExportLogic::build(&pool, USER, date("2025-03-15"), 10_000).unwrap();
    let json = serde_json::to_value(&bundle).unwrap();
    assert!(json["balances"].is_null());
    assert!(json["metadata"]["dateRange"]["earliest"].is_null());
}
