use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use serene_core::db::migrations::latest_version;
use serene_core::db::{open_db, open_db_in_memory, DbError};
use serene_core::{
    Clock, FixedClock, HabitKind, HabitStore, KeyValueStore, KvError, SqliteKvStore,
    TimeZoneSource,
};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("serene.db");

    let first = open_db(&path).unwrap();
    SqliteKvStore::try_new(&first)
        .unwrap()
        .set("habits", "[]")
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let kv = SqliteKvStore::try_new(&second).unwrap();
    assert_eq!(kv.get("habits").unwrap().as_deref(), Some("[]"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvStore::try_new(&conn).err().expect("should reject");
    assert!(matches!(
        err,
        KvError::Db(DbError::SchemaNotReady("kv_entries"))
    ));
}

#[test]
fn sqlite_set_overwrites_existing_key() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(kv.get("journalEntries").unwrap(), None);
    kv.set("journalEntries", "[1]").unwrap();
    kv.set("journalEntries", "[2]").unwrap();
    assert_eq!(kv.get("journalEntries").unwrap().as_deref(), Some("[2]"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn habit_store_persists_through_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.db");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap());

    let created = {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let mut store = HabitStore::with_clock(kv, &clock, TimeZoneSource::Utc).unwrap();
        let habit = store.create("Read", HabitKind::Build).unwrap();
        store.mark_done_today(habit.id(), clock.now()).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let store = HabitStore::with_clock(kv, &clock, TimeZoneSource::Utc).unwrap();
    assert_eq!(store.list(), &[created]);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )
    .unwrap()
}
