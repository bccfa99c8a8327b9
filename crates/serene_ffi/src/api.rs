//! FFI use-case API for host UI calls.
//!
//! # Responsibility
//! - Expose habit and journal use-cases to Dart via FRB as sync functions.
//! - Translate core errors into response envelopes with readable messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call reloads the collection from the configured database, under one
//!   process-wide lock, so the process is the single writer.

use chrono::{DateTime, Utc};
use log::warn;
use serene_core::db::open_db;
use serene_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Clock, CoreConfig, HabitKind, HabitPatch, HabitStore, HabitSummary, JournalEntry,
    JournalStore, SqliteKvStore, StoreError, SystemClock,
};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

static CONFIG: OnceLock<Result<CoreConfig, String>> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   falls back to the configured `SERENE_LOG_LEVEL`.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match resolve_level(&level) {
        Ok(level) => level,
        Err(err) => return err,
    };
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Habit row as shown by list and card views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitItem {
    /// Stable habit ID in string form.
    pub id: String,
    pub name: String,
    /// `build|quit`.
    pub kind: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
    /// `YYYY-MM-DD` keys in completion order.
    pub completed_days: Vec<String>,
    pub current_streak: u32,
    pub done_today: bool,
}

/// Journal entry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalItem {
    pub id: String,
    pub content: String,
    pub tags: Vec<String>,
    /// RFC 3339 creation instant.
    pub date: String,
    pub question: Option<String>,
}

/// Habit list envelope. `ok=false` carries the failure in `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListResponse {
    pub ok: bool,
    pub items: Vec<HabitItem>,
    pub message: String,
}

/// Single-habit action envelope. `item` is `None` on failure and for deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitActionResponse {
    pub ok: bool,
    pub item: Option<HabitItem>,
    pub message: String,
}

impl HabitActionResponse {
    fn success(message: impl Into<String>, item: Option<HabitItem>) -> Self {
        Self {
            ok: true,
            item,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
        }
    }
}

/// Journal list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalListResponse {
    pub ok: bool,
    pub items: Vec<JournalItem>,
    pub message: String,
}

/// Single-entry action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalActionResponse {
    pub ok: bool,
    pub item: Option<JournalItem>,
    pub message: String,
}

impl JournalActionResponse {
    fn success(message: impl Into<String>, item: Option<JournalItem>) -> Self {
        Self {
            ok: true,
            item,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
        }
    }
}

/// Lists habits, newest first, with streaks as of now.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_list() -> HabitListResponse {
    match with_habit_store(|store| Ok(store.summaries(SystemClock.now()))) {
        Ok(summaries) => HabitListResponse {
            ok: true,
            message: format!("{} habit(s).", summaries.len()),
            items: summaries.into_iter().map(to_habit_item).collect(),
        },
        Err(message) => HabitListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("habit_list failed: {message}"),
        },
    }
}

/// Creates a habit. `kind` is `build|quit` (legacy `good|bad` accepted).
#[flutter_rust_bridge::frb(sync)]
pub fn habit_create(name: String, kind: String) -> HabitActionResponse {
    let Some(kind) = HabitKind::parse(&kind) else {
        return HabitActionResponse::failure(format!("habit_create failed: unknown kind `{kind}`"));
    };
    let result = with_habit_store(|store| {
        let habit = store.create(&name, kind)?;
        Ok(summary_of(store, habit.id(), SystemClock.now()))
    });
    habit_action("habit_create", "Habit created.", result)
}

/// Edits name and/or kind. `None` leaves a field unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_update(
    id: String,
    name: Option<String>,
    kind: Option<String>,
) -> HabitActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => {
            return HabitActionResponse::failure(format!("habit_update failed: {message}"))
        }
    };
    let kind = match kind.as_deref().map(|value| (value, HabitKind::parse(value))) {
        None => None,
        Some((_, Some(kind))) => Some(kind),
        Some((value, None)) => {
            return HabitActionResponse::failure(format!(
                "habit_update failed: unknown kind `{value}`"
            ))
        }
    };
    let patch = HabitPatch { name, kind };
    let result = with_habit_store(|store| {
        store.update(id, &patch)?;
        Ok(summary_of(store, id, SystemClock.now()))
    });
    habit_action("habit_update", "Habit updated.", result)
}

/// Deletes a habit. Unknown ids succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(id: String) -> HabitActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => {
            return HabitActionResponse::failure(format!("habit_delete failed: {message}"))
        }
    };
    match with_habit_store(|store| store.delete(id)) {
        Ok(()) => HabitActionResponse::success("Habit deleted.", None),
        Err(message) => HabitActionResponse::failure(format!("habit_delete failed: {message}")),
    }
}

/// Marks a habit done for the current local day.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_mark_done_today(id: String) -> HabitActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => {
            return HabitActionResponse::failure(format!("habit_mark_done_today failed: {message}"))
        }
    };
    let result = with_habit_store(|store| mark_done_at(store, id, SystemClock.now()));
    habit_action("habit_mark_done_today", "Marked done for today.", result)
}

/// Lists journal entries, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_list() -> JournalListResponse {
    match with_journal_store(|store| Ok(store.list().to_vec())) {
        Ok(entries) => JournalListResponse {
            ok: true,
            message: format!("{} entr(ies).", entries.len()),
            items: entries.iter().map(to_journal_item).collect(),
        },
        Err(message) => JournalListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("journal_list failed: {message}"),
        },
    }
}

/// Creates a journal entry. `tags` is comma-separated.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_create(
    content: String,
    tags: String,
    question: Option<String>,
) -> JournalActionResponse {
    match with_journal_store(|store| store.create(&content, &tags, question)) {
        Ok(entry) => JournalActionResponse::success("Entry saved.", Some(to_journal_item(&entry))),
        Err(message) => JournalActionResponse::failure(format!("journal_create failed: {message}")),
    }
}

/// Replaces content and tags of a journal entry.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_update(id: String, content: String, tags: String) -> JournalActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => {
            return JournalActionResponse::failure(format!("journal_update failed: {message}"))
        }
    };
    match with_journal_store(|store| store.update(id, &content, &tags)) {
        Ok(entry) => {
            JournalActionResponse::success("Entry updated.", Some(to_journal_item(&entry)))
        }
        Err(message) => JournalActionResponse::failure(format!("journal_update failed: {message}")),
    }
}

/// Deletes a journal entry. Unknown ids succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete(id: String) -> JournalActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => {
            return JournalActionResponse::failure(format!("journal_delete failed: {message}"))
        }
    };
    match with_journal_store(|store| store.delete(id)) {
        Ok(()) => JournalActionResponse::success("Entry deleted.", None),
        Err(message) => JournalActionResponse::failure(format!("journal_delete failed: {message}")),
    }
}

fn resolve_config() -> Result<&'static CoreConfig, String> {
    CONFIG
        .get_or_init(|| {
            CoreConfig::from_env().map_err(|err| {
                warn!("event=ffi_config module=ffi status=error error={err}");
                err.to_string()
            })
        })
        .as_ref()
        .map_err(Clone::clone)
}

fn resolve_level(level: &str) -> Result<String, String> {
    if level.trim().is_empty() {
        return resolve_config().map(|config| config.log_level.to_string());
    }
    Ok(level.to_string())
}

fn with_habit_store<T>(
    f: impl FnOnce(&mut HabitStore<SqliteKvStore<'_>>) -> Result<T, StoreError>,
) -> Result<T, String> {
    let config = resolve_config()?;
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(&config.db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let mut store = HabitStore::with_clock(kv, SystemClock, config.time_zone)
        .map_err(|err| format!("store init failed: {err}"))?;
    f(&mut store).map_err(|err| err.to_string())
}

fn with_journal_store<T>(
    f: impl FnOnce(&mut JournalStore<SqliteKvStore<'_>>) -> Result<T, StoreError>,
) -> Result<T, String> {
    let config = resolve_config()?;
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(&config.db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let mut store =
        JournalStore::open(kv).map_err(|err| format!("store init failed: {err}"))?;
    f(&mut store).map_err(|err| err.to_string())
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{raw}`"))
}

/// Marks and summarizes against one instant so the reply matches the day recorded.
fn mark_done_at(
    store: &mut HabitStore<SqliteKvStore<'_>>,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<Option<HabitSummary>, StoreError> {
    store.mark_done_today(id, now)?;
    Ok(summary_of(store, id, now))
}

fn summary_of(
    store: &HabitStore<SqliteKvStore<'_>>,
    id: Uuid,
    now: DateTime<Utc>,
) -> Option<HabitSummary> {
    store
        .summaries(now)
        .into_iter()
        .find(|summary| summary.habit.id() == id)
}

fn habit_action(
    operation: &str,
    success_message: &str,
    result: Result<Option<HabitSummary>, String>,
) -> HabitActionResponse {
    match result {
        Ok(summary) => HabitActionResponse::success(success_message, summary.map(to_habit_item)),
        Err(message) => HabitActionResponse::failure(format!("{operation} failed: {message}")),
    }
}

fn to_habit_item(summary: HabitSummary) -> HabitItem {
    let habit = summary.habit;
    HabitItem {
        id: habit.id().to_string(),
        name: habit.name().to_string(),
        kind: habit.kind().as_str().to_string(),
        created_at: habit.created_at().to_rfc3339(),
        completed_days: habit
            .completed_days()
            .days()
            .iter()
            .map(ToString::to_string)
            .collect(),
        current_streak: summary.current_streak,
        done_today: summary.done_today,
    }
}

fn to_journal_item(entry: &JournalEntry) -> JournalItem {
    JournalItem {
        id: entry.id().to_string(),
        content: entry.content().to_string(),
        tags: entry.tags().to_vec(),
        date: entry.date().to_rfc3339(),
        question: entry.question().map(str::to_string),
    }
}
