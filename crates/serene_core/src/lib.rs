//! Core domain logic for Serene.
//! Habit completion and streak tracking, the journal store, and the storage
//! seams they depend on. UI shells (FFI, CLI) call into this crate only.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod streak;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day_key::{to_day_key, DayKey, DayKeyParseError, TimeZoneSource};
pub use model::habit::{Habit, HabitId, HabitKind, HabitPatch};
pub use model::journal::{parse_tags, JournalEntry, JournalEntryId};
pub use model::ledger::CompletionLedger;
pub use model::validation::ValidationError;
pub use repo::kv::{KeyValueStore, KvError, KvResult, MemoryKvStore};
pub use repo::sqlite_kv::SqliteKvStore;
pub use service::error::{StoreError, StoreResult};
pub use service::habit_store::{HabitStore, HabitSummary, HABITS_STORAGE_KEY};
pub use service::journal_store::{JournalStore, JOURNAL_STORAGE_KEY};
pub use streak::{current_streak, is_done_today};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
