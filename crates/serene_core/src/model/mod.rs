//! Domain model for habits, completion ledgers and journal entries.
//!
//! # Responsibility
//! - Define the records persisted by the stores and their validation rules.
//! - Own the calendar-day key used as the unit of completion tracking.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID; ids written before
//!   UUIDs resolve through `record_id`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod day_key;
pub mod habit;
pub mod journal;
pub mod ledger;
pub mod record_id;
pub mod validation;
