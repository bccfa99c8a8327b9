//! Use-case stores over the key-value collaborator.
//!
//! # Responsibility
//! - Own the habit and journal collections and every mutation of them.
//! - Persist the full collection after each successful mutation.
//!
//! # Invariants
//! - A failed persist leaves the in-memory collection unchanged.
//! - Stores stay storage-agnostic; they only see `KeyValueStore`.

pub mod error;
pub mod habit_store;
pub mod journal_store;
