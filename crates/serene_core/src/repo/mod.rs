//! Persistence layer: the key-value collaborator and collection codecs.
//!
//! # Responsibility
//! - Define the narrow `get/set` contract stores depend on.
//! - Provide in-memory and SQLite implementations of it.
//! - Encode/decode whole collections under one key.
//!
//! # Invariants
//! - Stores depend on `KeyValueStore`, never on a concrete backend.
//! - Malformed persisted collections decode as empty, never as an error.

pub mod collection;
pub mod kv;
pub mod sqlite_kv;
