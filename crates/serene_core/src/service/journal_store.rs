//! Journal store.
//!
//! # Invariants
//! - Newest entries are listed first.
//! - `update` replaces content and tags only.
//! - Entry content never reaches the log.

use crate::clock::{Clock, SystemClock};
use crate::model::journal::{JournalEntry, JournalEntryId};
use crate::repo::collection::{load_collection, save_collection};
use crate::repo::kv::KeyValueStore;
use crate::service::error::{StoreError, StoreResult};
use log::info;

/// Storage key holding the serialized journal collection.
pub const JOURNAL_STORAGE_KEY: &str = "journalEntries";

/// Owner of the journal-entry collection.
pub struct JournalStore<S: KeyValueStore, C: Clock = SystemClock> {
    kv: S,
    clock: C,
    entries: Vec<JournalEntry>,
}

impl<S: KeyValueStore> JournalStore<S> {
    pub fn open(kv: S) -> StoreResult<Self> {
        Self::with_clock(kv, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> JournalStore<S, C> {
    pub fn with_clock(kv: S, clock: C) -> StoreResult<Self> {
        let entries = load_collection(&kv, JOURNAL_STORAGE_KEY)?;
        info!(
            "event=journal_store_open module=service status=ok count={}",
            entries.len()
        );
        Ok(Self { kv, clock, entries })
    }

    pub fn list(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, id: JournalEntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Creates an entry dated now. `tags_input` is comma-separated.
    pub fn create(
        &mut self,
        content: &str,
        tags_input: &str,
        question: Option<String>,
    ) -> StoreResult<JournalEntry> {
        let entry = JournalEntry::new(content, tags_input, question, self.clock.now())?;

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry.clone());
        next.extend(self.entries.iter().cloned());
        self.commit(next)?;

        info!(
            "event=journal_create module=service status=ok entry_id={} tag_count={}",
            entry.id(),
            entry.tags().len()
        );
        Ok(entry)
    }

    /// Replaces content and tags of an existing entry.
    pub fn update(
        &mut self,
        id: JournalEntryId,
        content: &str,
        tags_input: &str,
    ) -> StoreResult<JournalEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        let revised = self.entries[index].revised(content, tags_input)?;

        let mut next = self.entries.clone();
        next[index] = revised.clone();
        self.commit(next)?;

        info!("event=journal_update module=service status=ok entry_id={id}");
        Ok(revised)
    }

    /// Removes an entry. Unknown ids are a no-op.
    pub fn delete(&mut self, id: JournalEntryId) -> StoreResult<()> {
        if self.get(id).is_none() {
            return Ok(());
        }
        let next = self
            .entries
            .iter()
            .filter(|entry| entry.id() != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!("event=journal_delete module=service status=ok entry_id={id}");
        Ok(())
    }

    fn commit(&mut self, next: Vec<JournalEntry>) -> StoreResult<()> {
        save_collection(&self.kv, JOURNAL_STORAGE_KEY, &next)?;
        self.entries = next;
        Ok(())
    }
}
