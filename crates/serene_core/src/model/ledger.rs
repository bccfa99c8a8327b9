//! Per-habit completion ledger.
//!
//! # Invariants
//! - A day key appears at most once.
//! - Insertion order is kept; marking an existing day never reorders entries.

use crate::model::day_key::DayKey;
use serde::{Deserialize, Serialize};

/// Set of days on which a habit was marked done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DayKey>", into = "Vec<DayKey>")]
pub struct CompletionLedger {
    days: Vec<DayKey>,
}

impl CompletionLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from arbitrary days, dropping repeats (first one wins).
    pub fn from_days(days: impl IntoIterator<Item = DayKey>) -> Self {
        let mut ledger = Self::new();
        for day in days {
            ledger.mark_done(day);
        }
        ledger
    }

    /// Records `day`. Returns `false` when it was already recorded.
    pub fn mark_done(&mut self, day: DayKey) -> bool {
        if self.is_done_on(day) {
            return false;
        }
        self.days.push(day);
        true
    }

    /// Value-style variant of [`CompletionLedger::mark_done`].
    pub fn with_day(mut self, day: DayKey) -> Self {
        self.mark_done(day);
        self
    }

    pub fn is_done_on(&self, day: DayKey) -> bool {
        self.days.contains(&day)
    }

    /// Recorded days in insertion order.
    pub fn days(&self) -> &[DayKey] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl From<Vec<DayKey>> for CompletionLedger {
    fn from(value: Vec<DayKey>) -> Self {
        Self::from_days(value)
    }
}

impl From<CompletionLedger> for Vec<DayKey> {
    fn from(value: CompletionLedger) -> Self {
        value.days
    }
}

#[cfg(test)]
mod tests {
    use super::CompletionLedger;
    use crate::model::day_key::DayKey;

    fn day(value: &str) -> DayKey {
        DayKey::parse(value).unwrap()
    }

    #[test]
    fn mark_done_is_idempotent_and_keeps_order() {
        let mut ledger = CompletionLedger::new();
        assert!(ledger.mark_done(day("2024-06-02")));
        assert!(ledger.mark_done(day("2024-06-01")));
        assert!(!ledger.mark_done(day("2024-06-02")));

        assert_eq!(ledger.days(), &[day("2024-06-02"), day("2024-06-01")]);
    }

    #[test]
    fn with_day_returns_extended_ledger() {
        let base = CompletionLedger::new().with_day(day("2024-06-01"));
        let extended = base.clone().with_day(day("2024-06-02"));
        assert_eq!(base.len(), 1);
        assert_eq!(extended.days(), &[day("2024-06-01"), day("2024-06-02")]);
        assert_eq!(extended.clone().with_day(day("2024-06-01")), extended);
    }

    #[test]
    fn deserialize_collapses_duplicates() {
        let ledger: CompletionLedger =
            serde_json::from_str(r#"["2024-06-01","2024-06-03","2024-06-01"]"#).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.is_done_on(day("2024-06-03")));
        assert!(!ledger.is_done_on(day("2024-06-02")));
    }
}
