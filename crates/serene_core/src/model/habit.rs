//! Habit domain model.
//!
//! # Responsibility
//! - Define the persisted habit record and its edit patch.
//! - Keep identity, creation time and the completion ledger immutable to edits.
//!
//! # Invariants
//! - `id` is a non-nil UUID and never changes.
//! - `name` is trimmed and non-empty.
//! - Only the habit store mutates `completed_days`.

use crate::model::day_key::DayKey;
use crate::model::ledger::CompletionLedger;
use crate::model::record_id;
use crate::model::validation::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type HabitId = Uuid;

/// What the user is trying to do with a habit. Label only; streaks ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    /// Habit to build.
    #[serde(alias = "good")]
    Build,
    /// Habit to quit.
    #[serde(alias = "bad")]
    Quit,
}

impl HabitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Quit => "quit",
        }
    }

    /// Parses `build|quit`, also accepting the legacy `good|bad` labels.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "build" | "good" => Some(Self::Build),
            "quit" | "bad" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HabitRecord")]
pub struct Habit {
    id: HabitId,
    name: String,
    #[serde(rename = "type")]
    kind: HabitKind,
    created_at: DateTime<Utc>,
    completed_days: CompletionLedger,
}

/// Name/kind edits. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub kind: Option<HabitKind>,
}

impl Habit {
    /// Creates a habit with a fresh id and an empty ledger.
    pub fn new(
        name: &str,
        kind: HabitKind,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), name, kind, created_at)
    }

    /// Creates a habit with a caller-provided id (import paths, fixtures).
    pub fn with_id(
        id: HabitId,
        name: &str,
        kind: HabitKind,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId);
        }
        Ok(Self {
            id,
            name: require_text(name, ValidationError::EmptyHabitName)?,
            kind,
            created_at,
            completed_days: CompletionLedger::new(),
        })
    }

    pub fn id(&self) -> HabitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> HabitKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_days(&self) -> &CompletionLedger {
        &self.completed_days
    }

    /// Returns a copy with `patch` applied. Id, creation time and ledger carry over.
    pub(crate) fn patched(&self, patch: &HabitPatch) -> Result<Self, ValidationError> {
        let name = match patch.name.as_deref() {
            Some(name) => require_text(name, ValidationError::EmptyHabitName)?,
            None => self.name.clone(),
        };
        Ok(Self {
            name,
            kind: patch.kind.unwrap_or(self.kind),
            ..self.clone()
        })
    }

    /// Records `day`; returns whether the ledger changed.
    pub(crate) fn mark_done(&mut self, day: DayKey) -> bool {
        self.completed_days.mark_done(day)
    }
}

/// Wire shape accepted on read. Takes the legacy `completedDates` name and
/// non-UUID ids too.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitRecord {
    #[serde(deserialize_with = "record_id::deserialize")]
    id: HabitId,
    name: String,
    #[serde(rename = "type")]
    kind: HabitKind,
    created_at: DateTime<Utc>,
    #[serde(default, alias = "completedDates")]
    completed_days: CompletionLedger,
}

impl TryFrom<HabitRecord> for Habit {
    type Error = ValidationError;

    fn try_from(record: HabitRecord) -> Result<Self, Self::Error> {
        let mut habit = Habit::with_id(record.id, &record.name, record.kind, record.created_at)?;
        habit.completed_days = record.completed_days;
        Ok(habit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Habit, HabitKind, HabitPatch};
    use crate::model::day_key::DayKey;
    use crate::model::validation::ValidationError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn new_trims_name_and_rejects_blank() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let habit = Habit::new("  Read  ", HabitKind::Build, now).unwrap();
        assert_eq!(habit.name(), "Read");
        assert!(habit.completed_days().is_empty());

        let err = Habit::new("   ", HabitKind::Quit, now).unwrap_err();
        assert_eq!(err, ValidationError::EmptyHabitName);
    }

    #[test]
    fn patched_keeps_identity_and_ledger() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut habit = Habit::new("Walk", HabitKind::Build, now).unwrap();
        habit.mark_done(DayKey::from_ymd(2024, 1, 1).unwrap());

        let patch = HabitPatch {
            name: Some("Evening walk".to_string()),
            kind: None,
        };
        let updated = habit.patched(&patch).unwrap();
        assert_eq!(updated.id(), habit.id());
        assert_eq!(updated.created_at(), habit.created_at());
        assert_eq!(updated.completed_days(), habit.completed_days());
        assert_eq!(updated.name(), "Evening walk");
        assert_eq!(updated.kind(), HabitKind::Build);
    }

    #[test]
    fn timestamp_id_decodes_to_stable_uuid() {
        let raw = r#"{"id":"2024-04-01T09:15:00.000Z","name":"Meditate","type":"good",
            "createdAt":"2024-04-01T09:15:00.000Z","completedDates":["2024-04-09"]}"#;
        let first: Habit = serde_json::from_str(raw).unwrap();
        let second: Habit = serde_json::from_str(raw).unwrap();
        assert_eq!(first.id(), second.id());
        assert_eq!(first.kind(), HabitKind::Build);
        assert_eq!(first.completed_days().len(), 1);

        let encoded = serde_json::to_string(&first).unwrap();
        let reencoded: Habit = serde_json::from_str(&encoded).unwrap();
        assert_eq!(reencoded, first);
    }

    #[test]
    fn kind_parse_accepts_legacy_labels() {
        assert_eq!(HabitKind::parse("good"), Some(HabitKind::Build));
        assert_eq!(HabitKind::parse("BAD"), Some(HabitKind::Quit));
        assert_eq!(HabitKind::parse("maybe"), None);
    }
}
