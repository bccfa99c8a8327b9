//! Journal entry domain model.
//!
//! # Invariants
//! - `content` is trimmed and non-empty.
//! - `tags` hold no empty or repeated values.
//! - `id`, `date` and `question` are fixed at creation.
//! - Stored non-UUID ids load through `record_id`.

use crate::model::record_id;
use crate::model::validation::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type JournalEntryId = Uuid;

/// One journal entry, optionally answering a reflection question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[serde(deserialize_with = "record_id::deserialize")]
    id: JournalEntryId,
    content: String,
    #[serde(default)]
    tags: Vec<String>,
    date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    question: Option<String>,
}

impl JournalEntry {
    /// Creates an entry with a fresh id. `tags_input` is comma-separated.
    pub fn new(
        content: &str,
        tags_input: &str,
        question: Option<String>,
        date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            content: require_text(content, ValidationError::EmptyJournalContent)?,
            tags: parse_tags(tags_input),
            date,
            question: question
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        })
    }

    pub fn id(&self) -> JournalEntryId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// Returns a copy with new content and tags; everything else carries over.
    pub(crate) fn revised(&self, content: &str, tags_input: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            content: require_text(content, ValidationError::EmptyJournalContent)?,
            tags: parse_tags(tags_input),
            ..self.clone()
        })
    }
}

/// Splits comma-separated tag input, trimming and dropping blanks and repeats.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, JournalEntry};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_tags_trims_and_drops_blanks() {
        assert_eq!(
            parse_tags(" work, ,reflection,work ,grateful,"),
            vec!["work", "reflection", "grateful"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn blank_question_is_dropped() {
        let date = Utc.with_ymd_and_hms(2024, 2, 1, 21, 0, 0).unwrap();
        let entry = JournalEntry::new("Today", "", Some("  ".to_string()), date).unwrap();
        assert_eq!(entry.question(), None);
    }
}
