use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit name is empty after trimming.
    EmptyHabitName,
    /// Journal entry content is empty after trimming.
    EmptyJournalContent,
    /// Nil UUID supplied as a record id.
    NilId,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHabitName => write!(f, "habit name cannot be empty"),
            Self::EmptyJournalContent => write!(f, "journal entry content cannot be empty"),
            Self::NilId => write!(f, "id must not be nil"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it with `error` when nothing is left.
pub(crate) fn require_text(value: &str, error: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_string())
}
