//! Canonical calendar-day keys and timestamp normalization.
//!
//! # Responsibility
//! - Map instants to the calendar day they fall on in a given time zone.
//! - Own the canonical `YYYY-MM-DD` text form used by persisted ledgers.
//!
//! # Invariants
//! - Two instants on the same local calendar day map to the same key.
//! - Parsing accepts only zero-padded `YYYY-MM-DD` text naming a real date.
//! - `Display` output always parses back to the same key.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

static DAY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid day key regex"));

/// Calendar day identifier, resolved in some time zone, with no time part.
///
/// Ordering follows the calendar, so sorting keys sorts days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

/// Error returned when text is not a canonical day key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKeyParseError {
    /// Text does not have the `YYYY-MM-DD` shape.
    Malformed(String),
    /// Shape is right but the date does not exist (e.g. `2023-02-29`).
    InvalidDate(String),
}

impl Display for DayKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "day key `{value}` is not in YYYY-MM-DD form"),
            Self::InvalidDate(value) => write!(f, "day key `{value}` is not a calendar date"),
        }
    }
}

impl Error for DayKeyParseError {}

impl DayKey {
    /// Wraps an already-resolved calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from year/month/day parts; `None` when the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses canonical `YYYY-MM-DD` text.
    pub fn parse(value: &str) -> Result<Self, DayKeyParseError> {
        if !DAY_KEY_RE.is_match(value) {
            return Err(DayKeyParseError::Malformed(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DayKeyParseError::InvalidDate(value.to_string()))
    }

    /// Returns the underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The day before this one. `None` only at the calendar's lower bound.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The day after this one. `None` only at the calendar's upper bound.
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Signed number of calendar days from `earlier` to `self`.
    ///
    /// Positive when `earlier` really is earlier, zero for the same day.
    pub fn days_since(self, earlier: DayKey) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DayKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.to_string()
    }
}

/// Normalizes an instant to the calendar day it falls on in `time_zone`.
pub fn to_day_key<Z: TimeZone>(instant: DateTime<Utc>, time_zone: &Z) -> DayKey {
    DayKey::from_date(instant.with_timezone(time_zone).date_naive())
}

/// Where "today" is resolved.
///
/// Defaults to the host's local zone, like a browser session would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneSource {
    /// Host local time zone.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
    /// Named IANA zone, e.g. `Europe/Berlin`.
    Named(Tz),
}

impl TimeZoneSource {
    /// Parses `local`, `utc` or an IANA zone name (case-insensitive keywords).
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "local" => Some(Self::Local),
            "utc" | "z" => Some(Self::Utc),
            _ => trimmed.parse::<Tz>().ok().map(Self::Named),
        }
    }

    /// Normalizes `instant` to a day key in this zone.
    pub fn day_key(&self, instant: DateTime<Utc>) -> DayKey {
        match self {
            Self::Local => to_day_key(instant, &Local),
            Self::Utc => to_day_key(instant, &Utc),
            Self::Named(tz) => to_day_key(instant, tz),
        }
    }

    /// Stable label for logs and diagnostics.
    pub fn label(&self) -> String {
        match self {
            Self::Local => "local".to_string(),
            Self::Utc => "utc".to_string(),
            Self::Named(tz) => tz.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{to_day_key, DayKey, DayKeyParseError, TimeZoneSource};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn parse_rejects_unpadded_and_impossible_dates() {
        assert!(matches!(
            DayKey::parse("2024-1-05"),
            Err(DayKeyParseError::Malformed(_))
        ));
        assert!(matches!(
            DayKey::parse("2023-02-29"),
            Err(DayKeyParseError::InvalidDate(_))
        ));
        assert!(DayKey::parse("2024-02-29").is_ok());
    }

    #[test]
    fn offset_zone_moves_late_utc_instant_to_next_day() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 22, 30, 0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(to_day_key(instant, &tokyo).to_string(), "2024-05-02");
        assert_eq!(to_day_key(instant, &Utc).to_string(), "2024-05-01");
    }

    #[test]
    fn time_zone_source_parses_keywords_and_iana_names() {
        assert_eq!(TimeZoneSource::parse("LOCAL"), Some(TimeZoneSource::Local));
        assert_eq!(TimeZoneSource::parse("utc"), Some(TimeZoneSource::Utc));
        assert_eq!(
            TimeZoneSource::parse("Europe/Berlin").map(|source| source.label()),
            Some("Europe/Berlin".to_string())
        );
        assert_eq!(TimeZoneSource::parse("Mars/Olympus"), None);
    }

    #[test]
    fn days_since_is_signed() {
        let a = DayKey::from_ymd(2024, 3, 1).unwrap();
        let b = DayKey::from_ymd(2024, 2, 28).unwrap();
        assert_eq!(a.days_since(b), 2);
        assert_eq!(b.days_since(a), -2);
        assert_eq!(b.succ().and_then(DayKey::succ), Some(a));
    }
}
