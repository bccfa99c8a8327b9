//! Current-streak calculation over a completion ledger.
//!
//! # Responsibility
//! - Derive the consecutive-day run that is still "alive" as of a given day.
//!
//! # Invariants
//! - Pure: the caller supplies `today`; no clock is read here.
//! - A streak is alive only when its most recent day is today or yesterday.
//! - The first gap of two or more calendar days ends the count, however long
//!   older runs are.
//! - Input order does not matter.

use crate::model::day_key::DayKey;
use crate::model::ledger::CompletionLedger;

/// Number of consecutive completed days ending today or yesterday.
///
/// A run whose latest day is yesterday still counts; it only lapses once a
/// second day passes without a completion. Days recorded after `today` make
/// the streak dead, the same as any other "not today or yesterday" latest day.
pub fn current_streak(ledger: &CompletionLedger, today: DayKey) -> u32 {
    let mut days = ledger.days().to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some((&latest, older)) = days.split_first() else {
        return 0;
    };
    if !matches!(today.days_since(latest), 0 | 1) {
        return 0;
    }

    let mut streak = 1;
    let mut last_counted = latest;
    for &day in older {
        match last_counted.days_since(day) {
            0 => continue,
            1 => {
                streak += 1;
                last_counted = day;
            }
            _ => break,
        }
    }
    streak
}

/// Whether `today` is already recorded.
pub fn is_done_today(ledger: &CompletionLedger, today: DayKey) -> bool {
    ledger.is_done_on(today)
}

#[cfg(test)]
mod tests {
    use super::current_streak;
    use crate::model::day_key::DayKey;
    use crate::model::ledger::CompletionLedger;

    fn ledger(days: &[&str]) -> CompletionLedger {
        CompletionLedger::from_days(days.iter().map(|day| DayKey::parse(day).unwrap()))
    }

    #[test]
    fn unsorted_input_is_sorted_before_walking() {
        let today = DayKey::parse("2024-03-10").unwrap();
        let days = ledger(&["2024-03-08", "2024-03-10", "2024-03-09"]);
        assert_eq!(current_streak(&days, today), 3);
    }

    #[test]
    fn future_latest_day_is_not_alive() {
        let today = DayKey::parse("2024-03-10").unwrap();
        let days = ledger(&["2024-03-11", "2024-03-10"]);
        assert_eq!(current_streak(&days, today), 0);
    }
}
