//! Habit store: CRUD, mark-done and streak views over one persisted collection.
//!
//! # Responsibility
//! - Load the habit collection once, then mediate every mutation of it.
//! - Write the whole collection back after each change.
//!
//! # Invariants
//! - Newly created habits are listed first.
//! - `update` never touches id, creation time or completed days.
//! - Marking a day that is already recorded writes nothing.
//! - Log events carry ids and counts only, never habit names.

use crate::clock::{Clock, SystemClock};
use crate::model::day_key::{DayKey, TimeZoneSource};
use crate::model::habit::{Habit, HabitId, HabitKind, HabitPatch};
use crate::repo::collection::{load_collection, save_collection};
use crate::repo::kv::KeyValueStore;
use crate::service::error::{StoreError, StoreResult};
use crate::streak::{current_streak, is_done_today};
use chrono::{DateTime, Utc};
use log::info;

/// Storage key holding the serialized habit collection.
pub const HABITS_STORAGE_KEY: &str = "habits";

/// List-view projection of one habit as of a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitSummary {
    pub habit: Habit,
    pub current_streak: u32,
    pub done_today: bool,
}

/// Owner of the habit collection.
pub struct HabitStore<S: KeyValueStore, C: Clock = SystemClock> {
    kv: S,
    clock: C,
    time_zone: TimeZoneSource,
    habits: Vec<Habit>,
}

impl<S: KeyValueStore> HabitStore<S> {
    /// Opens the store with the host clock and local time zone.
    pub fn open(kv: S) -> StoreResult<Self> {
        Self::with_clock(kv, SystemClock, TimeZoneSource::Local)
    }
}

impl<S: KeyValueStore, C: Clock> HabitStore<S, C> {
    /// Opens the store with an explicit clock and time zone.
    ///
    /// Reads the persisted collection once; malformed data starts empty.
    pub fn with_clock(kv: S, clock: C, time_zone: TimeZoneSource) -> StoreResult<Self> {
        let habits = load_collection(&kv, HABITS_STORAGE_KEY)?;
        info!(
            "event=habit_store_open module=service status=ok count={} time_zone={}",
            habits.len(),
            time_zone.label()
        );
        Ok(Self {
            kv,
            clock,
            time_zone,
            habits,
        })
    }

    /// Habits, most recently created first.
    pub fn list(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id() == id)
    }

    /// Creates a habit stamped with the clock's current instant.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank after trimming.
    pub fn create(&mut self, name: &str, kind: HabitKind) -> StoreResult<Habit> {
        let habit = Habit::new(name, kind, self.clock.now())?;

        let mut next = Vec::with_capacity(self.habits.len() + 1);
        next.push(habit.clone());
        next.extend(self.habits.iter().cloned());
        self.commit(next)?;

        info!(
            "event=habit_create module=service status=ok habit_id={} kind={}",
            habit.id(),
            habit.kind().as_str()
        );
        Ok(habit)
    }

    /// Applies a name/kind patch.
    ///
    /// # Errors
    /// - `NotFound` when no habit has `id`.
    /// - `Validation` when the patched name is blank.
    pub fn update(&mut self, id: HabitId, patch: &HabitPatch) -> StoreResult<Habit> {
        let index = self.position(id)?;
        let updated = self.habits[index].patched(patch)?;

        let mut next = self.habits.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        info!("event=habit_update module=service status=ok habit_id={id}");
        Ok(updated)
    }

    /// Removes a habit. Unknown ids are a no-op.
    pub fn delete(&mut self, id: HabitId) -> StoreResult<()> {
        let Ok(index) = self.position(id) else {
            info!("event=habit_delete module=service status=noop habit_id={id}");
            return Ok(());
        };

        let mut next = self.habits.clone();
        next.remove(index);
        self.commit(next)?;

        info!("event=habit_delete module=service status=ok habit_id={id}");
        Ok(())
    }

    /// Records the calendar day containing `now` for habit `id`.
    ///
    /// Idempotent within a day.
    ///
    /// # Errors
    /// - `NotFound` when no habit has `id`.
    pub fn mark_done_today(&mut self, id: HabitId, now: DateTime<Utc>) -> StoreResult<Habit> {
        let index = self.position(id)?;
        let today = self.today(now);

        let mut updated = self.habits[index].clone();
        if !updated.mark_done(today) {
            info!("event=habit_mark_done module=service status=noop habit_id={id} day={today}");
            return Ok(updated);
        }

        let mut next = self.habits.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        info!("event=habit_mark_done module=service status=ok habit_id={id} day={today}");
        Ok(updated)
    }

    /// Day key of `now` in this store's time zone.
    pub fn today(&self, now: DateTime<Utc>) -> DayKey {
        self.time_zone.day_key(now)
    }

    pub fn time_zone(&self) -> TimeZoneSource {
        self.time_zone
    }

    /// Current streak of `habit` as of `today`.
    pub fn current_streak(&self, habit: &Habit, today: DayKey) -> u32 {
        current_streak(habit.completed_days(), today)
    }

    /// Every habit with its streak and done-today flag as of `now`.
    pub fn summaries(&self, now: DateTime<Utc>) -> Vec<HabitSummary> {
        let today = self.today(now);
        self.habits
            .iter()
            .map(|habit| HabitSummary {
                habit: habit.clone(),
                current_streak: self.current_streak(habit, today),
                done_today: is_done_today(habit.completed_days(), today),
            })
            .collect()
    }

    fn position(&self, id: HabitId) -> StoreResult<usize> {
        self.habits
            .iter()
            .position(|habit| habit.id() == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn commit(&mut self, next: Vec<Habit>) -> StoreResult<()> {
        save_collection(&self.kv, HABITS_STORAGE_KEY, &next)?;
        self.habits = next;
        Ok(())
    }
}
