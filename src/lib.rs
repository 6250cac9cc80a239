/// Public library interface for the HabitFlow habit tracker
///
/// This module exports the domain model (dates, habits, streaks), the
/// storage layer, and `HabitTracker`, which wires a store and a clock
/// together the way an interactive front end uses them.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// Internal modules
mod calendar;
mod domain;
mod storage;

// Re-export public modules and types
pub use calendar::MonthGrid;
pub use domain::*;
pub use storage::{HabitStore, MemoryStore, SqliteStore, StorageError, STORAGE_KEY};

/// Errors that can occur while driving the tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Habit {name:?} ({habit_id}) has an unreadable history: {source}")]
    BrokenHistory {
        habit_id: String,
        name: String,
        #[source]
        source: DomainError,
    },
}

/// A habit together with its streaks as of today
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitOverview {
    pub habit: Habit,
    pub streaks: StreakSummary,
    pub completed_today: bool,
}

/// Habit tracker backed by a store and a clock
///
/// Every mutating call loads the latest collection, applies one change and
/// writes the whole collection back. Nothing is cached between calls.
pub struct HabitTracker<S: HabitStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl HabitTracker<SqliteStore, SystemClock> {
    /// Open a tracker on the SQLite database at `db_path`
    pub fn open(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Initializing habit tracker with database: {:?}", db_path);

        let store = SqliteStore::new(db_path)?;
        Ok(Self::with_parts(store, SystemClock))
    }
}

impl<S: HabitStore, C: Clock> HabitTracker<S, C> {
    pub fn with_parts(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Today's canonical date according to the tracker's clock
    pub fn today(&self) -> String {
        self.clock.today()
    }

    /// Load every habit; a failed load yields an empty collection
    ///
    /// Completion dates come back in canonical form, so a day written as
    /// `2024-3-9` by another client matches `2024-03-09` everywhere.
    pub fn habits(&self) -> Vec<Habit> {
        match self.store.load() {
            Ok(habits) => habits.into_iter().map(Habit::with_canonical_dates).collect(),
            Err(e) => {
                tracing::warn!("Failed to load habits: {}", e);
                Vec::new()
            }
        }
    }

    /// Every habit with its current and longest streaks
    ///
    /// A habit whose history cannot be read is reported on its own entry;
    /// the other habits are still listed.
    pub fn overview(&self) -> Vec<Result<HabitOverview, TrackerError>> {
        let today = self.today();

        self.habits()
            .into_iter()
            .map(|habit| Self::summarize(habit, &today))
            .collect()
    }

    /// Create a habit and append it to the collection
    pub fn add_habit(&self, name: &str) -> Result<Habit, TrackerError> {
        let habit = Habit::new(name)?;

        let mut habits = self.habits();
        habits.push(habit.clone());
        self.persist(&habits);

        tracing::info!("Created habit: {} ({})", habit.name, habit.id);
        Ok(habit)
    }

    /// Rename a habit, keeping its id and history
    pub fn rename_habit(&self, habit_id: &HabitId, name: &str) -> Result<Habit, TrackerError> {
        let (habit, ()) = self.update(habit_id, |habit| Ok((habit.renamed(name)?, ())))?;
        Ok(habit)
    }

    /// Remove a habit and its history
    pub fn delete_habit(&self, habit_id: &HabitId) -> Result<Habit, TrackerError> {
        let mut habits = self.habits();
        let index = Self::position(&habits, habit_id)?;
        let removed = habits.remove(index);
        self.persist(&habits);

        tracing::info!("Deleted habit: {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Toggle completion of a habit on `date`, or today if none is given
    ///
    /// An explicit date must be a valid calendar date and is stored in
    /// canonical form. Returns the updated habit with its new streaks.
    pub fn toggle(
        &self,
        habit_id: &HabitId,
        on: Option<&str>,
    ) -> Result<HabitOverview, TrackerError> {
        let today = self.today();
        let date = match on {
            Some(d) => date::normalize(d)?,
            None => today.clone(),
        };

        // Streaks are checked before the write so a bad history stores nothing
        let (habit, overview) = self.update(habit_id, |habit| {
            let toggled = toggle_completion(habit, &date);
            let overview = Self::summarize(toggled.clone(), &today)?;
            Ok((toggled, overview))
        })?;

        tracing::debug!(
            "Toggled {} on {} (current streak {})",
            habit.id,
            date,
            overview.streaks.current_streak
        );

        Ok(overview)
    }

    /// Month grid for each habit
    pub fn month(&self, year: i32, month: u32) -> Result<Vec<(Habit, MonthGrid)>, TrackerError> {
        self.habits()
            .into_iter()
            .map(|habit| -> Result<_, TrackerError> {
                let grid = MonthGrid::build(year, month, &habit.completed_dates)?;
                Ok((habit, grid))
            })
            .collect()
    }

    /// Remove every habit and all history
    pub fn reset(&self) -> Result<(), TrackerError> {
        self.store.clear()?;
        tracing::info!("Cleared all habits");
        Ok(())
    }

    /// Replace one habit with the result of `f` and write the collection
    ///
    /// Nothing is written when `f` fails.
    fn update<T, F>(&self, habit_id: &HabitId, f: F) -> Result<(Habit, T), TrackerError>
    where
        F: FnOnce(&Habit) -> Result<(Habit, T), TrackerError>,
    {
        let mut habits = self.habits();
        let index = Self::position(&habits, habit_id)?;

        let (updated, extra) = f(&habits[index])?;
        habits[index] = updated.clone();
        self.persist(&habits);

        Ok((updated, extra))
    }

    fn summarize(habit: Habit, today: &str) -> Result<HabitOverview, TrackerError> {
        let streaks = match calculate_streaks(&habit.completed_dates, today) {
            Ok(streaks) => streaks,
            Err(source) => {
                return Err(TrackerError::BrokenHistory {
                    habit_id: habit.id.to_string(),
                    name: habit.name,
                    source,
                })
            }
        };

        Ok(HabitOverview {
            completed_today: habit.is_completed_on(today),
            habit,
            streaks,
        })
    }

    fn position(habits: &[Habit], habit_id: &HabitId) -> Result<usize, TrackerError> {
        habits
            .iter()
            .position(|h| &h.id == habit_id)
            .ok_or_else(|| TrackerError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    /// Write the collection; failures are logged and not retried
    fn persist(&self, habits: &[Habit]) {
        if let Err(e) = self.store.save(habits) {
            tracing::error!("Failed to save habits: {}", e);
        }
    }

    /// Get a reference to the store (useful for testing)
    pub fn store(&self) -> &S {
        &self.store
    }
}
