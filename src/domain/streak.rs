/// Streak calculation and completion toggling
///
/// Both operations are pure: they take a habit or its completion dates and
/// return new values for the caller to persist. The reference "today" is
/// always passed in, never read from the clock here.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{date, DomainError, Habit};

/// Current and longest daily streaks for a habit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Consecutive completed days ending today (0 if today is not completed)
    pub current_streak: u32,
    /// Longest run of consecutive completed days ever recorded
    pub longest_streak: u32,
}

impl StreakSummary {
    /// Short encouragement line for the current streak
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak!".to_string(),
            1 => "Great start! One day down.".to_string(),
            2..=6 => format!("Nice work! {} days in a row.", self.current_streak),
            7..=29 => format!("Excellent! {} days strong.", self.current_streak),
            _ => format!("Legendary! {} days of consistency.", self.current_streak),
        }
    }
}

/// Mark `date` done if it is not, or undone if it is
///
/// Removal drops every occurrence of `date`; insertion appends it once. The
/// date is compared as an opaque string and is not validated here.
pub fn toggle_completion(habit: &Habit, date: &str) -> Habit {
    let completed_dates = if habit.is_completed_on(date) {
        habit
            .completed_dates
            .iter()
            .filter(|d| d.as_str() != date)
            .cloned()
            .collect()
    } else {
        let mut dates = habit.completed_dates.clone();
        dates.push(date.to_string());
        dates
    };

    Habit {
        completed_dates,
        ..habit.clone()
    }
}

/// Compute current and longest streaks from a habit's completion dates
///
/// Input may be unordered and may hold duplicates (including the same day
/// written with and without zero padding). Any entry that is not a valid
/// calendar date, or a malformed `today`, is reported as an error instead
/// of producing a streak from partial data.
pub fn calculate_streaks<S: AsRef<str>>(
    completed_dates: &[S],
    today: &str,
) -> Result<StreakSummary, DomainError> {
    let today = date::to_naive(today)?;

    let dates = completed_dates
        .iter()
        .map(|d| date::to_naive(d.as_ref()))
        .collect::<Result<BTreeSet<NaiveDate>, _>>()?;

    if dates.is_empty() {
        return Ok(StreakSummary::default());
    }

    Ok(StreakSummary {
        current_streak: current_streak(&dates, today),
        longest_streak: longest_streak(&dates)?,
    })
}

/// Longest run of consecutive days in an ordered, non-empty set
fn longest_streak(dates: &BTreeSet<NaiveDate>) -> Result<u32, DomainError> {
    let mut longest = 1;
    let mut run = 1;

    for (previous, current) in dates.iter().zip(dates.iter().skip(1)) {
        if date::shift(*previous, 1)? == *current {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }

    Ok(longest.max(run))
}

/// Consecutive days ending at `today`; no grace day if today is missing
fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(today);

    while let Some(day) = cursor.filter(|d| dates.contains(d)) {
        streak += 1;
        cursor = date::shift(day, -1).ok();
    }

    streak
}
