/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do every day, along with name validation.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{date, DomainError};

/// Longest accepted habit name, in characters, after trimming
const MAX_NAME_LEN: usize = 100;

/// Unique identifier for a habit
///
/// New ids are random UUIDs, but ids read back from storage are treated as
/// opaque strings so older collections keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A habit the user marks done once per calendar day
///
/// Serialized with the field names `id`, `name`, `createdAt` and
/// `completedDates`, which is the layout of the stored collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier, never reused
    pub id: HabitId,
    /// Display name, trimmed and non-empty
    pub name: String,
    /// When this habit was created (informational only)
    pub created_at: DateTime<Utc>,
    /// Days the habit was completed, as `YYYY-MM-DD` strings
    ///
    /// Logically a set. Order is kept as inserted; streak calculation
    /// deduplicates and sorts on its own.
    #[serde(default)]
    pub completed_dates: Vec<String>,
}

impl Habit {
    /// Create a new habit with no completions
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            created_at: Utc::now(),
            completed_dates: Vec::new(),
        })
    }

    /// Return a copy of this habit under a new name
    pub fn renamed(&self, name: &str) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;
        Ok(Self { name, ..self.clone() })
    }

    /// Whether `date` is among the completion dates
    pub fn is_completed_on(&self, date: &str) -> bool {
        self.completed_dates.iter().any(|d| d == date)
    }

    /// Rewrite completion dates in canonical form, dropping repeats
    ///
    /// `2024-3-9` and `2024-03-09` collapse into one `2024-03-09` entry.
    /// Entries that do not parse are kept verbatim. First-seen order wins.
    pub fn with_canonical_dates(self) -> Self {
        let mut seen = HashSet::new();
        let completed_dates = self
            .completed_dates
            .into_iter()
            .map(|d| date::normalize(&d).unwrap_or(d))
            .filter(|d| seen.insert(d.clone()))
            .collect();

        Self {
            completed_dates,
            ..self
        }
    }

    /// Trim and check a habit name, returning the trimmed form
    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidHabitName(format!(
                "Habit name cannot be longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_habit() {
        let habit = Habit::new("  Morning Run ").unwrap();

        assert_eq!(habit.name, "Morning Run");
        assert!(habit.completed_dates.is_empty());
        assert!(!habit.id.as_str().is_empty());
    }

    #[test]
    fn test_invalid_habit_name() {
        assert!(Habit::new("").is_err());
        assert!(Habit::new("   \t\n").is_err());
        assert!(Habit::new(&"x".repeat(101)).is_err());
        assert!(Habit::new(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Habit::new("Read").unwrap();
        let b = Habit::new("Read").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rename_keeps_identity() {
        let mut habit = Habit::new("Read").unwrap();
        habit.completed_dates.push("2024-03-10".to_string());

        let renamed = habit.renamed(" Read 20 pages ").unwrap();
        assert_eq!(renamed.name, "Read 20 pages");
        assert_eq!(renamed.id, habit.id);
        assert_eq!(renamed.created_at, habit.created_at);
        assert_eq!(renamed.completed_dates, habit.completed_dates);

        assert!(habit.renamed("  ").is_err());
        assert_eq!(habit.name, "Read");
    }

    #[test]
    fn test_serialized_field_names() {
        let mut habit = Habit::new("Stretch").unwrap();
        habit.completed_dates.push("2024-03-10".to_string());

        let value = serde_json::to_value(&habit).unwrap();
        assert!(value.get("id").unwrap().is_string());
        assert_eq!(value["name"], "Stretch");
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["completedDates"], serde_json::json!(["2024-03-10"]));
    }

    #[test]
    fn test_canonical_dates_merge_padding_variants() {
        let mut habit = Habit::new("Water").unwrap();
        habit.completed_dates = ["2024-3-10", "2024-03-09", "2024-03-10", "junk", "junk"]
            .iter()
            .map(|d| d.to_string())
            .collect();

        let habit = habit.with_canonical_dates();
        assert_eq!(habit.completed_dates, vec!["2024-03-10", "2024-03-09", "junk"]);
        assert!(habit.is_completed_on("2024-03-10"));
    }

    #[test]
    fn test_deserialize_opaque_id() {
        let json = r#"{
            "id": "1709999999999",
            "name": "Water",
            "createdAt": "2024-03-01T08:30:00.000Z",
            "completedDates": ["2024-03-09", "2024-03-10"]
        }"#;

        let habit: Habit = serde_json::from_str(json).unwrap();
        assert_eq!(habit.id.as_str(), "1709999999999");
        assert!(habit.is_completed_on("2024-03-10"));
        assert!(!habit.is_completed_on("2024-03-08"));
    }
}
