/// Domain module containing core business logic and data types
///
/// This module defines the calendar-date model, the Habit entity and the
/// streak engine that turns a habit's completion dates into streak counts.
/// Everything in here is pure: no I/O, no clock reads except through `Clock`.

pub mod date;
pub mod habit;
pub mod streak;

// Re-export public types for easy access
pub use date::{Clock, FixedClock, SystemClock};
pub use habit::*;
pub use streak::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid date format: {value:?} (expected YYYY-MM-DD)")]
    InvalidFormat { value: String },

    #[error("Date out of range: {date} shifted by {delta} days")]
    DateOutOfRange { date: String, delta: i64 },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),
}
