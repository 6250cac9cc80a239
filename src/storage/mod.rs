/// Storage layer for persisting the habit collection
///
/// The whole collection is stored as one serialized value under a single
/// key. Loading returns every habit, saving replaces every habit, and there
/// is no partial update, so callers always write back the full collection
/// they computed from the latest load.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::domain::Habit;

/// Key the habit collection is stored under
pub const STORAGE_KEY: &str = "habitflow.habits";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for the habit collection
///
/// Implementations report failures; deciding whether a failure is shown,
/// logged or swallowed belongs to the caller.
pub trait HabitStore {
    /// Read the stored collection, or an empty one if nothing is stored
    fn load(&self) -> Result<Vec<Habit>, StorageError>;

    /// Replace the stored collection with `habits`
    fn save(&self, habits: &[Habit]) -> Result<(), StorageError>;

    /// Remove the stored collection
    fn clear(&self) -> Result<(), StorageError>;
}

/// Decode a stored value into habits
pub(crate) fn decode(raw: Option<&str>) -> Result<Vec<Habit>, StorageError> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(raw) => Ok(serde_json::from_str(raw)?),
    }
}

/// Encode habits into the stored value
pub(crate) fn encode(habits: &[Habit]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(habits)?)
}
