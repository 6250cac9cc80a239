/// In-memory habit store
///
/// Holds the same serialized text the SQLite store would, so encoding and
/// decoding behave identically. Useful for tests and throwaway sessions.

use std::cell::RefCell;

use crate::domain::Habit;
use crate::storage::{decode, encode, HabitStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored value, e.g. one written by an older version
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(raw.into())),
        }
    }

    /// The raw stored value, if any
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl HabitStore for MemoryStore {
    fn load(&self) -> Result<Vec<Habit>, StorageError> {
        decode(self.value.borrow().as_deref())
    }

    fn save(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let raw = encode(habits)?;
        *self.value.borrow_mut() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.value.borrow_mut().take();
        Ok(())
    }
}
