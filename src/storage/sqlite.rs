/// SQLite implementation of the habit store
///
/// The collection is kept as a JSON document in a one-row-per-key table,
/// so `save` is a single upsert and a reader never sees half a collection.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Habit;
use crate::storage::{decode, encode, migrations, HabitStore, StorageError, STORAGE_KEY};

/// SQLite-backed key-value store for the habit collection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// Replace the raw value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl HabitStore for SqliteStore {
    fn load(&self) -> Result<Vec<Habit>, StorageError> {
        let raw = self.get(STORAGE_KEY)?;
        let habits = decode(raw.as_deref())?;

        tracing::debug!("Loaded {} habits", habits.len());
        Ok(habits)
    }

    fn save(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let raw = encode(habits)?;
        self.set(STORAGE_KEY, &raw)?;

        tracing::debug!("Saved {} habits", habits.len());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove(STORAGE_KEY)?;

        tracing::debug!("Cleared stored habits");
        Ok(())
    }
}
