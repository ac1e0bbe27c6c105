//! Durable string key-value preferences, the `localStorage` of the reader.
//!
//! [`FallbackStore`] is what the controller talks to: it never returns an error
//! and keeps the session's writes in memory when the backing store fails.

use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};

use super::connection::Database;
use crate::types::errors::StorageError;

/// Trait defining a string key-value preference backend.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Preferences persisted in the `preferences` SQLite table.
pub struct SqlitePreferenceStore {
    db: Database,
}

impl SqlitePreferenceStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens the database file at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = Database::open(path).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self::new(db))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = Database::open_in_memory().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self::new(db))
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.db.connection().execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory preferences. Keeps a log of every write.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value without recording it as a write.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Every `set` call so far, oldest first.
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Number of `set` calls made for `key`.
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.iter().filter(|(k, _)| k == key).count()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Error-swallowing wrapper around an optional backing store.
///
/// Writes always land in a volatile overlay first, so a value set during this
/// session reads back even if the backing store rejected it.
pub struct FallbackStore<S> {
    backing: Option<S>,
    overlay: HashMap<String, String>,
}

impl<S: PreferenceStore> FallbackStore<S> {
    pub fn new(backing: S) -> Self {
        Self {
            backing: Some(backing),
            overlay: HashMap::new(),
        }
    }

    /// A store with no durable backend; everything is forgotten with the page.
    pub fn volatile() -> Self {
        Self {
            backing: None,
            overlay: HashMap::new(),
        }
    }

    pub fn is_durable(&self) -> bool {
        self.backing.is_some()
    }

    pub fn backing(&self) -> Option<&S> {
        self.backing.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overlay.get(key) {
            return Some(value.clone());
        }
        let backing = self.backing.as_ref()?;
        match backing.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "preference read failed; using default");
                None
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.overlay.insert(key.to_string(), value.to_string());
        if let Some(backing) = self.backing.as_mut() {
            if let Err(e) = backing.set(key, value) {
                tracing::warn!(key, error = %e, "preference write failed; keeping value for this session only");
            }
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.overlay.remove(key);
        if let Some(backing) = self.backing.as_mut() {
            if let Err(e) = backing.remove(key) {
                tracing::warn!(key, error = %e, "preference removal failed");
            }
        }
    }
}
