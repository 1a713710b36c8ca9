//! Key-value persistence.
//!
//! The engine treats storage as an opaque string-keyed store with three
//! operations. The SQLite implementation keeps everything in a single
//! `kv` table; an in-memory implementation backs tests and ephemeral
//! runs.

use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use super::data_dir;
use crate::error::{Result, StorageError};

/// Opaque key-value persistence contract.
pub trait KeyValueStore {
    /// Fetch a value, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every key starting with `prefix`.
    fn remove_all(&self, prefix: &str) -> Result<()>;
}

/// SQLite-backed store at `~/.config/recharge/recharge.db`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the default on-disk store, creating the schema if needed.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("recharge.db");
        Self::open_at(&path)
    }

    /// Open a store at an explicit path (tests use a temp dir).
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (tests, ephemeral sessions).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(StorageError::from)?;
        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .map_err(StorageError::from)?;
        match rows.next() {
            Some(value) => Ok(Some(value.map_err(StorageError::from)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn remove_all(&self, prefix: &str) -> Result<()> {
        // GLOB avoids LIKE-pattern metacharacters in keys.
        self.conn
            .execute(
                "DELETE FROM kv WHERE key GLOB ?1 || '*'",
                params![prefix],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.lock().expect("store lock").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_all(&self, prefix: &str) -> Result<()> {
        self.map
            .lock()
            .expect("store lock")
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
