//! Durable key-value storage for record snapshots
//!
//! The record store persists each collection as one JSON-encoded snapshot under a named
//! key. Backends only need to move opaque bytes:
//! - `SqliteKeyValueStore`: SQLite-backed, survives process restarts
//! - `MemoryKeyValueStore`: in-process map for tests and throwaway sessions

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::StorageError;

/// Key holding the serialized athlete collection
pub const ATHLETE_DATA_KEY: &str = "ATHLETE_DATA";

/// Key holding the serialized workout catalog
pub const WORKOUT_DATA_KEY: &str = "WORKOUT_DATA";

/// Byte-oriented durable key-value namespace
pub trait KeyValueStore {
    /// Fetch the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Store several entries; backends that can should apply them atomically
    fn set_many(&mut self, entries: &[(&str, Vec<u8>)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Encode a collection as a snapshot payload
pub fn encode_snapshot<T: Serialize>(key: &str, items: &[T]) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(items).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Read and decode the snapshot stored under `key`
///
/// Returns `Ok(None)` when nothing is stored. A payload that is not a JSON array is an
/// error; entries inside the array that do not decode are skipped.
pub fn read_snapshot<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<Vec<T>>, StorageError> {
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };

    let entries: Vec<serde_json::Value> =
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

    let total = entries.len();
    let items: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping undecodable snapshot entry");
                None
            }
        })
        .collect();

    debug!(key, count = items.len(), skipped = total - items.len(), "Snapshot decoded");
    Ok(Some(items))
}

/// SQLite-backed key-value store
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Create or open a store at the specified path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let path = db_path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let store = Self::with_connection(conn)?;
        info!(path = %path.display(), "Opened key-value store");
        Ok(store)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "PRAGMA synchronous = FULL;

            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().timestamp()],
        )?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, Vec<u8>)]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        let now = Utc::now().timestamp();

        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )?;
        }

        tx.commit()?;
        debug!(entries = entries.len(), "Stored values in one transaction");
        Ok(())
    }
}

/// In-memory key-value store
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls applied so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_vec());
        self.writes += 1;
        Ok(())
    }
}
