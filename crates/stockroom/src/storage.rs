// File: src/storage.rs
// Purpose: Key-value snapshot storage and whole-collection JSON load/save

use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

/// Durable string-keyed storage. Each key holds one complete snapshot.
pub trait SnapshotStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// FILE STORAGE
// ============================================================================

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn io_error(key: &str, source: io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        // Write beside the target and rename so a reader never sees half a snapshot
        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&staging, value).map_err(|e| io_error(key, e))?;
        fs::rename(&staging, &target).map_err(|e| io_error(key, e))?;

        debug!("Wrote {} bytes to {:?}", value.len(), target);
        Ok(())
    }
}

// ============================================================================
// MEMORY STORAGE
// ============================================================================

/// Process-local storage, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with a hand-written snapshot
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().insert(key.into(), value.into());
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

/// Load the collection stored under `key`, falling back to `seed` when absent.
///
/// A present but malformed snapshot is an error; it is never replaced by seed data.
pub fn load_snapshot<T, F>(storage: &dyn SnapshotStorage, key: &str, seed: F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        }),
        None => {
            info!("No snapshot under '{}', using seed data", key);
            Ok(seed())
        }
    }
}

/// Serialize the whole collection and overwrite `key`
pub fn save_snapshot<T: Serialize>(storage: &dyn SnapshotStorage, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)
}
