//! services/site/src/adapters/file_store.rs
//!
//! This module contains the storage adapter, the concrete implementation of the
//! `KeyValueStore` port. All keys live in one JSON object on disk, mirroring how
//! browser-local storage keeps a flat string map per site.

use najm_core::ports::{KeyValueStore, PortError, PortResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed adapter that implements the `KeyValueStore` port.
///
/// Every write rewrites the whole file (via a temporary file and a rename). Another
/// process writing the same file is not detected: the last writer wins.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing, unreadable, or corrupt file opens as
    /// an empty store; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => {
                    info!("Loaded {} stored keys from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!("Storage file {} is corrupt, starting empty: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No storage file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Could not read storage file {}, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> PortResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PortError::Unavailable(e.to_string()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| PortError::Unavailable(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| PortError::Unavailable(e.to_string()))?;
        Ok(())
    }

    /// Applies `change` to a copy of the entries and keeps it only once it is on disk.
    fn update<F>(&self, change: F) -> PortResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PortError::Unavailable("storage lock poisoned".to_string()))?;
        let mut next = entries.clone();
        change(&mut next);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PortError::Unavailable("storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
