//! Key-value persistence surface
//!
//! The board only needs `get`/`set` of named string blobs. Two backends ship
//! with the crate: an in-memory map and a directory of JSON files.

use std::collections::HashMap;
use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::SaveError;

/// Get/set of named blobs. Calls may block; the write lanes run them on the
/// blocking pool.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError>;

    fn set(&self, key: &str, blob: &str) -> Result<(), SaveError>;
}

/// Process-local store, used by tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Mutex::new(entries) }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        let entries =
            self.entries.lock().map_err(|_| SaveError::Unavailable("memory store poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), SaveError> {
        let mut entries =
            self.entries.lock().map_err(|_| SaveError::Unavailable("memory store poisoned".into()))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// One JSON file per key under `root`; `formation/4-4-2` lives at
/// `<root>/formation/4-4-2.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SaveError> {
        let segments: Vec<&str> = key.split('/').collect();
        let valid = segments.iter().all(|s| {
            !s.is_empty() && *s != "." && *s != ".." && !s.contains(['\\', ':', '\0'])
        });
        if !valid {
            return Err(SaveError::InvalidKey { key: key.to_string() });
        }

        let (file, dirs) = segments
            .split_last()
            .ok_or_else(|| SaveError::InvalidKey { key: key.to_string() })?;
        let mut path = self.root.clone();
        for dir in dirs {
            path.push(dir);
        }
        path.push(format!("{file}.json"));
        Ok(path)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let blob = std::fs::read_to_string(&path)?;
        tracing::debug!(key, bytes = blob.len(), "Read blob from {:?}", path);
        Ok(Some(blob))
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(blob.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &path)?;

        tracing::debug!(key, bytes = blob.len(), "Wrote blob to {:?}", path);
        Ok(())
    }
}
