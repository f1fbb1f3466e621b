//! Key-value persistence.
//!
//! [`JsonFileStore`] keeps a single JSON object on disk. Writes hold an
//! exclusive advisory lock on a sibling `.lock` file across the whole
//! read-modify-write and land through a temp-file rename.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde_json::{Map, Value};

use crate::error::{DroidsyncError, Result};

/// A JSON document keyed by string.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `default` when absent.
    fn get(&self, key: &str, default: Value) -> Value;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Read the document, treating anything unusable as empty.
    fn read_document(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Map::new(),
        };
        if content.trim().is_empty() {
            return Map::new();
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(
                    "Store at {} is not a JSON object, starting empty",
                    self.path.display()
                );
                Map::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Store at {} is invalid ({}), starting empty",
                    self.path.display(),
                    e
                );
                Map::new()
            }
        }
    }

    fn store_error(&self, message: impl Into<String>) -> DroidsyncError {
        DroidsyncError::Store {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(document)
            .map_err(|e| self.store_error(format!("failed to serialize: {}", e)))?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let temp_path = self.path.with_file_name(tmp_name);

        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str, default: Value) -> Value {
        self.read_document().remove(key).unwrap_or(default)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock_file
            .lock_exclusive()
            .map_err(|e| self.store_error(format!("failed to lock: {}", e)))?;

        let mut document = self.read_document();
        document.insert(key.to_string(), value);
        let result = self.write_document(&document);

        if let Err(e) = FileExt::unlock(&lock_file) {
            tracing::warn!("Failed to unlock {}: {}", self.lock_path().display(), e);
        }
        result
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
            .unwrap_or(default)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
