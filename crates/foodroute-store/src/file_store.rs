//! JSON-file key/value store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use foodroute_protocols::{KeyValueStore, StoreError};

/// A stored value and when it was last written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

/// Store backed by a single JSON object file.
///
/// Layout:
/// ```text
/// {
///   "restaurant_names": { "value": [...], "updated_at": "..." },
///   "places":           { "value": {...}, "updated_at": "..." }
/// }
/// ```
///
/// Upserts are read-modify-write under a mutex, and the file is replaced by
/// writing a sibling temp file and renaming it over the original.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store at `path`. The file is created on first upsert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Map::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Corrupt(format!(
                "{} holds {} instead of an object",
                self.path.display(),
                kind_of(&other)
            ))),
        }
    }

    /// Read the full entry (value and timestamp) for `key`.
    pub async fn entry(&self, key: &str) -> Result<Option<StoredEntry>, StoreError> {
        let mut all = self.read_all().await?;
        match all.remove(key) {
            Some(raw) => Ok(Some(serde_json::from_value(raw)?)),
            None => Ok(None),
        }
    }

    async fn write_all(&self, all: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(all)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entry(key).await?.map(|entry| entry.value))
    }

    async fn upsert(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        let entry = StoredEntry {
            value,
            updated_at: Utc::now(),
        };
        let replaced = all.insert(key.to_string(), serde_json::to_value(entry)?).is_some();
        self.write_all(&all).await?;

        if replaced {
            debug!("Replaced '{}' in {}", key, self.path.display());
        }
        info!("Upserted '{}' in {}", key, self.path.display());
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_all().await?.keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "file_store_tests.rs"]
mod tests;
