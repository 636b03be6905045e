//! In-memory key/value store.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use foodroute_protocols::{KeyValueStore, StoreError};

/// In-memory store.
pub struct MemoryStore {
    entries: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Map::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn upsert(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodroute_protocols::{load_typed, save_typed};

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = MemoryStore::new();
        store.upsert("k", Value::from(1)).await.unwrap();
        store.upsert("k", Value::from(2)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(Value::from(2)));
        assert_eq!(store.keys().await.unwrap(), vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let store = MemoryStore::new();
        let names = vec!["Bunsen".to_string(), "Zaytoon".to_string()];
        save_typed(&store, "names", &names).await.unwrap();
        let loaded: Option<Vec<String>> = load_typed(&store, "names").await.unwrap();
        assert_eq!(loaded, Some(names));
    }
}
