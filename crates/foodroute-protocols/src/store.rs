//! Key/value persistence boundary.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// Core trait for key/value stores holding pipeline outputs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or replace the value stored under `key`.
    async fn upsert(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// List stored keys.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Get and deserialize a value.
pub async fn load_typed<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and upsert a value.
pub async fn save_typed<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.upsert(key, serde_json::to_value(value)?).await
}
