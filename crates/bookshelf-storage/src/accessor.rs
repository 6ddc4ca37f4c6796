//! Typed access to a key-value backend

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StorageError;
use crate::Result;

/// An asynchronous get/set-by-key store holding one JSON value per key.
///
/// Implementations must surface backend failures as errors instead of
/// answering with a default; callers have no other data source.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` if the slot was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Clear the slot. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read the slot under `key` as a `T`, falling back to `default` when the
/// slot is absent or holds `null`.
pub async fn get_storage<T>(store: &dyn KeyValueStore, key: &str, default: T) -> Result<T>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        None | Some(Value::Null) => {
            tracing::debug!(key, "Slot empty, using default");
            Ok(default)
        }
        Some(value) => {
            tracing::debug!(key, "Read slot");
            serde_json::from_value(value).map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })
        }
    }
}

/// Serialize `value` and overwrite the slot under `key` with it.
pub async fn set_storage<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value).map_err(StorageError::Encode)?;
    store.set(key, value).await?;
    tracing::debug!(key, "Wrote slot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_storage_default_when_absent() {
        let store = MemoryStore::new();
        let value: Vec<String> = get_storage(&store, "names", Vec::new()).await.unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn test_get_storage_null_counts_as_absent() {
        let store = MemoryStore::new();
        store.set("names", Value::Null).await.unwrap();

        let value: Vec<String> = get_storage(&store, "names", vec!["fallback".to_string()])
            .await
            .unwrap();
        assert_eq!(value, vec!["fallback"]);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        set_storage(&store, "names", &["a", "b"]).await.unwrap();

        let value: Vec<String> = get_storage(&store, "names", Vec::new()).await.unwrap();
        assert_eq!(value, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_value() {
        let store = MemoryStore::new();
        set_storage(&store, "names", &["a", "b", "c"]).await.unwrap();
        set_storage(&store, "names", &["z"]).await.unwrap();

        let value: Vec<String> = get_storage(&store, "names", Vec::new()).await.unwrap();
        assert_eq!(value, vec!["z"]);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let store = MemoryStore::new();
        store.set("names", json!({"not": "a list"})).await.unwrap();

        let err = get_storage::<Vec<String>>(&store, "names", Vec::new())
            .await
            .unwrap_err();
        match err {
            StorageError::Decode { key, .. } => assert_eq!(key, "names"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
