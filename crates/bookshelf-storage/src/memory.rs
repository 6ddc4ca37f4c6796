//! In-process backend

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::accessor::KeyValueStore;
use crate::Result;

/// Volatile store keeping every slot in a shared map.
///
/// Clones share the same slots, so a clone handed to another task observes
/// every write made through any other handle.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently holding a value, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.slots.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.slots.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.slots.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().remove(key);
        Ok(())
    }
}
