//! In-Memory Key-Value Store Adapter
//!
//! Stores entries in a shared map. Clones share the same entries, which lets
//! a test hand one clone to the code under test and inspect another.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StoreError};

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Remove every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_and_get() {
        let store = InMemoryKeyValueStore::new();

        store.set("auth_token", "abc").await.unwrap();

        assert_eq!(store.get("auth_token").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_memory_store_get_missing() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_set_overwrites() {
        let store = InMemoryKeyValueStore::new();

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = InMemoryKeyValueStore::with_entries([("a", "1"), ("b", "2")]);

        store.delete("a").await.unwrap();
        store.delete("never-existed").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_entries() {
        let store = InMemoryKeyValueStore::new();
        let other = store.clone();

        other.set("shared", "yes").await.unwrap();

        assert_eq!(store.get("shared").await.unwrap().as_deref(), Some("yes"));
    }

    #[tokio::test]
    async fn test_memory_store_clear() {
        let store = InMemoryKeyValueStore::with_entries([("a", "1"), ("b", "2")]);

        store.clear().await;

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_store_thread_safe() {
        let store = InMemoryKeyValueStore::new();
        let writer = store.clone();
        let reader = store.clone();

        let handle1 = tokio::spawn(async move {
            writer.set("k", "v").await.unwrap();
        });
        handle1.await.unwrap();

        let handle2 = tokio::spawn(async move {
            assert_eq!(reader.get("k").await.unwrap().as_deref(), Some("v"));
        });
        handle2.await.unwrap();
    }
}
