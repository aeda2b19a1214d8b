//! Key-Value Store Port - Interface for string-keyed persistent storage.
//!
//! Holds the bearer token under a fixed key and per-document settings blobs
//! under derived keys. Backends range from an in-memory map (tests) to a
//! JSON file on disk.

use async_trait::async_trait;

/// Errors that can occur during key-value store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Store contents are corrupt: {0}")]
    Corrupt(String),
}

/// Port for a persistent string-to-string store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// `None` if nothing is stored under the key
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
