//! File-based Key-Value Store Adapter
//!
//! Keeps every entry in a single JSON object file, the on-disk counterpart
//! of browser local storage. Writes go to a sibling temp file that is then
//! renamed over the original, so a crash never leaves half a file behind.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::ports::{KeyValueStore, StoreError};

type Entries = BTreeMap<String, String>;

/// File-backed key-value store
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// The file and its parent directories are created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/local_storage.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_entries(&self) -> Result<Entries, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        debug!(path = %self.path.display(), entries = entries.len(), "Wrote key-value store");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.read_entries().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path().join("local_storage.json"))
    }

    #[tokio::test]
    async fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("auth_token", "abc").await.unwrap();

        assert_eq!(store.get("auth_token").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert_eq!(store.get("anything").await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();

        store_in(&temp_dir).set("k", "v").await.unwrap();

        let reopened = store_in(&temp_dir);
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("nested/dir/store.json"));

        store.set("k", "v").await.unwrap();

        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_file_store_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.delete("a").await.unwrap();
        store.delete("never-existed").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_file_store_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("k", "v").await.unwrap();

        assert!(!temp_dir.path().join("local_storage.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        tokio::fs::write(store.path(), "not json").await.unwrap();

        let result = store.get("k").await;

        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_file_store_concurrent_writes_keep_every_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&temp_dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.set(&format!("key-{}", i), "v").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..8 {
            assert!(store.get(&format!("key-{}", i)).await.unwrap().is_some());
        }
    }
}
