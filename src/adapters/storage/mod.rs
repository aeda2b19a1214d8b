//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - Keeps every entry in one JSON object file on disk
//! - **InMemoryKeyValueStore** - Keeps entries in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use digest_client::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // CLI: survives restarts
//! let store = FileKeyValueStore::new("./data/local_storage.json");
//!
//! // Testing
//! let store = InMemoryKeyValueStore::new();
//! ```

mod file_store;
mod in_memory_store;

pub use file_store::FileKeyValueStore;
pub use in_memory_store::InMemoryKeyValueStore;
