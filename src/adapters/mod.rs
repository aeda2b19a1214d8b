//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the viewer core to external systems:
//! - `analysis` - HTTP client for the analysis service
//! - `storage` - Key-value stores (in-memory, JSON file)
//! - `refresh` - View refreshers (broadcast channel, log-only)

pub mod analysis;
pub mod refresh;
pub mod storage;

pub use analysis::{HttpReanalysisClient, HttpReanalysisConfig};
pub use refresh::{BroadcastViewRefresher, LoggingViewRefresher, RefreshRequested};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
