//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! viewer core and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - String-keyed persistent storage (credentials, settings blobs)
//! - `ReanalysisApi` - The analysis service's re-analysis endpoint
//! - `ViewRefresher` - Refreshes whatever displays a document after re-analysis

mod key_value_store;
mod reanalysis_api;
mod view_refresher;

pub use key_value_store::{KeyValueStore, StoreError};
pub use reanalysis_api::{is_empty_payload, ReanalysisApi, ReanalysisApiError};
pub use view_refresher::{RefreshError, ViewRefresher};
