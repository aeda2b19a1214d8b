//! View refresh adapters.
//!
//! - **BroadcastViewRefresher** - Announces refreshes on a tokio broadcast channel
//! - **LoggingViewRefresher** - Only records the refresh in the log (CLI use)

mod broadcast;
mod logging;

pub use broadcast::{BroadcastViewRefresher, RefreshRequested};
pub use logging::LoggingViewRefresher;
