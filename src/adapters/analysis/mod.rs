//! Analysis service adapters.
//!
//! - **HttpReanalysisClient** - ReanalysisApi over HTTP via reqwest

mod http_reanalysis_client;

pub use http_reanalysis_client::{HttpReanalysisClient, HttpReanalysisConfig};
