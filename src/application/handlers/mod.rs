//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod reanalysis;
pub mod settings;

pub use reanalysis::{
    CompletionCallback, ReanalysisTrigger, ReanalysisTriggerConfig, TriggerOutcome,
    TriggerReanalysisCommand,
};
pub use settings::{DocumentSettingsStore, SettingsStoreError};
