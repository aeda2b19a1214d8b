//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain rules and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Re-analysis
    CompletionCallback, ReanalysisTrigger, ReanalysisTriggerConfig, TriggerOutcome,
    TriggerReanalysisCommand,
    // Settings
    DocumentSettingsStore, SettingsStoreError,
};
