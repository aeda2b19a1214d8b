//! Re-analysis command handlers.

mod trigger_reanalysis;

pub use trigger_reanalysis::{
    CompletionCallback, ReanalysisTrigger, ReanalysisTriggerConfig, TriggerOutcome,
    TriggerReanalysisCommand,
};
