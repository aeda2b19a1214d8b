//! Reanalysis API Port - the analysis service's re-analysis endpoint.
//!
//! One call asks the service to recompute a document's analysis and returns
//! the new result payload verbatim.

use async_trait::async_trait;
use secrecy::Secret;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::DocumentId;

/// Errors from the re-analysis endpoint.
///
/// The trigger treats all of them the same way; the variants exist for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReanalysisApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Response carried no payload")]
    EmptyPayload,

    #[error("Response payload is not valid JSON: {0}")]
    InvalidPayload(String),
}

impl ReanalysisApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ReanalysisApiError::Network(message.into())
    }
}

/// Port for requesting a document re-analysis.
#[async_trait]
pub trait ReanalysisApi: Send + Sync {
    /// Re-runs analysis for `document_id`, authenticated with `token`.
    ///
    /// # Returns
    /// The result payload exactly as the service sent it
    ///
    /// # Errors
    /// Any transport failure, non-success status, or missing payload
    async fn reanalyze(
        &self,
        document_id: &DocumentId,
        token: &Secret<String>,
    ) -> Result<Value, ReanalysisApiError>;
}

/// Returns true for payloads that do not count as a result.
///
/// `null` and the empty string are empty; any object, array, number or
/// boolean (including `{}`) is a result.
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
