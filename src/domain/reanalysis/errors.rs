//! Re-analysis error taxonomy.

use thiserror::Error;

/// Reasons a re-analysis attempt ends in the `Error` status.
///
/// These are never returned as `Err` from the trigger; they are reported
/// alongside the status change so callers can show or log them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReanalysisError {
    /// No bearer token could be read from the credential store.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Network failure, non-success response, or an empty/undecodable payload.
    #[error("Re-analysis request failed: {0}")]
    RequestFailed(String),
}

impl ReanalysisError {
    /// Creates a request failure from any displayable cause.
    pub fn request_failed(cause: impl ToString) -> Self {
        ReanalysisError::RequestFailed(cause.to_string())
    }

    /// Message shown next to the retry control.
    pub fn user_message(&self) -> &'static str {
        "Re-analysis failed. Please try again."
    }
}
