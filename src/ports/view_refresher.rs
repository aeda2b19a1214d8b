//! View Refresher Port - refresh the data shown for a document.
//!
//! Called once after a successful re-analysis, after a short delay, so that
//! whatever displays the document reloads its analysis from the service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::DocumentId;

/// Errors that can occur while requesting a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("No view is listening for refreshes")]
    NoListeners,

    #[error("Refresh failed: {0}")]
    Failed(String),
}

/// Port for refreshing the view of a document.
#[async_trait]
pub trait ViewRefresher: Send + Sync {
    /// Discards cached analysis for `document_id` and reloads it.
    async fn refresh(&self, document_id: &DocumentId) -> Result<(), RefreshError>;
}
