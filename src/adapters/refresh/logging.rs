//! Logging view refresher.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::DocumentId;
use crate::ports::{RefreshError, ViewRefresher};

/// Refresher for front ends with nothing to reload; it only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingViewRefresher;

#[async_trait]
impl ViewRefresher for LoggingViewRefresher {
    async fn refresh(&self, document_id: &DocumentId) -> Result<(), RefreshError> {
        info!(document_id = %document_id, "Analysis refreshed");
        Ok(())
    }
}
