//! Broadcast view refresher.
//!
//! Views subscribe and reload the named document's analysis when a
//! [`RefreshRequested`] arrives. This replaces a full page reload with a
//! targeted refresh of the affected data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::foundation::DocumentId;
use crate::ports::{RefreshError, ViewRefresher};

const DEFAULT_CAPACITY: usize = 16;

/// A request to reload one document's analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequested {
    pub document_id: DocumentId,
    pub requested_at: DateTime<Utc>,
}

/// Fans refresh requests out to every subscribed view.
#[derive(Debug, Clone)]
pub struct BroadcastViewRefresher {
    sender: broadcast::Sender<RefreshRequested>,
}

impl BroadcastViewRefresher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a refresher whose channel buffers `capacity` requests per subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes a view to refresh requests.
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshRequested> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastViewRefresher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewRefresher for BroadcastViewRefresher {
    async fn refresh(&self, document_id: &DocumentId) -> Result<(), RefreshError> {
        let request = RefreshRequested {
            document_id: document_id.clone(),
            requested_at: Utc::now(),
        };

        let delivered = self
            .sender
            .send(request)
            .map_err(|_| RefreshError::NoListeners)?;

        debug!(document_id = %document_id, subscribers = delivered, "Refresh requested");
        Ok(())
    }
}
