//! DocumentSettingsStore - persists view settings per document.
//!
//! Settings are stored as JSON under a key derived from the analysis result
//! being viewed (see [`DocumentKey`]). Saving replaces whatever was stored;
//! callers that want to change one preference load, modify, and save.
//!
//! Loading fails soft: a missing key, a blob that is not a JSON object, or an
//! unreadable store all read as "no stored settings". A known preference with
//! a value of the wrong shape does not spoil the rest of the blob.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::settings::{
    DocumentKey, DocumentSettings, ResultPayload, DEFAULT_SETTINGS_PREFIX,
};
use crate::ports::{KeyValueStore, StoreError};

/// Errors from the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsStoreError {
    #[error("Stored settings could not be parsed: {0}")]
    ParseFailed(String),

    #[error("Settings could not be serialized: {0}")]
    SerializationFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler for per-document settings.
pub struct DocumentSettingsStore {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl DocumentSettingsStore {
    /// Creates a settings store using the default key prefix.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prefix(store, DEFAULT_SETTINGS_PREFIX)
    }

    /// Creates a settings store whose keys start with `prefix`.
    pub fn with_prefix(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Derives the storage key for a result payload.
    pub fn derive_key(&self, payload: Option<&ResultPayload>) -> Option<DocumentKey> {
        DocumentKey::derive(&self.prefix, payload)
    }

    /// Storage key for an identifier that is already known.
    pub fn key_for_identifier(&self, identifier: &str) -> Option<DocumentKey> {
        DocumentKey::for_identifier(&self.prefix, identifier)
    }

    /// Writes `settings` under `key`, replacing anything stored there.
    pub async fn save(
        &self,
        key: &DocumentKey,
        settings: &DocumentSettings,
    ) -> Result<(), SettingsStoreError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| SettingsStoreError::SerializationFailed(e.to_string()))?;

        self.store.set(key.as_str(), &json).await?;

        debug!(key = %key, "Saved document settings");
        Ok(())
    }

    /// Reads the settings stored under `key`.
    ///
    /// Returns `None` when nothing usable is stored.
    pub async fn load(&self, key: &DocumentKey) -> Option<DocumentSettings> {
        match self.try_load(key).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring stored document settings");
                None
            }
        }
    }

    /// Reads the settings stored under `key`, reporting why a read failed.
    pub async fn try_load(
        &self,
        key: &DocumentKey,
    ) -> Result<Option<DocumentSettings>, SettingsStoreError> {
        let Some(raw) = self.store.get(key.as_str()).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SettingsStoreError::ParseFailed(e.to_string()))
    }

    /// Removes the settings stored under `key`.
    pub async fn clear(&self, key: &DocumentKey) -> Result<(), SettingsStoreError> {
        self.store.delete(key.as_str()).await?;
        debug!(key = %key, "Cleared document settings");
        Ok(())
    }

    /// Restores settings for the result being viewed.
    ///
    /// Meant to run once the result is available; before that there is no
    /// identifier to derive a key from and this returns `None`.
    pub async fn restore(&self, payload: Option<&ResultPayload>) -> Option<DocumentSettings> {
        let Some(key) = self.derive_key(payload) else {
            debug!("No document identifier; settings not restored");
            return None;
        };
        self.load(&key).await
    }
}
