//! Per-document settings persistence.

mod document_settings_store;

pub use document_settings_store::{DocumentSettingsStore, SettingsStoreError};
