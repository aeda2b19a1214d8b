//! Key-value storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which key-value store backs credentials and settings
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Store implementation
    #[serde(default)]
    pub backend: StorageBackend,

    /// JSON file used by the file backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Namespace prefix for per-document settings keys
    #[serde(default = "default_settings_prefix")]
    pub settings_prefix: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.settings_prefix.is_empty() {
            return Err(ValidationError::MissingRequired("SETTINGS_PREFIX"));
        }
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            settings_prefix: default_settings_prefix(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./data/local_storage.json")
}

fn default_settings_prefix() -> String {
    crate::domain::settings::DEFAULT_SETTINGS_PREFIX.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.path, PathBuf::from("./data/local_storage.json"));
        assert_eq!(config.settings_prefix, "enhancedDocViewer_analysisControls");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_prefix() {
        let config = StorageConfig {
            settings_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_ignores_path() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_deserialization() {
        let config: StorageConfig = serde_json::from_str(r#"{ "backend": "memory" }"#).unwrap();
        assert_eq!(config.backend, StorageBackend::Memory);
    }
}
