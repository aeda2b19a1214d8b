//! Re-analysis trigger configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Re-analysis trigger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReanalysisConfig {
    /// Delay in milliseconds between success and the view refresh
    #[serde(default = "default_success_refresh_delay")]
    pub success_refresh_delay_ms: u64,

    /// Delay in milliseconds before an error status resets to idle
    #[serde(default = "default_error_reset_delay")]
    pub error_reset_delay_ms: u64,

    /// Store key holding the bearer token
    #[serde(default = "default_auth_token_key")]
    pub auth_token_key: String,
}

impl ReanalysisConfig {
    pub fn success_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.success_refresh_delay_ms)
    }

    pub fn error_reset_delay(&self) -> Duration {
        Duration::from_millis(self.error_reset_delay_ms)
    }

    /// Validate re-analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.auth_token_key.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_TOKEN_KEY"));
        }
        // An hour is far beyond any sensible UI delay.
        if self.success_refresh_delay_ms > 3_600_000 || self.error_reset_delay_ms > 3_600_000 {
            return Err(ValidationError::InvalidDelay);
        }
        Ok(())
    }
}

impl Default for ReanalysisConfig {
    fn default() -> Self {
        Self {
            success_refresh_delay_ms: default_success_refresh_delay(),
            error_reset_delay_ms: default_error_reset_delay(),
            auth_token_key: default_auth_token_key(),
        }
    }
}

fn default_success_refresh_delay() -> u64 {
    2000
}

fn default_error_reset_delay() -> u64 {
    5000
}

fn default_auth_token_key() -> String {
    "auth_token".to_string()
}
