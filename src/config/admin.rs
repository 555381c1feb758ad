//! Admin access configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Admin access configuration.
///
/// Admin endpoints are protected by bearer tokens derived from a shared
/// secret. Tokens carry an embedded expiry and are only honored within the
/// configured lifetime window.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Shared secret used to issue and verify admin tokens
    pub secret: Secret<String>,

    /// Token lifetime in seconds
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: u64,
}

impl AdminConfig {
    /// Get token lifetime as Duration
    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.token_lifetime_secs)
    }

    /// Validate admin configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN_SECRET"));
        }
        if self.secret.expose_secret().len() < 16 {
            return Err(ValidationError::AdminSecretTooShort);
        }
        if self.token_lifetime_secs < 60 || self.token_lifetime_secs > 86_400 {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

fn default_token_lifetime() -> u64 {
    3600
}
