//! Oracle (language-model service) configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Configuration for the language-model oracle service.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// API key for the oracle service
    pub api_key: Option<Secret<String>>,

    /// Model identifier to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the oracle API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate oracle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ORACLE_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Validate with environment-specific rules.
    ///
    /// In production the base URL must use HTTPS.
    pub fn validate_for(&self, environment: &Environment) -> Result<(), ValidationError> {
        self.validate()?;
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::OracleUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}
