//! Oracle Port - interface to the language-model service.
//!
//! The oracle is a request/response text-completion capability: a prompt
//! goes in, one completion string comes out. Implementations connect to a
//! real provider; tests substitute a scripted fake. The orchestration
//! logic never sees a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the language-model oracle.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Request a single completion for the given prompt.
    async fn complete(&self, request: OracleRequest) -> Result<OracleReply, OracleError>;
}

/// A completion request.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Conversation messages (at minimum, one user message).
    pub messages: Vec<OracleMessage>,
    /// System prompt to pin model behavior.
    pub system_prompt: Option<String>,
    /// When true, demand a reply that is a single JSON object.
    pub json_only: bool,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl OracleRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            json_only: false,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Adds a message to the request.
    pub fn with_message(mut self, role: OracleRole, content: impl Into<String>) -> Self {
        self.messages.push(OracleMessage {
            role,
            content: content.into(),
        });
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Demands structured-JSON-only output.
    pub fn json_only(mut self) -> Self {
        self.json_only = true;
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

impl Default for OracleRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// A message in an oracle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleMessage {
    /// Who the message is attributed to.
    pub role: OracleRole,
    /// Message content.
    pub content: String,
}

/// Role of an oracle request message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleRole {
    /// Behavior-pinning instructions.
    System,
    /// End-user input.
    User,
    /// Prior model output.
    Assistant,
}

/// A completed oracle reply.
#[derive(Debug, Clone)]
pub struct OracleReply {
    /// The completion text. May or may not honor the structured contract;
    /// parsing and fallback are the caller's concern.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
}

/// Oracle service errors.
///
/// All variants mean the service itself failed; a well-delivered reply
/// with an unusable body is not an error at this layer.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Service returned a server error or is unreachable.
    #[error("oracle unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Request exceeded the bounded timeout.
    #[error("oracle request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// API key rejected.
    #[error("oracle authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the service.
    #[error("oracle rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Network-level failure.
    #[error("oracle network error: {0}")]
    Network(String),

    /// Transport succeeded but the envelope was not a completion.
    #[error("oracle protocol error: {0}")]
    Protocol(String),

    /// The request itself was rejected as invalid.
    #[error("oracle rejected request: {0}")]
    InvalidRequest(String),
}

impl OracleError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// True if retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OracleError::Unavailable { .. }
                | OracleError::Timeout { .. }
                | OracleError::RateLimited { .. }
                | OracleError::Network(_)
        )
    }
}
