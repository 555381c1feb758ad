//! OpenAI-backed Oracle - chat completions over HTTPS.
//!
//! Speaks the `/chat/completions` wire format with an optional JSON
//! response mode for structured extraction calls.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiOracleConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let oracle = OpenAiOracle::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{Oracle, OracleError, OracleReply, OracleRequest, OracleRole};

/// Configuration for the OpenAI oracle adapter.
#[derive(Debug, Clone)]
pub struct OpenAiOracleConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gpt-4o").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiOracleConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Oracle implementation over the OpenAI chat completions API.
pub struct OpenAiOracle {
    config: OpenAiOracleConfig,
    client: Client,
}

impl OpenAiOracle {
    /// Creates a new oracle adapter with the given configuration.
    pub fn new(config: OpenAiOracleConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts a port request to the wire format.
    fn to_wire_request(&self, request: &OracleRequest) -> WireRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(WireMessage {
                role: match msg.role {
                    OracleRole::System => "system",
                    OracleRole::User => "user",
                    OracleRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: if request.json_only {
                Some(ResponseFormat {
                    format_type: "json_object".to_string(),
                })
            } else {
                None
            },
        }
    }

    /// Sends a request, mapping transport failures.
    async fn send_request(&self, request: &OracleRequest) -> Result<Response, OracleError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    OracleError::network(format!("Connection failed: {}", e))
                } else {
                    OracleError::network(e.to_string())
                }
            })
    }

    /// Maps a non-success status to the port error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, OracleError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(OracleError::AuthenticationFailed),
            429 => Err(OracleError::RateLimited {
                retry_after_secs: parse_retry_after(&error_body),
            }),
            400 => Err(OracleError::InvalidRequest(error_body)),
            500..=599 => Err(OracleError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(OracleError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the completion envelope into a reply.
    async fn parse_response(&self, response: Response) -> Result<OracleReply, OracleError> {
        let response = self.handle_response_status(response).await?;

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| OracleError::protocol(format!("Failed to parse response: {}", e)))?;

        let choice = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OracleError::protocol("No choices in response"))?;

        Ok(OracleReply {
            content: choice.message.content,
            model: wire_response.model,
        })
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(&self, request: OracleRequest) -> Result<OracleReply, OracleError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }
}

/// Parses retry-after seconds from an error body, defaulting to 30.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(msg) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = msg.find("try again in ") {
                let rest = &msg[idx + 13..];
                if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                    if let Ok(secs) = rest[..num_end].parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    30
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAiOracleConfig::new("test-key")
            .with_model("gpt-4o-mini")
            .with_base_url("https://custom.api.example")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://custom.api.example");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn wire_request_includes_system_prompt_first() {
        let oracle = OpenAiOracle::new(OpenAiOracleConfig::new("test"));
        let request = OracleRequest::new()
            .with_system_prompt("Be structured")
            .with_message(OracleRole::User, "Hello");

        let wire = oracle.to_wire_request(&request);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "Be structured");
        assert_eq!(wire.messages[1].role, "user");
    }

    #[test]
    fn json_only_sets_response_format() {
        let oracle = OpenAiOracle::new(OpenAiOracleConfig::new("test"));

        let plain = oracle.to_wire_request(&OracleRequest::new());
        assert!(plain.response_format.is_none());

        let structured = oracle.to_wire_request(&OracleRequest::new().json_only());
        assert_eq!(
            structured.response_format.unwrap().format_type,
            "json_object"
        );
    }

    #[test]
    fn wire_request_serializes_without_absent_options() {
        let oracle = OpenAiOracle::new(OpenAiOracleConfig::new("test"));
        let wire = oracle.to_wire_request(&OracleRequest::new());
        let json = serde_json::to_string(&wire).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("response_format"));
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 30 seconds."}}"#;
        assert_eq!(parse_retry_after(error), 30);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(parse_retry_after("not json"), 30);
        assert_eq!(
            parse_retry_after(r#"{"error":{"message":"Something went wrong"}}"#),
            30
        );
    }

    #[test]
    fn completions_url_joins_base() {
        let oracle = OpenAiOracle::new(
            OpenAiOracleConfig::new("test").with_base_url("https://api.openai.com/v1"),
        );
        assert_eq!(
            oracle.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
