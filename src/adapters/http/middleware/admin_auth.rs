//! Admin bearer-token authentication.
//!
//! Tokens are issued by exchanging the shared admin secret and are
//! self-contained: `<expiry unix seconds>.<hmac-sha256 hex>`. Verification
//! recomputes the HMAC over the expiry with the configured secret and
//! compares in constant time, then enforces the expiry, so a token is only
//! honored within its time-boxed validity window and cannot be extended by
//! editing the expiry.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::AdminConfig;
use crate::domain::foundation::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Errors from admin token verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    /// The presented secret does not match the configured one.
    #[error("Invalid admin secret")]
    InvalidSecret,

    /// The token is malformed or its signature does not verify.
    #[error("Invalid admin token")]
    InvalidToken,

    /// The token's validity window has passed.
    #[error("Admin token expired")]
    TokenExpired,
}

/// Issues and verifies time-boxed admin tokens.
pub struct AdminTokenService {
    secret: Secret<String>,
    token_lifetime_secs: u64,
}

impl AdminTokenService {
    /// Creates a service from explicit parts.
    pub fn new(secret: Secret<String>, token_lifetime_secs: u64) -> Self {
        Self {
            secret,
            token_lifetime_secs,
        }
    }

    /// Creates a service from admin configuration.
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.secret.clone(), config.token_lifetime_secs)
    }

    /// Checks a login attempt against the shared secret.
    pub fn check_secret(&self, presented: &str) -> Result<(), AdminAuthError> {
        let expected = self.secret.expose_secret().as_bytes();
        if expected.ct_eq(presented.as_bytes()).unwrap_u8() == 1 {
            Ok(())
        } else {
            Err(AdminAuthError::InvalidSecret)
        }
    }

    /// Issues a token valid from `now` for the configured lifetime.
    ///
    /// Returns the token and its expiry.
    pub fn issue(&self, now: Timestamp) -> (String, Timestamp) {
        let expires_at = now.plus_secs(self.token_lifetime_secs as i64);
        let signature = self.sign(expires_at.as_unix_secs());
        (
            format!("{}.{}", expires_at.as_unix_secs(), signature),
            expires_at,
        )
    }

    /// Verifies a token at time `now`.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<(), AdminAuthError> {
        let (expiry_part, signature_part) = token
            .split_once('.')
            .ok_or(AdminAuthError::InvalidToken)?;

        let expiry: i64 = expiry_part
            .parse()
            .map_err(|_| AdminAuthError::InvalidToken)?;

        // Signature first, so expired and forged tokens are
        // indistinguishable until the signature holds.
        let expected = self.sign(expiry);
        if expected
            .as_bytes()
            .ct_eq(signature_part.as_bytes())
            .unwrap_u8()
            != 1
        {
            return Err(AdminAuthError::InvalidToken);
        }

        if now.as_unix_secs() >= expiry {
            return Err(AdminAuthError::TokenExpired);
        }

        Ok(())
    }

    fn sign(&self, expiry: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(expiry.to_string().as_bytes());
        hex_encode(&mac.finalize().into_bytes())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Middleware that requires a valid admin bearer token.
///
/// Expects `Authorization: Bearer <token>`; missing, invalid, and expired
/// tokens are all rejected with 401.
pub async fn admin_auth_middleware(
    State(service): State<Arc<AdminTokenService>>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized("Authentication is required");
    };

    match service.verify(token, Timestamp::now()) {
        Ok(()) => next.run(request).await,
        Err(AdminAuthError::TokenExpired) => unauthorized("Token expired"),
        Err(_) => unauthorized("Invalid token"),
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "code": "UNAUTHORIZED",
            "error": message,
        })),
    )
        .into_response()
}
