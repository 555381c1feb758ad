//! HTTP DTOs for admin endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::interview::Answer;
use crate::ports::IntakeRecord;
use std::collections::BTreeMap;

/// Request to exchange the shared secret for a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// The shared admin secret.
    pub secret: String,
}

/// Response carrying an issued admin token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for admin endpoints.
    pub token: String,
    /// When the token stops being honored (ISO 8601).
    pub expires_at: String,
}

/// One intake record as returned to admins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeView {
    /// Session the interview ran under.
    pub session_id: String,
    /// When the interview was finalized (ISO 8601).
    pub completed_at: String,
    /// Final answers by question key.
    pub answers: BTreeMap<String, Answer>,
    /// Narrative summary.
    pub summary: String,
}

impl From<IntakeRecord> for IntakeView {
    fn from(record: IntakeRecord) -> Self {
        Self {
            session_id: record.session_id.to_string(),
            completed_at: record.completed_at.as_datetime().to_rfc3339(),
            answers: record
                .answers
                .iter()
                .map(|(k, a)| (k.clone(), a.clone()))
                .collect(),
            summary: record.summary,
        }
    }
}

/// Response listing all intakes.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeListResponse {
    /// Records, most recently completed first.
    pub intakes: Vec<IntakeView>,
}
