//! HTTP DTOs (Data Transfer Objects) for interview endpoints.
//!
//! These types define the JSON request/response structure for the
//! interview API. They serve as the boundary between HTTP and the
//! application layer; deserialization enforces the payload shapes, the
//! engine enforces the semantics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::handlers::interview::FinalizeSessionCommand;
use crate::domain::foundation::SessionId;
use crate::domain::interview::{
    default_catalog, Answer, AnswerSheet, ChatMessage, Question, QuestionCatalog, TurnOutcome,
    TurnRequest,
};
use crate::ports::IntakeRecord;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to process one interview turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequestBody {
    /// Session this turn belongs to; generated when absent (first turn).
    #[serde(default)]
    pub session_id: Option<SessionId>,
    /// Catalog for the session; the built-in intake catalog when absent.
    #[serde(default)]
    pub catalog: Option<QuestionCatalog>,
    /// Answers accumulated over prior turns.
    #[serde(default)]
    pub answers: AnswerSheet,
    /// Transcript so far.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// The latest user message.
    pub message: String,
}

impl TurnRequestBody {
    /// Converts the body into an engine request, filling defaults.
    pub fn into_turn_request(self) -> TurnRequest {
        TurnRequest {
            session_id: self.session_id.unwrap_or_default(),
            catalog: self.catalog.unwrap_or_else(default_catalog),
            answers: self.answers,
            history: self.history,
            message: self.message,
        }
    }
}

/// Request to finalize a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequestBody {
    /// Session being finalized.
    pub session_id: SessionId,
    /// Catalog the session ran with; the built-in catalog when absent.
    #[serde(default)]
    pub catalog: Option<QuestionCatalog>,
    /// Final merged answers.
    #[serde(default)]
    pub answers: AnswerSheet,
    /// Transcript.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

impl FinalizeRequestBody {
    /// Converts the body into a finalize command, filling defaults.
    pub fn into_command(self) -> FinalizeSessionCommand {
        FinalizeSessionCommand {
            session_id: self.session_id,
            catalog: self.catalog.unwrap_or_else(default_catalog),
            answers: self.answers,
            history: self.history,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for one processed turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponseBody {
    /// Session this turn belonged to.
    pub session_id: SessionId,
    /// Answers newly extracted this turn.
    pub extracted_answers: BTreeMap<String, Answer>,
    /// Conversational reply to show the user.
    pub response: String,
    /// The question id to address next.
    pub current_focus: String,
    /// Whether the interview is complete.
    pub all_answered: bool,
    /// The merged sheet; send it back on the next turn.
    pub answers: AnswerSheet,
}

impl TurnResponseBody {
    /// Builds the response from a settled turn.
    pub fn from_outcome(session_id: SessionId, outcome: TurnOutcome) -> Self {
        Self {
            session_id,
            extracted_answers: outcome.extracted_answers,
            response: outcome.response,
            current_focus: outcome.current_focus,
            all_answered: outcome.all_answered,
            answers: outcome.answers,
        }
    }
}

/// Response for a finalized session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponseBody {
    /// Session that was finalized.
    pub session_id: SessionId,
    /// When the record was written.
    pub completed_at: String,
    /// The generated narrative summary.
    pub summary: String,
}

impl From<IntakeRecord> for FinalizeResponseBody {
    fn from(record: IntakeRecord) -> Self {
        Self {
            session_id: record.session_id,
            completed_at: record.completed_at.as_datetime().to_rfc3339(),
            summary: record.summary,
        }
    }
}

/// Response carrying the built-in question catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponseBody {
    /// Questions in interview order.
    pub questions: Vec<Question>,
}

impl CatalogResponseBody {
    /// Builds the response from a catalog.
    pub fn from_catalog(catalog: QuestionCatalog) -> Self {
        Self {
            questions: catalog.into(),
        }
    }
}

/// Standard JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_turn_body_gets_defaults() {
        let body: TurnRequestBody = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        let request = body.into_turn_request();

        assert_eq!(request.message, "hello");
        assert_eq!(request.catalog.first().key, "problem");
        assert!(request.answers.is_empty());
        assert!(request.history.is_empty());
    }

    #[test]
    fn turn_body_without_message_is_rejected() {
        let result: Result<TurnRequestBody, _> = serde_json::from_str(r#"{"history": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn turn_body_with_invalid_quality_is_rejected() {
        let json = r#"{
            "message": "hi",
            "answers": {"problem": {"text": "x", "quality": 9}}
        }"#;
        let result: Result<TurnRequestBody, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn turn_body_accepts_full_payload() {
        let json = r#"{
            "sessionId": "7b38bd22-0a08-4b54-8b9c-9bb9e33a0bb7",
            "catalog": [{"id": "q1", "key": "problem", "text": "What problem?"}],
            "answers": {"problem": {"text": "invoices", "quality": 4}},
            "history": [{"role": "user", "text": "hi"}],
            "message": "more detail"
        }"#;
        let body: TurnRequestBody = serde_json::from_str(json).unwrap();
        let request = body.into_turn_request();

        assert_eq!(request.catalog.len(), 1);
        assert_eq!(request.answers.get("problem").unwrap().text, "invoices");
        assert_eq!(request.history.len(), 1);
    }

    #[test]
    fn turn_response_serializes_camel_case() {
        let response = TurnResponseBody {
            session_id: SessionId::new(),
            extracted_answers: BTreeMap::new(),
            response: "ok".to_string(),
            current_focus: "q1".to_string(),
            all_answered: false,
            answers: AnswerSheet::new(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("currentFocus"));
        assert!(json.contains("allAnswered"));
        assert!(json.contains("extractedAnswers"));
    }
}
