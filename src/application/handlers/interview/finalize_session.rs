//! FinalizeSession command handler.
//!
//! Generates the narrative summary for a finished interview via the
//! oracle's plain-text contract and persists one intake record. Unlike
//! extraction, there is no fallback: a summary the oracle never produced
//! is not invented, so oracle failures surface to the caller.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::interview::{summary_prompt, AnswerSheet, ChatMessage, QuestionCatalog};
use crate::ports::{IntakeRecord, IntakeStore, Oracle, OracleRequest, OracleRole};

/// Maximum tokens for a summary reply.
const SUMMARY_MAX_TOKENS: u32 = 768;

/// Command to finalize an interview session.
#[derive(Debug, Clone)]
pub struct FinalizeSessionCommand {
    /// The session being finalized.
    pub session_id: SessionId,
    /// Question catalog the session ran with.
    pub catalog: QuestionCatalog,
    /// Final merged answers.
    pub answers: AnswerSheet,
    /// Transcript; only the trailing window feeds the summary.
    pub history: Vec<ChatMessage>,
}

/// Errors that can occur while finalizing a session.
#[derive(Debug, Clone, Error)]
pub enum FinalizeSessionError {
    /// The oracle could not produce a summary.
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// The oracle replied with an empty body.
    #[error("Oracle returned an empty summary")]
    EmptySummary,

    /// Persisting the record failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl From<DomainError> for FinalizeSessionError {
    fn from(err: DomainError) -> Self {
        FinalizeSessionError::Store(err.to_string())
    }
}

/// Result of finalizing a session.
#[derive(Debug, Clone)]
pub struct FinalizedSession {
    /// The persisted record.
    pub record: IntakeRecord,
}

/// Handles summary generation and persistence for finished interviews.
pub struct FinalizeSessionHandler {
    oracle: Arc<dyn Oracle>,
    store: Arc<dyn IntakeStore>,
}

impl FinalizeSessionHandler {
    /// Creates a new handler.
    pub fn new(oracle: Arc<dyn Oracle>, store: Arc<dyn IntakeStore>) -> Self {
        Self { oracle, store }
    }

    /// Generates the summary and writes the intake record.
    pub async fn handle(
        &self,
        command: FinalizeSessionCommand,
    ) -> Result<FinalizedSession, FinalizeSessionError> {
        let prompt = summary_prompt(&command.catalog, &command.answers, &command.history);

        let reply = self
            .oracle
            .complete(OracleRequest::new().with_message(OracleRole::User, prompt).with_max_tokens(SUMMARY_MAX_TOKENS))
            .await
            .map_err(|e| FinalizeSessionError::OracleUnavailable(e.to_string()))?;

        let summary = reply.content.trim();
        if summary.is_empty() {
            return Err(FinalizeSessionError::EmptySummary);
        }

        let record = IntakeRecord::new(command.session_id, command.answers, summary);
        self.store.save(&record).await?;

        tracing::info!(
            session_id = %command.session_id,
            answered = record.answers.len(),
            "Intake finalized"
        );

        Ok(FinalizedSession { record })
    }
}
