//! Intake Store Port - persistence for completed interviews.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::domain::interview::AnswerSheet;

/// One persisted intake: the final answer sheet plus its narrative summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Session the interview ran under.
    pub session_id: SessionId,
    /// When the interview was finalized.
    pub completed_at: Timestamp,
    /// Final merged answers.
    pub answers: AnswerSheet,
    /// Narrative summary generated from the answers.
    pub summary: String,
}

impl IntakeRecord {
    /// Creates a record stamped with the current time.
    pub fn new(session_id: SessionId, answers: AnswerSheet, summary: impl Into<String>) -> Self {
        Self {
            session_id,
            completed_at: Timestamp::now(),
            answers,
            summary: summary.into(),
        }
    }
}

/// Port for persisting and listing completed intakes.
#[async_trait]
pub trait IntakeStore: Send + Sync {
    /// Persists one completed intake. Writing the same session twice
    /// replaces the earlier record.
    async fn save(&self, record: &IntakeRecord) -> Result<(), DomainError>;

    /// Returns all intakes, most recently completed first.
    async fn list(&self) -> Result<Vec<IntakeRecord>, DomainError>;
}
