//! PostgreSQL implementation of IntakeStore.
//!
//! Persists one row per completed interview; answers are stored as JSONB.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::interview::AnswerSheet;
use crate::ports::{IntakeRecord, IntakeStore};

/// PostgreSQL implementation of IntakeStore.
#[derive(Clone)]
pub struct PostgresIntakeStore {
    pool: PgPool,
}

impl PostgresIntakeStore {
    /// Creates a new PostgresIntakeStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntakeStore for PostgresIntakeStore {
    async fn save(&self, record: &IntakeRecord) -> Result<(), DomainError> {
        let answers = serde_json::to_value(&record.answers).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize answers: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO intakes (session_id, completed_at, answers, summary)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id) DO UPDATE SET
                completed_at = EXCLUDED.completed_at,
                answers = EXCLUDED.answers,
                summary = EXCLUDED.summary
            "#,
        )
        .bind(record.session_id.as_uuid())
        .bind(record.completed_at.as_datetime())
        .bind(answers)
        .bind(&record.summary)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert intake: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<IntakeRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, completed_at, answers, summary
            FROM intakes
            ORDER BY completed_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch intakes: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<IntakeRecord, DomainError> {
    let session_id: uuid::Uuid = row.try_get("session_id").map_err(db_error)?;
    let completed_at: chrono::DateTime<chrono::Utc> =
        row.try_get("completed_at").map_err(db_error)?;
    let answers: serde_json::Value = row.try_get("answers").map_err(db_error)?;
    let summary: String = row.try_get("summary").map_err(db_error)?;

    let answers: AnswerSheet = serde_json::from_value(answers).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Stored answers failed to deserialize: {}", e),
        )
    })?;

    Ok(IntakeRecord {
        session_id: SessionId::from_uuid(session_id),
        completed_at: Timestamp::from_datetime(completed_at),
        answers,
        summary,
    })
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Row decode failed: {}", e))
}
