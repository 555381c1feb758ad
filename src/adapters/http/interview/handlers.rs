//! HTTP handlers for interview endpoints.
//!
//! These handlers connect Axum routes to application layer command
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::interview::{
    FinalizeSessionError, FinalizeSessionHandler, ProcessTurnHandler,
};
use crate::domain::interview::{default_catalog, TurnError};
use crate::ports::{IntakeStore, Oracle};

use super::dto::{
    CatalogResponseBody, ErrorResponse, FinalizeRequestBody, FinalizeResponseBody,
    TurnRequestBody, TurnResponseBody,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for interview endpoints.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct InterviewAppState {
    pub oracle: Arc<dyn Oracle>,
    pub intake_store: Arc<dyn IntakeStore>,
}

impl InterviewAppState {
    /// Create handlers on demand from the shared state.
    pub fn process_turn_handler(&self) -> ProcessTurnHandler {
        ProcessTurnHandler::new(self.oracle.clone())
    }

    pub fn finalize_handler(&self) -> FinalizeSessionHandler {
        FinalizeSessionHandler::new(self.oracle.clone(), self.intake_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/interview/turn - process one interview turn.
pub async fn process_turn(
    State(state): State<InterviewAppState>,
    Json(body): Json<TurnRequestBody>,
) -> Result<impl IntoResponse, InterviewApiError> {
    let request = body.into_turn_request();
    let session_id = request.session_id;

    let outcome = state.process_turn_handler().handle(request).await?;

    Ok(Json(TurnResponseBody::from_outcome(session_id, outcome)))
}

/// POST /api/interview/finalize - summarize and persist a finished interview.
pub async fn finalize_session(
    State(state): State<InterviewAppState>,
    Json(body): Json<FinalizeRequestBody>,
) -> Result<impl IntoResponse, InterviewApiError> {
    let finalized = state.finalize_handler().handle(body.into_command()).await?;

    Ok(Json(FinalizeResponseBody::from(finalized.record)))
}

/// GET /api/interview/catalog - the built-in question catalog.
pub async fn get_catalog() -> impl IntoResponse {
    Json(CatalogResponseBody::from_catalog(default_catalog()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// HTTP-facing error for interview endpoints.
#[derive(Debug)]
pub struct InterviewApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl InterviewApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl From<TurnError> for InterviewApiError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::InvalidRequest(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg)
            }
            TurnError::OracleUnavailable(msg) => {
                tracing::error!(error = %msg, "Oracle unavailable during turn");
                Self::new(StatusCode::BAD_GATEWAY, "ORACLE_UNAVAILABLE", msg)
            }
        }
    }
}

impl From<FinalizeSessionError> for InterviewApiError {
    fn from(err: FinalizeSessionError) -> Self {
        match err {
            FinalizeSessionError::OracleUnavailable(msg) => {
                tracing::error!(error = %msg, "Oracle unavailable during finalize");
                Self::new(StatusCode::BAD_GATEWAY, "ORACLE_UNAVAILABLE", msg)
            }
            FinalizeSessionError::EmptySummary => Self::new(
                StatusCode::BAD_GATEWAY,
                "ORACLE_UNAVAILABLE",
                "Oracle returned an empty summary",
            ),
            FinalizeSessionError::Store(msg) => {
                tracing::error!(error = %msg, "Intake store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", msg)
            }
        }
    }
}

impl IntoResponse for InterviewApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}
