//! HTTP handlers for admin endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::interview::ErrorResponse;
use crate::adapters::http::middleware::AdminTokenService;
use crate::application::handlers::admin::ListIntakesHandler;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::IntakeStore;

use super::dto::{IntakeListResponse, IntakeView, LoginRequest, LoginResponse};

/// Shared application state for admin endpoints.
#[derive(Clone)]
pub struct AdminAppState {
    pub token_service: Arc<AdminTokenService>,
    pub intake_store: Arc<dyn IntakeStore>,
}

impl AdminAppState {
    /// Create the list handler from shared state.
    pub fn list_intakes_handler(&self) -> ListIntakesHandler {
        ListIntakesHandler::new(self.intake_store.clone())
    }
}

/// POST /api/admin/login - exchange the shared secret for a bearer token.
pub async fn login(
    State(state): State<AdminAppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    state
        .token_service
        .check_secret(&body.secret)
        .map_err(|_| AdminApiError::unauthorized("Invalid admin secret"))?;

    let (token, expires_at) = state.token_service.issue(Timestamp::now());

    tracing::info!("Admin token issued");

    Ok(Json(LoginResponse {
        token,
        expires_at: expires_at.as_datetime().to_rfc3339(),
    }))
}

/// GET /api/admin/intakes - list persisted intakes.
///
/// Reached only through the admin auth middleware.
pub async fn list_intakes(
    State(state): State<AdminAppState>,
) -> Result<impl IntoResponse, AdminApiError> {
    let records = state.list_intakes_handler().handle().await?;

    Ok(Json(IntakeListResponse {
        intakes: records.into_iter().map(IntakeView::from).collect(),
    }))
}

/// HTTP-facing error for admin endpoints.
#[derive(Debug)]
pub struct AdminApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AdminApiError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "UNAUTHORIZED",
            message: message.into(),
        }
    }
}

impl From<DomainError> for AdminApiError {
    fn from(err: DomainError) -> Self {
        tracing::error!(error = %err, "Admin query failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "STORAGE_ERROR",
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}
