//! Axum router configuration for interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{finalize_session, get_catalog, process_turn, InterviewAppState};

/// Create the interview API router.
///
/// # Routes
///
/// - `POST /turn` - Process one interview turn
/// - `POST /finalize` - Summarize and persist a finished interview
/// - `GET /catalog` - The built-in question catalog
pub fn interview_routes() -> Router<InterviewAppState> {
    Router::new()
        .route("/turn", post(process_turn))
        .route("/finalize", post(finalize_session))
        .route("/catalog", get(get_catalog))
}

/// Create the interview module router for mounting at `/api/interview`.
pub fn interview_router() -> Router<InterviewAppState> {
    Router::new().nest("/interview", interview_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::ai::MockOracle;
    use crate::domain::foundation::DomainError;
    use crate::ports::{IntakeRecord, IntakeStore};
    use async_trait::async_trait;

    struct NullIntakeStore;

    #[async_trait]
    impl IntakeStore for NullIntakeStore {
        async fn save(&self, _record: &IntakeRecord) -> Result<(), DomainError> {
            Ok(())
        }

        async fn list(&self) -> Result<Vec<IntakeRecord>, DomainError> {
            Ok(vec![])
        }
    }

    fn test_state() -> InterviewAppState {
        InterviewAppState {
            oracle: Arc::new(MockOracle::new()),
            intake_store: Arc::new(NullIntakeStore),
        }
    }

    #[test]
    fn interview_routes_create_router() {
        let router = interview_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn interview_router_nests_without_panic() {
        let router = interview_router();
        let _: Router<()> = router.with_state(test_state());
    }
}
