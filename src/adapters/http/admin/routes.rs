//! Axum router configuration for admin endpoints.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::admin_auth_middleware;

use super::handlers::{list_intakes, login, AdminAppState};

/// Create the admin API router.
///
/// # Routes
///
/// - `POST /login` - Exchange the shared secret for a bearer token (no auth)
/// - `GET /intakes` - List persisted intakes (bearer token required)
pub fn admin_routes(state: AdminAppState) -> Router<AdminAppState> {
    let token_service: Arc<_> = state.token_service.clone();

    let protected = Router::new()
        .route("/intakes", get(list_intakes))
        .layer(middleware::from_fn_with_state(
            token_service,
            admin_auth_middleware,
        ));

    Router::new().route("/login", post(login)).merge(protected)
}

/// Create the admin module router for mounting at `/api/admin`.
pub fn admin_router(state: AdminAppState) -> Router<AdminAppState> {
    Router::new().nest("/admin", admin_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    use crate::adapters::http::middleware::AdminTokenService;
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

    fn test_state() -> AdminAppState {
        AdminAppState {
            token_service: Arc::new(AdminTokenService::new(
                Secret::new("a-sufficiently-long-secret".to_string()),
                3600,
            )),
            intake_store: Arc::new(NullIntakeStore),
        }
    }

    #[test]
    fn admin_routes_create_router() {
        let state = test_state();
        let router = admin_routes(state.clone());
        let _: Router<()> = router.with_state(state);
    }

    #[test]
    fn admin_router_nests_without_panic() {
        let state = test_state();
        let router = admin_router(state.clone());
        let _: Router<()> = router.with_state(state);
    }
}
