//! AI Intake service binary.
//!
//! Loads configuration, wires adapters to ports, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use http::{HeaderValue, Method};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ai_intake::adapters::ai::{OpenAiOracle, OpenAiOracleConfig};
use ai_intake::adapters::http::middleware::AdminTokenService;
use ai_intake::adapters::http::{admin_router, interview_router, AdminAppState, InterviewAppState};
use ai_intake::adapters::postgres::PostgresIntakeStore;
use ai_intake::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting ai-intake"
    );

    // Database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let api_key = config
        .oracle
        .api_key
        .as_ref()
        .map(|k| k.expose_secret().clone())
        .unwrap_or_default();
    let oracle = Arc::new(OpenAiOracle::new(
        OpenAiOracleConfig::new(api_key)
            .with_model(config.oracle.model.clone())
            .with_base_url(config.oracle.base_url.clone())
            .with_timeout(config.oracle.timeout()),
    ));
    let intake_store = Arc::new(PostgresIntakeStore::new(pool));
    let token_service = Arc::new(AdminTokenService::from_config(&config.admin));

    // Routers
    let interview_state = InterviewAppState {
        oracle: oracle.clone(),
        intake_store: intake_store.clone(),
    };
    let admin_state = AdminAppState {
        token_service,
        intake_store,
    };

    let cors = build_cors_layer(&config);

    let app = Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(interview_router().with_state(interview_state))
                .merge(admin_router(admin_state.clone()).with_state(admin_state)),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health - liveness probe.
async fn health() -> &'static str {
    "ok"
}

fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}
