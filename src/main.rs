//! tally-service server entry point.
//!
//! Connects to PostgreSQL, ensures the counter exists, then starts the
//! Axum HTTP server.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tally_service::api;
use tally_service::app_state::AppState;
use tally_service::config::ServiceConfig;
use tally_service::persistence::CounterStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServiceConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting tally-service");

    // Build the connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;

    // Ensure the counter table and singleton row exist before serving.
    // A failure here is fatal: the server must not accept requests
    // against an uninitialized store.
    let store = CounterStore::new(pool);
    store.initialize().await?;

    // Build application state
    let app_state = AppState { store };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(base_url = %format!("http://{}/api", config.listen_addr), "API available");

    axum::serve(listener, app).await?;

    Ok(())
}
