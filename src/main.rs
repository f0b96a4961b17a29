use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, ServerConfig};
use trends_core::CoreConfig;

/// Main entry point for the Trends application
///
/// Opens the configured document store and serves the REST API with its OpenAPI documentation.
///
/// # Environment Variables
/// - `TRENDS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRENDS_STORE`: `file` or `memory` (default: "file")
/// - `TRENDS_DATA_DIR`: Directory for the file store (default: "trends_data")
/// - `TRENDS_API_USER` / `TRENDS_API_PASSWORD`: Basic auth credentials for `/v1/api`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the store cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trends_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("trends_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_cfg = ServerConfig::from_env_values(
        std::env::var("TRENDS_REST_ADDR").ok(),
        std::env::var("TRENDS_API_USER").ok(),
        std::env::var("TRENDS_API_PASSWORD").ok(),
    )?;
    let core_cfg = CoreConfig::from_env_values(
        std::env::var("TRENDS_DATA_DIR").ok(),
        std::env::var("TRENDS_STORE").ok(),
    )?;

    let store = core_cfg.open_store()?;
    let app = api_rest::app(AppState::new(store, server_cfg.credentials().cloned()));

    tracing::info!("++ Starting Trends REST on {}", server_cfg.rest_addr());

    let listener = tokio::net::TcpListener::bind(server_cfg.rest_addr()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("-- Shutting down Trends REST");
}
