use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobstore_api::app::build_app;
use jobstore_api::config::ServerConfig;
use jobstore_api::state::AppState;
use jobstore_db::config::DbConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobstore_api=debug,jobstore_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let db_config = DbConfig::from_env().context("Invalid job store configuration")?;
    tracing::info!(backend = ?db_config.backend, "Loaded job store configuration");

    // --- Job store ---
    let jobs = jobstore_db::open_job_repository(&db_config)
        .await
        .context("Failed to open job store")?;

    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST")?,
        config.port,
    );

    let state = AppState {
        jobs,
        config: Arc::new(config),
    };
    let app = build_app(state);

    tracing::info!("Starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
