mod api;
mod app_state;
mod config;
mod core;
mod domain;
mod errors;
mod logging;
mod routes;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app_state::build_app_state;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_tracing(&config)?;

    if !config.logs_dir.is_dir() {
        warn!(
            "Logs directory {} does not exist yet; listings will return 404 until it does",
            config.logs_dir.display()
        );
    }

    let bind_address = config.bind_address();
    let logs_dir = config.logs_dir.clone();
    let state = build_app_state(config);
    let app = routes::app_router(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;

    info!("🚀 Log viewer running on http://{}", bind_address);
    info!("📁 Serving log files from {}", logs_dir.display());
    info!("💡 API endpoints: /api/logs and /api/logs/{{filename}}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
