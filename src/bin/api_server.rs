// API Server Binary Entry Point
//
// Purpose: Start the Axum API server for inventory ABC analyses
// Usage: cargo run --features api --bin api_server

use inventory_ranker::config::ServerConfig;
use inventory_ranker::telemetry;
use inventory_ranker::{create_router, AppState};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    telemetry::init(telemetry::DEFAULT_FILTER)?;

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!(
        "  DATA_DIR: {}",
        config
            .data_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "(in-memory)".to_string())
    );
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  MAX_ITEMS: {}", config.max_items);
    tracing::info!("  CACHE_TTL_SECS: {}", config.cache_ttl.as_secs());

    let state = AppState::new(&config)?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
