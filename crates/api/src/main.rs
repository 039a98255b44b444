use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::info;

use persistence::{DynSheetStore, JsonFileStore, MemorySheetStore};

mod app;
mod config;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Sheetgate v{}", env!("CARGO_PKG_VERSION"));

    // Open the configured workbook backend
    let store: DynSheetStore = match config.store.backend.as_str() {
        "memory" => Arc::new(MemorySheetStore::new()),
        "json" => Arc::new(JsonFileStore::open(&config.store.path).await?),
        other => bail!("unknown store backend: {other}"),
    };

    // Build application
    let app = app::create_app(config.clone(), store);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
