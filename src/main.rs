//! NetShare server: WiFi network and file sharing between users.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use netshare_core::config::AppConfig;
use netshare_core::error::AppError;
use netshare_database::DatabasePool;
use netshare_storage::LocalStorageProvider;

#[tokio::main]
async fn main() {
    let env = std::env::var("NETSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting NetShare v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let database = DatabasePool::connect(&config.database).await?;
    netshare_database::migration::run_migrations(database.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Storage ──────────────────────────────────────────────────
    let storage = LocalStorageProvider::new(&config.storage.root_path).await?;
    tracing::info!(root = %config.storage.root_path, "Local storage ready");

    let state = netshare_api::build_state(config, database.pool().clone(), Arc::new(storage));
    let result = netshare_api::run_server(state).await;

    database.close().await;
    result
}
