//! BillsWithFriends API Server
//!
//! Run with: cargo run --bin billswithfriends-api
//!
//! # Configuration
//!
//! Environment variables:
//! - `BWF_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `BWF_API_PORT`: Port to listen on (default: 8000)
//! - `BWF_DB_PATH`: SQLite file for friends and the leaderboard
//! - `BWF_LOG_LEVEL` / `BWF_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full log filter, overrides `BWF_LOG_LEVEL`

use anyhow::Context;
use billswithfriends::api::{serve, AppState};
use billswithfriends::bills::BillStore;
use billswithfriends::config::Config;
use billswithfriends::social::SocialStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    billswithfriends::logging::init_tracing(&config.logging);

    tracing::info!(
        "Starting BillsWithFriends API server v{}",
        env!("CARGO_PKG_VERSION")
    );

    tracing::info!("Social database: {}", config.storage.db_path);
    let social = SocialStore::open(&config.storage.db_path)
        .with_context(|| format!("opening social database {}", config.storage.db_path))?;
    tracing::info!("Social database ready");

    let bills = Arc::new(BillStore::new());
    let state = AppState::new(Arc::clone(&bills), Arc::new(social), config.api.clone());

    serve(state, &config.api).await.context("API server failed")?;

    let stats = bills.stats().await;
    tracing::info!(
        bills = stats.bills,
        items = stats.items,
        "BillsWithFriends API server stopped"
    );

    Ok(())
}
