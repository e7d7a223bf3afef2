//! BillsWithFriends dev server
//!
//! Serves the built UI bundle on port 5002 and forwards `/bills`,
//! `/friends`, `/leaderboard` and `/metrics` to the backend.
//!
//! Run with: cargo run --bin billswithfriends
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (see
//! `billswithfriends-cli config`), then applies environment overrides:
//! - `BWF_SERVER_HOST` / `BWF_SERVER_PORT`: Bind address (default: 0.0.0.0:5002)
//! - `BWF_STATIC_DIR`: Built UI directory (default: billswithfriends-ui/dist)
//! - `BWF_BACKEND_URL`: Backend for every proxy rule (default: http://10.206.104.164:8000)
//! - `RUST_LOG`: Log filter (default: billswithfriends=info)

use anyhow::Context;
use billswithfriends::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    billswithfriends::logging::init_tracing(&config.logging);

    tracing::info!(
        "Starting BillsWithFriends dev server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Static directory: {}", config.server.static_dir);

    billswithfriends::server::serve(&config.server, &config.proxy)
        .await
        .context("dev server failed")?;

    tracing::info!("BillsWithFriends dev server stopped");
    Ok(())
}
