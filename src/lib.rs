//! # BillsWithFriends
//!
//! Native side of BillsWithFriends, an app for splitting bills, planning
//! expenses and keeping friends accountable. The browser UI lives in the
//! `billswithfriends-ui` crate; this crate serves it and backs it.
//!
//! ## Modules
//!
//! - [`server`]: Dev server for the built UI with SPA fallback and API proxy
//! - [`proxy`]: Prefix rules and request forwarding to the backend
//! - [`api`]: Backend REST API with Axum
//! - [`bills`]: In-memory bill and item store
//! - [`social`]: SQLite-backed friends and leaderboard
//! - [`receipt`]: Receipt upload validation and text parsing
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use billswithfriends::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     billswithfriends::logging::init_tracing(&config.logging);
//!
//!     // Serves the UI on :5002 and forwards /bills etc. to the backend
//!     billswithfriends::server::serve(&config.server, &config.proxy).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bills;
pub mod config;
pub mod logging;
pub mod proxy;
pub mod receipt;
pub mod server;
pub mod signal;
pub mod social;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use bills::{Bill, BillStore, Item, NewItem, RecordId, StoreError, StoreResult, StoreStats};

pub use social::{
    AccountabilityMetrics, Friend, LeaderboardEntry, SocialError, SocialResult, SocialStore,
};

pub use receipt::{validate_upload, ImageFormat, ReceiptError, ReceiptLine, ReceiptParser};

pub use proxy::{Forwarder, ProxyError, ProxyRule, ProxyTable};

pub use server::{DevServerState, ServeError};

pub use config::{
    ApiConfig, Config, ConfigError, LoggingConfig, ProxyConfig, ProxyRuleConfig, ServerConfig,
    StorageConfig,
};
