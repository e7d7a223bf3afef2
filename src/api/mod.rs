//! BillsWithFriends REST API
//!
//! Backend service the UI talks to (through the dev server proxy), built
//! with Axum.
//!
//! # Endpoints
//!
//! ## Bills
//! - `GET /` - Welcome message
//! - `GET /bills` - List bills, `?user_id=` filters by owner
//! - `POST /bills` - Create a bill
//! - `GET /bills/:id` - Get a bill
//! - `PUT /bills/:id` - Replace a bill
//! - `GET /bills/:id/items` - List items
//! - `POST /bills/:id/items` - Add an item
//! - `POST /bills/:id/calculate` - Compute the total in the background
//! - `POST /bills/:id/receipt` - Upload a receipt image
//!
//! ## Social accountability
//! - `GET /friends` - List friends
//! - `POST /friends` - Add a friend
//! - `DELETE /friends/:email` - Remove a friend
//! - `GET /leaderboard` - Leaderboard by points
//! - `POST /metrics` - Upsert a user's metrics
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use billswithfriends::api::{serve, ApiConfig, AppState};
//! use billswithfriends::bills::BillStore;
//! use billswithfriends::social::SocialStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bills = Arc::new(BillStore::new());
//!     let social = Arc::new(SocialStore::in_memory()?);
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(bills, social, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::signal::shutdown_signal;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_size;

    let bill_routes = Router::new()
        .route("/", get(routes::bills::list_bills).post(routes::bills::create_bill))
        .route("/:id", get(routes::bills::get_bill).put(routes::bills::update_bill))
        .route(
            "/:id/items",
            get(routes::bills::list_items).post(routes::bills::create_item),
        )
        .route("/:id/calculate", post(routes::bills::calculate_total))
        // Receipt uploads get their own body limit
        .route(
            "/:id/receipt",
            post(routes::receipt::upload_receipt).layer(DefaultBodyLimit::max(upload_limit)),
        );

    let social_routes = Router::new()
        .route(
            "/friends",
            get(routes::social::list_friends).post(routes::social::add_friend),
        )
        .route("/friends/:email", delete(routes::social::remove_friend))
        .route("/leaderboard", get(routes::social::leaderboard))
        .route("/metrics", post(routes::social::update_metrics));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::bills::home))
        .nest("/bills", bill_routes)
        .merge(social_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("BillsWithFriends API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("BillsWithFriends API shut down gracefully");
    Ok(())
}
