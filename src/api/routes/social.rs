//! Social Accountability Routes
//!
//! - GET /friends - List friends
//! - POST /friends - Add a friend
//! - DELETE /friends/:email - Remove a friend
//! - GET /leaderboard - Entries ordered by points, highest first
//! - POST /metrics - Insert or update a user's metrics

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::MessageResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::social::{Friend, LeaderboardEntry};

/// GET /friends
pub async fn list_friends(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Friend>>> {
    Ok(Json(state.social.list_friends()?))
}

/// POST /friends
pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    Json(friend): Json<Friend>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.social.add_friend(&friend)?;
    tracing::info!(email = %friend.email, "Added friend");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Friend added successfully!")),
    ))
}

/// DELETE /friends/:email
///
/// Succeeds whether or not the friend existed.
pub async fn remove_friend(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let removed = state.social.remove_friend(&email)?;
    tracing::info!(email = %email, removed, "Removed friend");
    Ok(Json(MessageResponse::new("Friend removed successfully!")))
}

/// GET /leaderboard
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.social.leaderboard()?))
}

/// POST /metrics
pub async fn update_metrics(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<LeaderboardEntry>,
) -> ApiResult<Json<MessageResponse>> {
    state.social.upsert_metrics(&entry)?;
    tracing::info!(user = %entry.user, points = entry.metrics.points, "Updated metrics");
    Ok(Json(MessageResponse::new("Metrics updated successfully!")))
}
