//! Bill Routes
//!
//! - GET /bills - List bills (optionally `?user_id=`)
//! - POST /bills - Create a bill
//! - GET /bills/:id - Get a bill
//! - PUT /bills/:id - Replace a bill
//! - GET /bills/:id/items - List a bill's items
//! - POST /bills/:id/items - Add an item to a bill
//! - POST /bills/:id/calculate - Start total calculation in the background

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::{BillCreatedResponse, BillListQuery, ItemCreatedResponse, MessageResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::bills::{Bill, Item, NewItem, RecordId, StoreError};

/// Path ids that are not canonical decimal numbers name no bill
fn parse_bill_id(raw: &str) -> ApiResult<RecordId> {
    raw.parse::<RecordId>()
        .ok()
        .filter(|id| id.to_string() == raw)
        .ok_or(ApiError::Store(StoreError::BillNotFound))
}

/// GET /
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the Bill Splitter API!"))
}

/// GET /bills
///
/// Bills keyed by id.
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BillListQuery>,
) -> Json<BTreeMap<RecordId, Bill>> {
    Json(state.bills.list_bills(query.user_id.as_deref()).await)
}

/// POST /bills
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    Json(bill): Json<Bill>,
) -> (StatusCode, Json<BillCreatedResponse>) {
    let id = state.bills.create_bill(bill).await;
    tracing::info!(bill_id = id, "Created bill");

    (
        StatusCode::CREATED,
        Json(BillCreatedResponse {
            id,
            message: "Bill created successfully".to_string(),
        }),
    )
}

/// GET /bills/:id
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Bill>> {
    let id = parse_bill_id(&id)?;
    Ok(Json(state.bills.get_bill(id).await?))
}

/// PUT /bills/:id
pub async fn update_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(bill): Json<Bill>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_bill_id(&id)?;
    state.bills.update_bill(id, bill).await?;
    tracing::info!(bill_id = id, "Updated bill");
    Ok(Json(MessageResponse::new("Bill updated successfully")))
}

/// GET /bills/:id/items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Item>>> {
    let id = parse_bill_id(&id)?;
    Ok(Json(state.bills.list_items(id).await?))
}

/// POST /bills/:id/items
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(item): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<ItemCreatedResponse>)> {
    let id = parse_bill_id(&id)?;
    let item_id = state.bills.add_item(id, item).await?;
    tracing::info!(bill_id = id, item_id, "Created item");

    Ok((
        StatusCode::CREATED,
        Json(ItemCreatedResponse {
            item_id,
            message: "Item created successfully".to_string(),
        }),
    ))
}

/// POST /bills/:id/calculate
///
/// Responds 202 immediately; the total lands on the bill once the
/// background task finishes.
pub async fn calculate_total(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let id = parse_bill_id(&id)?;
    if !state.bills.contains_bill(id).await {
        return Err(StoreError::BillNotFound.into());
    }

    let bills = Arc::clone(&state.bills);
    tokio::spawn(async move {
        if let Err(e) = bills.calculate_total(id).await {
            tracing::warn!(bill_id = id, error = %e, "Total calculation failed");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Calculation started")),
    ))
}
