//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not
//! domain records themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bills::RecordId;

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response to `POST /bills`
#[derive(Debug, Serialize, Deserialize)]
pub struct BillCreatedResponse {
    pub id: RecordId,
    pub message: String,
}

/// Response to `POST /bills/:id/items`
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemCreatedResponse {
    pub item_id: RecordId,
    pub message: String,
}

/// Response to `POST /bills/:id/receipt`
#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptResponse {
    pub message: String,
    /// Echoed from the path as given
    pub bill_id: String,
}

/// Query string for `GET /bills`
#[derive(Debug, Default, Deserialize)]
pub struct BillListQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded"
    pub status: String,
    /// Social database status: "ok" or "error"
    pub database: String,
    /// Number of bills held in memory
    pub bills: usize,
    /// Number of items across all bills
    pub items: usize,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
}
