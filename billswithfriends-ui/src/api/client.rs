//! HTTP API Client
//!
//! Functions for talking to the BillsWithFriends backend. URLs are
//! relative: the dev server forwards `/bills`, `/friends`, `/leaderboard`
//! and `/metrics` to the backend, so the browser only ever sees one origin.

use gloo_net::http::{Request, Response};
use std::collections::BTreeMap;

/// Identifier the backend assigns to bills and items
pub type RecordId = u64;

// ============ Response Types ============

/// Bills are free-form on the backend, so every field may hold any JSON
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<serde_json::Value>,
}

impl Bill {
    pub fn name(&self) -> String {
        display(self.name.as_ref())
    }

    pub fn owner(&self) -> String {
        display(self.user_id.as_ref())
    }

    pub fn total(&self) -> Option<f64> {
        self.total.as_ref().and_then(serde_json::Value::as_f64)
    }
}

fn display(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Item {
    pub item_id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    pub cost: f64,
    #[serde(default)]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Friend {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Metrics {
    pub points: i64,
    pub days_late: i64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LeaderboardEntry {
    pub user: String,
    pub metrics: Metrics,
}

#[derive(Debug, serde::Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct BillCreated {
    id: RecordId,
}

#[derive(Debug, serde::Deserialize)]
struct ItemCreated {
    item_id: RecordId,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: ErrorBody,
}

// ============ Helpers ============

/// Turn a non-2xx response into the backend's error message
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("Request failed with status {}", status),
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

fn network(e: gloo_net::Error) -> String {
    format!("Network error: {}", e)
}

fn build(e: gloo_net::Error) -> String {
    format!("Request build error: {}", e)
}

// ============ Bills ============

/// Fetch bills keyed by id, optionally only those owned by `user_id`
pub async fn fetch_bills(user_id: Option<&str>) -> Result<BTreeMap<RecordId, Bill>, String> {
    let mut request = Request::get("/bills");
    if let Some(user_id) = user_id.filter(|u| !u.is_empty()) {
        request = request.query([("user_id", user_id)]);
    }
    let response = request.send().await.map_err(network)?;
    parse(response).await
}

/// Create a bill and return its id
pub async fn create_bill(name: &str, user_id: &str) -> Result<RecordId, String> {
    let bill = Bill {
        name: Some(name.into()),
        user_id: Some(user_id.into()),
        total: None,
    };

    let response = Request::post("/bills")
        .json(&bill)
        .map_err(build)?
        .send()
        .await
        .map_err(network)?;

    let created: BillCreated = parse(response).await?;
    Ok(created.id)
}

pub async fn fetch_bill(id: RecordId) -> Result<Bill, String> {
    let response = Request::get(&format!("/bills/{}", id))
        .send()
        .await
        .map_err(network)?;
    parse(response).await
}

pub async fn fetch_items(bill_id: RecordId) -> Result<Vec<Item>, String> {
    let response = Request::get(&format!("/bills/{}/items", bill_id))
        .send()
        .await
        .map_err(network)?;
    parse(response).await
}

/// Add an item; `cost` is the line total
pub async fn add_item(
    bill_id: RecordId,
    name: &str,
    cost: f64,
    quantity: Option<u32>,
) -> Result<RecordId, String> {
    #[derive(serde::Serialize)]
    struct NewItem<'a> {
        name: &'a str,
        cost: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        quantity: Option<u32>,
    }

    let response = Request::post(&format!("/bills/{}/items", bill_id))
        .json(&NewItem {
            name,
            cost,
            quantity,
        })
        .map_err(build)?
        .send()
        .await
        .map_err(network)?;

    let created: ItemCreated = parse(response).await?;
    Ok(created.item_id)
}

/// Ask the backend to total the bill. The total appears on the bill later.
pub async fn calculate_total(bill_id: RecordId) -> Result<String, String> {
    let response = Request::post(&format!("/bills/{}/calculate", bill_id))
        .send()
        .await
        .map_err(network)?;
    let body: MessageResponse = parse(response).await?;
    Ok(body.message)
}

/// Upload a receipt image as the multipart `file` part
pub async fn upload_receipt(bill_id: RecordId, file: web_sys::File) -> Result<String, String> {
    let form = web_sys::FormData::new().map_err(|_| "Could not create form data".to_string())?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| "Could not attach the receipt".to_string())?;

    let response = Request::post(&format!("/bills/{}/receipt", bill_id))
        .body(form)
        .map_err(build)?
        .send()
        .await
        .map_err(network)?;

    let body: MessageResponse = parse(response).await?;
    Ok(body.message)
}

// ============ Social accountability ============

pub async fn fetch_friends() -> Result<Vec<Friend>, String> {
    let response = Request::get("/friends").send().await.map_err(network)?;
    parse(response).await
}

pub async fn add_friend(name: &str, email: &str) -> Result<String, String> {
    let response = Request::post("/friends")
        .json(&Friend {
            name: name.to_string(),
            email: email.to_string(),
        })
        .map_err(build)?
        .send()
        .await
        .map_err(network)?;

    let body: MessageResponse = parse(response).await?;
    Ok(body.message)
}

pub async fn remove_friend(email: &str) -> Result<String, String> {
    let encoded = String::from(js_sys::encode_uri_component(email));
    let response = Request::delete(&format!("/friends/{}", encoded))
        .send()
        .await
        .map_err(network)?;

    let body: MessageResponse = parse(response).await?;
    Ok(body.message)
}

/// Leaderboard, highest points first
pub async fn fetch_leaderboard() -> Result<Vec<LeaderboardEntry>, String> {
    let response = Request::get("/leaderboard").send().await.map_err(network)?;
    parse(response).await
}

pub async fn update_metrics(entry: &LeaderboardEntry) -> Result<String, String> {
    let response = Request::post("/metrics")
        .json(entry)
        .map_err(build)?
        .send()
        .await
        .map_err(network)?;

    let body: MessageResponse = parse(response).await?;
    Ok(body.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bills_keyed_by_id() {
        let json = r#"{"1": {"name": "Dinner", "user_id": "alice"}, "2": {"total": 12.5}}"#;
        let bills: BTreeMap<RecordId, Bill> = serde_json::from_str(json).unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[&1].owner(), "alice");
        assert_eq!(bills[&2].total(), Some(12.5));
    }

    #[test]
    fn test_bill_fields_of_any_type() {
        let json = r#"{"1": {"name": "Dinner", "user_id": 7, "total": "n/a"}}"#;
        let bills: BTreeMap<RecordId, Bill> = serde_json::from_str(json).unwrap();
        assert_eq!(bills[&1].name(), "Dinner");
        assert_eq!(bills[&1].owner(), "7");
        assert_eq!(bills[&1].total(), None);
    }

    #[test]
    fn test_item_ignores_extra_fields() {
        let json = r#"{"item_id": 3, "name": "Soda", "cost": 2.5, "note": "diet"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_id, 3);
        assert_eq!(item.quantity, None);
    }

    #[test]
    fn test_error_body() {
        let json = r#"{"error": {"code": "BILL_NOT_FOUND", "message": "Bill not found"}, "request_id": "x"}"#;
        let body: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.message, "Bill not found");
    }
}
