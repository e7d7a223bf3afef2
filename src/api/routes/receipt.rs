//! Receipt Routes
//!
//! - POST /bills/:id/receipt - Upload a receipt image (multipart `file` part)

use axum::{
    extract::{Multipart, Path},
    Json,
};

use crate::api::dto::ReceiptResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::receipt::{validate_upload, ReceiptError};

/// POST /bills/:id/receipt
pub async fn upload_receipt(
    Path(bill_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<ReceiptResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?;

        let format = validate_upload(&filename, &bytes)?;
        tracing::info!(
            bill_id = %bill_id,
            filename = %filename,
            format = ?format,
            size = bytes.len(),
            "Receipt processed"
        );

        return Ok(Json(ReceiptResponse {
            message: "Receipt processed successfully".to_string(),
            bill_id,
        }));
    }

    Err(ReceiptError::MissingFile.into())
}
