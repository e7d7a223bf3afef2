//! Receipts
//!
//! Upload validation for receipt images and a parser for receipt text
//! (as produced by OCR) into billable rows.

pub mod error;
pub mod parser;
pub mod upload;

pub use error::ReceiptError;
pub use parser::{write_csv, ReceiptLine, ReceiptParser};
pub use upload::{validate_upload, ImageFormat};
