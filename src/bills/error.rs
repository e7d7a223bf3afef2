//! Bill store error types

use thiserror::Error;

/// Errors returned by the bill store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No bill with this id
    #[error("Bill not found")]
    BillNotFound,

    /// Item payload rejected
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

/// Result type for bill store operations
pub type StoreResult<T> = Result<T, StoreError>;
