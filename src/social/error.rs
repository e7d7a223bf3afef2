//! Social store error types

use thiserror::Error;

/// Errors from the friends and leaderboard store
#[derive(Error, Debug)]
pub enum SocialError {
    /// Payload failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A friend with this email already exists
    #[error("Friend already exists: {0}")]
    DuplicateFriend(String),

    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Could not create the database directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection mutex poisoned by a panicking handler
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type for social store operations
pub type SocialResult<T> = Result<T, SocialError>;
