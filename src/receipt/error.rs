//! Receipt error types

use thiserror::Error;

/// Errors from receipt uploads and parsing
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// Multipart request had no `file` part
    #[error("No file part in the request")]
    MissingFile,

    /// `file` part present but with an empty filename
    #[error("No selected file")]
    EmptyFilename,

    /// Filename does not end in jpg, jpeg or png
    #[error("Invalid file format")]
    UnsupportedFormat,

    /// Bytes are not a decodable JPEG or PNG
    #[error("Failed to process the image: {0}")]
    InvalidImage(String),

    /// A parser pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Writing CSV output failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
