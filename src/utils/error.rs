// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error

    #[error("Site rate limit likely exceeded")]
    RateLimited,

    #[error("Could not find page: {0}")]
    PageNotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// A structural anchor the whole document depends on is absent.
    #[error("Required anchor missing: {0}")]
    MissingAnchor(String),

    /// A ratings row failed coercion and was diverted.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized archive file name: {0}")]
    UnrecognizedFileName(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Fetching failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
