//! Error types for sparsedit

use thiserror::Error;

/// Main error type for sparsedit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for sparsedit operations
pub type Result<T> = std::result::Result<T, Error>;
