//! Error types for editor sessions

use sparsedit_io::IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No reconstruction loaded")]
    NoReconstruction,

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
