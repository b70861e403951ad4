//! Error types for I/O operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Cannot open {} for reading: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open {} for writing: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Read error in {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write error in {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    /// Path of the file the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            IoError::Open { path, .. }
            | IoError::Create { path, .. }
            | IoError::Read { path, .. }
            | IoError::Write { path, .. } => path,
        }
    }
}

/// Result type alias for I/O operations
pub type Result<T> = std::result::Result<T, IoError>;
