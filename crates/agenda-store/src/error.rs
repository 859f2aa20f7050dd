//! Error types for storage and the repository

use agenda_core::{RequestId, ValidationError};
use std::path::PathBuf;

/// Key-value backend failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on a backing file
    #[error("io error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped to a storage location
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Repository operation failures
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No request with this id
    #[error("request not found: {0}")]
    NotFound(RequestId),

    /// Backend failed while persisting
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot could not be encoded
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RepositoryError {
    /// Check whether the error is a lookup miss
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Workflow service failures
#[derive(Debug, thiserror::Error)]
pub enum AgendaError {
    /// Draft rejected before storage
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Repository failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AgendaError {
    /// Check whether the error is a lookup miss
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }
}
