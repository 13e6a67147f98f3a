//! Error types for blob storage.

use thiserror::Error;

/// Errors from blob store operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store could not be reached (e.g. storage disabled by the browser)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write because it is full
    #[error("storage quota exceeded for key '{key}'")]
    QuotaExceeded {
        /// Key that was being written
        key: String,
    },

    /// Any other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Create an unavailable error with message.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a backend error with message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
