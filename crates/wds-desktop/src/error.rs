//! Error types for the desktop shell
//!
//! Public window and workspace operations do not return these: a stale id or
//! a refused guard is a normal outcome reported as `bool`/`Option`. These
//! errors cover the fallible plumbing underneath (snapshot encoding, storage)
//! and are logged and swallowed at the engine boundary.

use thiserror::Error;
use wds_storage::StorageError;

/// Errors that can occur in desktop shell operations
#[derive(Debug, Error)]
pub enum DesktopError {
    /// A snapshot decoded but describes an impossible desktop
    #[error("invalid session snapshot: {0}")]
    InvalidSnapshot(&'static str),

    /// A snapshot is older than the configured maximum age
    #[error("session snapshot is stale ({age_minutes} minutes old)")]
    StaleSession {
        /// Age of the snapshot when it was read
        age_minutes: i64,
    },

    /// JSON serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blob store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;
