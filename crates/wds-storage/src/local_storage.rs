//! Browser `localStorage` backend for WASM targets.
//!
//! Blobs are written as plain strings under their key. The storage handle is
//! looked up on every call so a store built before the page finished loading
//! still works once `window.localStorage` is available.

use crate::error::StorageError;
use crate::BlobStore;

/// Blob store backed by `window.localStorage`.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageBlobStore {
    /// Optional key prefix, for hosting several shells on one origin
    prefix: String,
}

impl LocalStorageBlobStore {
    /// Create a store that writes keys unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that prepends `prefix` to every key.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::unavailable("no window object"))?;
        window
            .local_storage()
            .map_err(|e| StorageError::unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::unavailable("localStorage is disabled"))
    }
}

impl BlobStore for LocalStorageBlobStore {
    fn write_blob(&self, key: &str, json: &str) -> Result<(), StorageError> {
        let key = self.full_key(key);
        self.storage()?.set_item(&key, json).map_err(|e| {
            let msg = format!("{:?}", e);
            if msg.contains("QuotaExceeded") {
                StorageError::QuotaExceeded { key: key.clone() }
            } else {
                StorageError::backend(msg)
            }
        })
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(&self.full_key(key))
            .map_err(|e| StorageError::backend(format!("{:?}", e)))
    }

    fn remove_blob(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.full_key(key))
            .map_err(|e| StorageError::backend(format!("{:?}", e)))
    }
}
