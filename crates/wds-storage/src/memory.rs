//! In-memory blob store.
//!
//! Clones share the same backing map, which lets a test drop one desktop
//! engine and build another against the "same browser storage".

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::StorageError;
use crate::BlobStore;

/// In-memory blob store.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    /// Blob storage (key -> json)
    blobs: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryBlobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.borrow().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.borrow().is_empty()
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.blobs.borrow().contains_key(key)
    }
}

impl BlobStore for MemoryBlobStore {
    fn write_blob(&self, key: &str, json: &str) -> Result<(), StorageError> {
        tracing::trace!(key, bytes = json.len(), "memory store write");
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn remove_blob(&self, key: &str) -> Result<(), StorageError> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}
