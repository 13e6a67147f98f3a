//! Blob storage for the web desktop shell
//!
//! The desktop core persists exactly one thing: the session snapshot, a JSON
//! document stored under a string key. This crate defines that contract and
//! the backends that fulfil it:
//!
//! - [`BlobStore`]: the key/value interface consumed by the desktop core
//! - [`MemoryBlobStore`]: in-process store for tests and headless hosts
//! - `LocalStorageBlobStore`: browser `localStorage` backend (`wasm` feature)
//!
//! # Design Principles
//!
//! 1. **String in, string out**: the store never inspects the JSON it holds
//! 2. **Interior mutability**: stores take `&self`, like the browser APIs
//!    they wrap, so a single store can be shared by several owners
//! 3. **Typed failures**: every backend error maps onto [`StorageError`]

pub mod error;
#[cfg(feature = "wasm")]
pub mod local_storage;
pub mod memory;

pub use error::StorageError;
#[cfg(feature = "wasm")]
pub use local_storage::LocalStorageBlobStore;
pub use memory::MemoryBlobStore;

/// Key/value blob store.
///
/// Values are opaque JSON strings. A missing key is `Ok(None)`, not an error.
pub trait BlobStore {
    /// Write (create or overwrite) the blob stored under `key`.
    fn write_blob(&self, key: &str, json: &str) -> Result<(), StorageError>;

    /// Read the blob stored under `key`.
    fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Remove the blob stored under `key`. Removing a missing key succeeds.
    fn remove_blob(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn write_blob(&self, key: &str, json: &str) -> Result<(), StorageError> {
        (**self).write_blob(key, json)
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read_blob(key)
    }

    fn remove_blob(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_blob(key)
    }
}
