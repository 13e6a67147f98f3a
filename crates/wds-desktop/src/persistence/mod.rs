//! Session persistence
//!
//! Snapshot encoding, restore, and the autosave schedule. Storage itself is
//! the blob store's business; nothing here touches the browser.

mod autosave;
mod snapshot;

pub use autosave::Autosave;
pub use snapshot::{SessionSnapshot, SNAPSHOT_VERSION};
