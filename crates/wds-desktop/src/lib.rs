//! Window management core for the web desktop shell
//!
//! This crate provides the state behind a browser-hosted desktop:
//! - Window management (open, close, focus, minimize/maximize, z-order)
//! - Geometry constraints and edge snapping
//! - Drag and resize state machine with aero-snap on release
//! - Workspaces (membership, switching, overview mode)
//! - Session snapshot, restore and autosave
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Core geometry types (`Vec2`, `Size`, `Rect`)
//! - [`geometry`]: Pure constraint and snapping functions
//! - [`window`]: Window registry, z-order counter, window records
//! - [`input`]: Drag/resize controller and resize handles
//! - [`workspace`]: Workspace coordinator
//! - [`persistence`]: Session snapshot and autosave schedule
//! - [`overview`]: Overview screen model
//!
//! [`DesktopEngine`] composes them and is what hosts talk to.
//!
//! ## Example
//!
//! ```rust
//! use wds_desktop::{DesktopEngine, ShellConfig, WindowSpec};
//!
//! let mut engine = DesktopEngine::new(ShellConfig::default());
//! let id = engine.open_window(WindowSpec::new("calc", "Calculator"));
//!
//! assert_eq!(engine.windows.focused().map(|w| w.id), Some(id));
//! assert_eq!(engine.frames().len(), 1);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without a browser
//! 2. **Single Source of Truth**: Window fields change only through the registry's API
//! 3. **Injected Time and Storage**: Clock and blob store are traits, so tests are deterministic
//! 4. **Stale Ids Are Normal**: Operations on vanished windows are no-ops, not errors

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod observer;
pub mod overview;
pub mod persistence;
pub mod types;
pub mod window;
pub mod workspace;

mod engine;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ShellConfig, SESSION_KEY};
pub use engine::{DesktopEngine, WindowFrame};
pub use error::{DesktopError, DesktopResult};
pub use geometry::{constrain, snap_edges, snap_zone, SnapZone};
pub use input::{
    BoundsUpdate, InteractionController, InteractionEnd, InteractionKind, InteractionState,
    NoopCapture, PointerCapture, ResizeHandle,
};
pub use math::{Rect, Size, Vec2};
pub use observer::{SubscriptionId, Subscribers};
pub use overview::{OverviewModel, OverviewWindow, OverviewWorkspace};
pub use persistence::{Autosave, SessionSnapshot};
pub use types::{WindowId, WorkspaceId};
pub use window::{
    Capabilities, Window, WindowEvent, WindowFlags, WindowRegistry, WindowSpec, ZOrder,
};
pub use workspace::{Workspace, WorkspaceEvent, WorkspaceManager};

pub use wds_storage::{BlobStore, MemoryBlobStore, StorageError};
