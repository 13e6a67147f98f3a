//! Pointer input
//!
//! The drag/resize state machine and the resize handle vocabulary shared with
//! the window chrome. Pointer coordinates are screen pixels, the same space
//! as window bounds.

mod capture;
mod controller;
mod handle;

pub use capture::{NoopCapture, PointerCapture};
pub use controller::{
    resize_bounds, BoundsUpdate, InteractionController, InteractionEnd, InteractionKind,
    InteractionState,
};
pub use handle::ResizeHandle;
