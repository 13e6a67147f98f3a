//! Window management module
//!
//! Provides window lifecycle, focus arbitration, z-order, and the queries
//! renderers paint from.

mod registry;
mod spec;
#[allow(clippy::module_inception)]
mod window;
mod zorder;

pub use registry::{WindowEvent, WindowRegistry};
pub use spec::{Capabilities, WindowSpec};
pub use window::{Window, WindowFlags};
pub use zorder::{ZOrder, BASE_Z_INDEX};

pub use crate::types::WindowId;
