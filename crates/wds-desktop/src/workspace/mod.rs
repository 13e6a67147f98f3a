//! Workspace coordination
//!
//! Flat list of workspaces with exactly one current, the overview mode flag,
//! and the operations that keep window membership and visibility in step
//! with them.

mod manager;
#[allow(clippy::module_inception)]
mod workspace;

pub use manager::{WorkspaceEvent, WorkspaceManager};
pub use workspace::Workspace;

pub use crate::types::WorkspaceId;
