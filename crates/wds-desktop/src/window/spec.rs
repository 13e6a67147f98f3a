//! Window open request

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};
use crate::types::{WindowId, WorkspaceId};

/// What the window chrome lets the user do with a window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub resizable: bool,
    pub movable: bool,
    pub closable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            resizable: true,
            movable: true,
            closable: true,
            minimizable: true,
            maximizable: true,
        }
    }
}

/// Request to open a window
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowSpec {
    /// Explicit id, used when restoring a session so ids survive a reload
    pub id: Option<WindowId>,
    /// Application hosted by the window
    pub app_id: String,
    /// Title bar text
    pub title: String,
    /// Initial bounds; default bounds with a cascade offset when `None`
    pub bounds: Option<Rect>,
    /// Owning workspace; the active workspace when `None`
    pub workspace: Option<WorkspaceId>,
    /// Minimum size; the shell default when `None`
    pub min_size: Option<Size>,
    /// Maximum size; unbounded when `None`
    pub max_size: Option<Size>,
    pub capabilities: Capabilities,
}

impl WindowSpec {
    /// Create a request for `app_id` titled `title`
    pub fn new(app_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: WindowId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn on_workspace(mut self, workspace: WorkspaceId) -> Self {
        self.workspace = Some(workspace);
        self
    }

    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn with_max_size(mut self, size: Size) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
