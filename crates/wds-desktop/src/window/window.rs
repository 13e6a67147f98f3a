//! Window state

use serde::{Deserialize, Serialize};

use super::spec::Capabilities;
use crate::math::{Rect, Size};
use crate::types::{WindowId, WorkspaceId};

/// Window state and capability flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowFlags {
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    pub visible: bool,
    pub resizable: bool,
    pub movable: bool,
    pub closable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl WindowFlags {
    /// Fresh flags for a newly opened window
    pub fn opened(capabilities: Capabilities, visible: bool) -> Self {
        Self {
            minimized: false,
            maximized: false,
            focused: false,
            visible,
            resizable: capabilities.resizable,
            movable: capabilities.movable,
            closable: capabilities.closable,
            minimizable: capabilities.minimizable,
            maximizable: capabilities.maximizable,
        }
    }

    /// Capability subset of these flags
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            resizable: self.resizable,
            movable: self.movable,
            closable: self.closable,
            minimizable: self.minimizable,
            maximizable: self.maximizable,
        }
    }
}

/// One open application instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    /// Stored (restored) bounds; renderers substitute the usable screen while maximized
    pub bounds: Rect,
    pub flags: WindowFlags,
    /// Paint order, higher on top
    pub z_index: u32,
    pub workspace: WorkspaceId,
    pub min_size: Size,
    #[serde(default)]
    pub max_size: Option<Size>,
}

impl Window {
    /// Window is on screen: visible and not minimized
    pub fn is_shown(&self) -> bool {
        self.flags.visible && !self.flags.minimized
    }

    /// Rectangle the window occupies when painted
    pub fn display_rect(&self, screen: Rect) -> Rect {
        if self.flags.maximized {
            screen
        } else {
            self.bounds
        }
    }
}
