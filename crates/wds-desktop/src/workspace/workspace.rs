//! Workspace record

use serde::{Deserialize, Serialize};

use crate::types::{WindowId, WorkspaceId};

/// A named group of windows, shown one group at a time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    /// Member windows, by id. Mirrors each window's `workspace` field.
    #[serde(default)]
    pub windows: Vec<WindowId>,
    /// True for the current workspace only
    #[serde(default)]
    pub active: bool,
}

impl Workspace {
    /// Create an empty, inactive workspace
    pub fn new(id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            windows: Vec::new(),
            active: false,
        }
    }

    /// Name given to a workspace created without one
    pub fn default_name(id: WorkspaceId) -> String {
        format!("Workspace {}", id)
    }

    /// Add a window to this workspace
    pub fn add_window(&mut self, window_id: WindowId) {
        if !self.windows.contains(&window_id) {
            self.windows.push(window_id);
        }
    }

    /// Remove a window from this workspace
    pub fn remove_window(&mut self, window_id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|&id| id != window_id);
        self.windows.len() != before
    }

    /// Check if workspace contains a window
    pub fn contains_window(&self, window_id: WindowId) -> bool {
        self.windows.contains(&window_id)
    }
}
