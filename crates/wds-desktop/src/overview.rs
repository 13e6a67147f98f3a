//! Overview model
//!
//! Read-only projection of workspaces and their windows for the overview
//! screen, which shows every workspace at once.

use serde::Serialize;

use crate::types::{WindowId, WorkspaceId};
use crate::window::WindowRegistry;
use crate::workspace::WorkspaceManager;

/// One window tile in the overview
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewWindow {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    pub minimized: bool,
    pub focused: bool,
}

/// One workspace column in the overview
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewWorkspace {
    pub id: WorkspaceId,
    pub name: String,
    pub active: bool,
    /// Member windows in paint order, bottom first
    pub windows: Vec<OverviewWindow>,
}

/// Everything the overview screen renders
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewModel {
    pub open: bool,
    pub workspaces: Vec<OverviewWorkspace>,
}

impl OverviewModel {
    /// Build the model from the current registry and workspace list
    pub fn build(registry: &WindowRegistry, workspaces: &WorkspaceManager) -> Self {
        let columns = workspaces
            .workspaces()
            .iter()
            .map(|ws| {
                let mut members = registry.by_workspace(ws.id);
                members.sort_by_key(|w| w.z_index);
                OverviewWorkspace {
                    id: ws.id,
                    name: ws.name.clone(),
                    active: ws.active,
                    windows: members
                        .into_iter()
                        .map(|w| OverviewWindow {
                            id: w.id,
                            app_id: w.app_id.clone(),
                            title: w.title.clone(),
                            minimized: w.flags.minimized,
                            focused: w.flags.focused,
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            open: workspaces.is_overview_open(),
            workspaces: columns,
        }
    }

    /// Total number of windows across all workspaces
    pub fn window_count(&self) -> usize {
        self.workspaces.iter().map(|w| w.windows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;

    #[test]
    fn test_groups_windows_by_workspace() {
        let mut registry = WindowRegistry::default();
        let mut manager = WorkspaceManager::new();
        let ws2 = manager.create(Some("Work"));
        let a = registry.open(WindowSpec::new("calc", "Calculator"));
        manager.attach_window(a, 1);
        let b = registry.open(WindowSpec::new("notes", "Notes").on_workspace(ws2));
        manager.attach_window(b, ws2);
        manager.open_overview();

        let model = OverviewModel::build(&registry, &manager);
        assert!(model.open);
        assert_eq!(model.window_count(), 2);
        assert_eq!(model.workspaces[0].windows[0].id, a);
        assert!(model.workspaces[0].windows[0].focused);
        assert_eq!(model.workspaces[1].name, "Work");
        assert_eq!(model.workspaces[1].windows[0].app_id, "notes");
        assert!(model.workspaces[0].active);
    }
}
