//! Workspace coordinator
//!
//! Owns the workspace list and the current-workspace id. The window registry
//! is borrowed for each operation that touches windows: the coordinator
//! drives window visibility and workspace fields through the registry's own
//! mutation API and never stores window state itself.
//!
//! Each operation that changes membership updates the window's `workspace`
//! field and the workspace lists together, so a window `x` is listed by
//! workspace `w` exactly when `x.workspace == w.id`.

use tracing::debug;

use super::workspace::Workspace;
use crate::observer::{SubscriptionId, Subscribers};
use crate::types::{WindowId, WorkspaceId};
use crate::window::WindowRegistry;

/// Change published by the workspace coordinator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceEvent {
    Created(WorkspaceId),
    Deleted(WorkspaceId),
    Renamed(WorkspaceId),
    Switched {
        from: WorkspaceId,
        to: WorkspaceId,
    },
    WindowMoved {
        window_id: WindowId,
        to: WorkspaceId,
    },
    /// Overview mode opened (`true`) or closed (`false`)
    Overview(bool),
    /// Workspace list replaced wholesale by a session restore
    Replaced,
}

/// Workspace coordinator
pub struct WorkspaceManager {
    /// Always at least one
    workspaces: Vec<Workspace>,
    current: WorkspaceId,
    overview_open: bool,
    subscribers: Subscribers<WorkspaceEvent>,
}

impl Default for WorkspaceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceManager {
    /// Create a coordinator with a single active workspace 1
    pub fn new() -> Self {
        let mut first = Workspace::new(1, Workspace::default_name(1));
        first.active = true;
        Self {
            workspaces: vec![first],
            current: 1,
            overview_open: false,
            subscribers: Subscribers::default(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All workspaces in creation order
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// Current workspace id
    pub fn current(&self) -> WorkspaceId {
        self.current
    }

    /// Current workspace
    pub fn current_workspace(&self) -> Option<&Workspace> {
        self.get(self.current)
    }

    pub fn get(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces.iter_mut().find(|w| w.id == id)
    }

    pub fn contains(&self, id: WorkspaceId) -> bool {
        self.get(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.workspaces.len()
    }

    /// Workspace listing `window_id`
    pub fn workspace_of(&self, window_id: WindowId) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|w| w.contains_window(window_id))
            .map(|w| w.id)
    }

    // =========================================================================
    // Workspace lifecycle
    // =========================================================================

    /// Create a workspace and return its id
    ///
    /// The id is one more than the largest existing id. Without a name the
    /// workspace is called "Workspace {id}".
    pub fn create(&mut self, name: Option<&str>) -> WorkspaceId {
        let id = self.workspaces.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| Workspace::default_name(id));
        debug!(workspace = id, %name, "workspace created");
        self.workspaces.push(Workspace::new(id, name));
        self.subscribers.notify(&WorkspaceEvent::Created(id));
        id
    }

    /// Delete a workspace, moving its windows to the first remaining one
    ///
    /// Refused for the last workspace and for unknown ids. Deleting the
    /// current workspace switches to the workspace that received its windows.
    pub fn delete(&mut self, registry: &mut WindowRegistry, id: WorkspaceId) -> bool {
        if self.workspaces.len() <= 1 || !self.contains(id) {
            return false;
        }
        let Some(target) = self.workspaces.iter().map(|w| w.id).find(|&w| w != id) else {
            return false;
        };

        let orphans: Vec<WindowId> = registry.by_workspace(id).iter().map(|w| w.id).collect();
        for window_id in orphans {
            self.move_window_to_workspace(registry, window_id, target);
        }

        let was_current = self.current == id;
        self.workspaces.retain(|w| w.id != id);
        debug!(workspace = id, target, "workspace deleted");
        self.subscribers.notify(&WorkspaceEvent::Deleted(id));

        if was_current {
            self.switch_to(registry, target);
        }
        true
    }

    /// Rename a workspace
    pub fn rename(&mut self, id: WorkspaceId, name: impl Into<String>) -> bool {
        let Some(workspace) = self.get_mut(id) else {
            return false;
        };
        workspace.name = name.into();
        self.subscribers.notify(&WorkspaceEvent::Renamed(id));
        true
    }

    // =========================================================================
    // Switching
    // =========================================================================

    /// Make `id` the current workspace
    ///
    /// Every window in the registry is shown if it belongs to `id` and hidden
    /// otherwise, then focus is repaired so a shown window holds it.
    pub fn switch_to(&mut self, registry: &mut WindowRegistry, id: WorkspaceId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let from = self.current;
        self.current = id;
        for workspace in self.workspaces.iter_mut() {
            workspace.active = workspace.id == id;
        }
        registry.set_active_workspace(id);
        Self::apply_visibility(registry, id);

        debug!(from, to = id, "workspace switched");
        self.subscribers
            .notify(&WorkspaceEvent::Switched { from, to: id });
        true
    }

    /// Show members of `current`, hide everything else
    ///
    /// Hides run first so focus never falls back onto a window that is about
    /// to be hidden.
    fn apply_visibility(registry: &mut WindowRegistry, current: WorkspaceId) {
        registry.show_workspace(current);
    }

    /// Switch to the workspace after the current one, wrapping around
    pub fn switch_next(&mut self, registry: &mut WindowRegistry) -> WorkspaceId {
        self.switch_relative(registry, 1)
    }

    /// Switch to the workspace before the current one, wrapping around
    pub fn switch_previous(&mut self, registry: &mut WindowRegistry) -> WorkspaceId {
        self.switch_relative(registry, self.workspaces.len() - 1)
    }

    fn switch_relative(&mut self, registry: &mut WindowRegistry, step: usize) -> WorkspaceId {
        let len = self.workspaces.len();
        let index = self
            .workspaces
            .iter()
            .position(|w| w.id == self.current)
            .unwrap_or(0);
        let target = self.workspaces[(index + step) % len].id;
        self.switch_to(registry, target);
        self.current
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Record a newly opened window as a member of `workspace`
    pub fn attach_window(&mut self, window_id: WindowId, workspace: WorkspaceId) -> bool {
        let Some(target) = self.get_mut(workspace) else {
            return false;
        };
        target.add_window(window_id);
        true
    }

    /// Drop a window from every workspace list
    pub fn detach_window(&mut self, window_id: WindowId) -> bool {
        let mut removed = false;
        for workspace in self.workspaces.iter_mut() {
            removed |= workspace.remove_window(window_id);
        }
        removed
    }

    /// Move a window to another workspace
    ///
    /// Updates the window's field and both workspace lists, then shows the
    /// window only if the target is current.
    pub fn move_window_to_workspace(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
        workspace: WorkspaceId,
    ) -> bool {
        if !self.contains(workspace) || !registry.contains(window_id) {
            return false;
        }

        self.detach_window(window_id);
        self.attach_window(window_id, workspace);
        registry.move_to_workspace(window_id, workspace);
        registry.set_visibility(window_id, workspace == self.current);
        registry.refocus();

        debug!(window_id = %window_id, workspace, "window moved to workspace");
        self.subscribers.notify(&WorkspaceEvent::WindowMoved {
            window_id,
            to: workspace,
        });
        true
    }

    /// Replace the workspace list wholesale
    ///
    /// Member lists are cleared, `active` flags are recomputed, and the
    /// registry's active workspace follows. An empty list is refused. When
    /// `current` is not in the list the first workspace becomes current.
    pub fn replace(
        &mut self,
        registry: &mut WindowRegistry,
        workspaces: Vec<Workspace>,
        current: WorkspaceId,
    ) -> bool {
        if workspaces.is_empty() {
            return false;
        }
        let current = if workspaces.iter().any(|w| w.id == current) {
            current
        } else {
            workspaces[0].id
        };

        self.workspaces = workspaces
            .into_iter()
            .map(|mut w| {
                w.windows.clear();
                w.active = w.id == current;
                w
            })
            .collect();
        self.current = current;
        registry.set_active_workspace(current);
        self.subscribers.notify(&WorkspaceEvent::Replaced);
        true
    }

    // =========================================================================
    // Overview
    // =========================================================================

    pub fn is_overview_open(&self) -> bool {
        self.overview_open
    }

    pub fn open_overview(&mut self) {
        self.set_overview(true);
    }

    pub fn close_overview(&mut self) {
        self.set_overview(false);
    }

    /// Flip the overview flag and return the new value
    pub fn toggle_overview(&mut self) -> bool {
        self.set_overview(!self.overview_open);
        self.overview_open
    }

    fn set_overview(&mut self, open: bool) {
        if self.overview_open != open {
            self.overview_open = open;
            self.subscribers.notify(&WorkspaceEvent::Overview(open));
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&WorkspaceEvent) + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl std::fmt::Debug for WorkspaceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceManager")
            .field("workspaces", &self.workspaces)
            .field("current", &self.current)
            .field("overview_open", &self.overview_open)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;

    fn open(
        manager: &mut WorkspaceManager,
        registry: &mut WindowRegistry,
        app: &str,
    ) -> WindowId {
        let id = registry.open(WindowSpec::new(app, app));
        let workspace = registry.get(id).unwrap().workspace;
        manager.attach_window(id, workspace);
        id
    }

    #[test]
    fn test_starts_with_one_active_workspace() {
        let manager = WorkspaceManager::new();
        assert_eq!(manager.count(), 1);
        assert_eq!(manager.current(), 1);
        assert!(manager.current_workspace().unwrap().active);
        assert_eq!(manager.current_workspace().unwrap().name, "Workspace 1");
    }

    #[test]
    fn test_create_assigns_max_plus_one() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        assert_eq!(manager.create(None), 2);
        assert_eq!(manager.create(Some("Work")), 3);
        assert_eq!(manager.get(3).unwrap().name, "Work");

        manager.delete(&mut registry, 2);
        assert_eq!(manager.create(None), 4);
    }

    #[test]
    fn test_delete_last_workspace_refused() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();

        assert!(!manager.delete(&mut registry, 1));
        assert_eq!(manager.count(), 1);
        assert!(!manager.delete(&mut registry, 42));
    }

    #[test]
    fn test_delete_migrates_windows_and_switches() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        let ws2 = manager.create(None);
        manager.switch_to(&mut registry, ws2);
        let w = open(&mut manager, &mut registry, "notes");

        assert!(manager.delete(&mut registry, ws2));
        assert_eq!(manager.current(), 1);
        assert_eq!(registry.get(w).unwrap().workspace, 1);
        assert!(manager.get(1).unwrap().contains_window(w));
        assert!(registry.get(w).unwrap().flags.visible);
    }

    #[test]
    fn test_switch_hides_other_workspaces() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        let w1 = open(&mut manager, &mut registry, "calc");
        let w2 = open(&mut manager, &mut registry, "notes");
        let ws2 = manager.create(None);

        assert!(manager.move_window_to_workspace(&mut registry, w1, ws2));
        assert!(!registry.get(w1).unwrap().flags.visible);

        assert!(manager.switch_to(&mut registry, ws2));
        assert!(registry.get(w1).unwrap().flags.visible);
        assert!(!registry.get(w2).unwrap().flags.visible);
        assert!(manager.get(ws2).unwrap().active);
        assert!(!manager.get(1).unwrap().active);
        assert_eq!(registry.focused().map(|w| w.id), Some(w1));
    }

    #[test]
    fn test_switch_unknown_workspace_refused() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        assert!(!manager.switch_to(&mut registry, 9));
        assert_eq!(manager.current(), 1);
    }

    #[test]
    fn test_move_updates_both_lists() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        let w = open(&mut manager, &mut registry, "calc");
        let ws2 = manager.create(None);

        manager.move_window_to_workspace(&mut registry, w, ws2);
        assert!(!manager.get(1).unwrap().contains_window(w));
        assert!(manager.get(ws2).unwrap().contains_window(w));
        assert_eq!(manager.workspace_of(w), Some(ws2));

        assert!(!manager.move_window_to_workspace(&mut registry, w, 99));
        assert!(!manager.move_window_to_workspace(&mut registry, WindowId::new(), 1));
    }

    #[test]
    fn test_switch_next_and_previous_wrap() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        manager.create(None);
        manager.create(None);

        assert_eq!(manager.switch_next(&mut registry), 2);
        assert_eq!(manager.switch_next(&mut registry), 3);
        assert_eq!(manager.switch_next(&mut registry), 1);
        assert_eq!(manager.switch_previous(&mut registry), 3);
    }

    #[test]
    fn test_rename() {
        let mut manager = WorkspaceManager::new();
        assert!(manager.rename(1, "Home"));
        assert_eq!(manager.get(1).unwrap().name, "Home");
        assert!(!manager.rename(5, "Nope"));
    }

    #[test]
    fn test_overview_flag() {
        let mut manager = WorkspaceManager::new();
        assert!(!manager.is_overview_open());
        assert!(manager.toggle_overview());
        manager.close_overview();
        assert!(!manager.is_overview_open());
        manager.open_overview();
        assert!(manager.is_overview_open());
    }

    #[test]
    fn test_replace_falls_back_to_first_workspace() {
        let mut manager = WorkspaceManager::new();
        let mut registry = WindowRegistry::default();
        let mut stale = Workspace::new(4, "Four");
        stale.windows.push(WindowId::new());

        assert!(manager.replace(&mut registry, vec![stale, Workspace::new(7, "Seven")], 9));
        assert_eq!(manager.current(), 4);
        assert!(manager.get(4).unwrap().windows.is_empty());
        assert_eq!(registry.active_workspace(), 4);

        assert!(!manager.replace(&mut registry, Vec::new(), 1));
        assert_eq!(manager.count(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::window::WindowSpec;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Open,
        Close(usize),
        Create,
        Delete(usize),
        Switch(usize),
        Move(usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Open),
            1 => any::<usize>().prop_map(Op::Close),
            2 => Just(Op::Create),
            1 => any::<usize>().prop_map(Op::Delete),
            2 => any::<usize>().prop_map(Op::Switch),
            3 => (any::<usize>(), any::<usize>()).prop_map(|(w, s)| Op::Move(w, s)),
        ]
    }

    proptest! {
        /// A window is listed by a workspace exactly when its field names it,
        /// and only windows of the current workspace are visible
        #[test]
        fn membership_consistency(ops in proptest::collection::vec(op(), 1..60)) {
            let mut manager = WorkspaceManager::new();
            let mut registry = WindowRegistry::default();

            for op in ops {
                let window_at = |reg: &WindowRegistry, n: usize| {
                    (!reg.is_empty()).then(|| reg.windows()[n % reg.count()].id)
                };
                let workspace_at = |m: &WorkspaceManager, n: usize| m.workspaces()[n % m.count()].id;

                match op {
                    Op::Open => {
                        let id = registry.open(WindowSpec::new("app", "App"));
                        manager.attach_window(id, registry.get(id).unwrap().workspace);
                    }
                    Op::Close(n) => if let Some(id) = window_at(&registry, n) {
                        manager.detach_window(id);
                        registry.close(id);
                    },
                    Op::Create => { manager.create(None); }
                    Op::Delete(n) => {
                        let ws = workspace_at(&manager, n);
                        manager.delete(&mut registry, ws);
                    }
                    Op::Switch(n) => {
                        let ws = workspace_at(&manager, n);
                        manager.switch_to(&mut registry, ws);
                    }
                    Op::Move(w, s) => if let Some(id) = window_at(&registry, w) {
                        let ws = workspace_at(&manager, s);
                        manager.move_window_to_workspace(&mut registry, id, ws);
                    },
                }

                prop_assert!(manager.count() >= 1);
                for workspace in manager.workspaces() {
                    for window in registry.windows() {
                        prop_assert_eq!(
                            window.workspace == workspace.id,
                            workspace.contains_window(window.id)
                        );
                    }
                }
                for window in registry.windows() {
                    prop_assert_eq!(window.flags.visible, window.workspace == manager.current());
                }
            }
        }
    }
}
