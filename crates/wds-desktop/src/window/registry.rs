//! Window registry
//!
//! The authoritative map of open windows. Every window field is written here
//! and nowhere else; the drag controller and the workspace coordinator call
//! the mutation API like any other client.
//!
//! ## Focus
//!
//! At most one window carries the focus flag, and it is always shown
//! (visible and not minimized). While any window is shown, one of them holds
//! focus. When the focused window is closed, minimized, hidden or sent to
//! the back, focus falls back to the top-most remaining shown window, or to
//! none.
//!
//! ## Stale ids
//!
//! UI callbacks routinely arrive for windows that were closed a moment ago.
//! Mutations on unknown ids are no-ops that return `false`; queries return
//! `None` or an empty list.

use tracing::debug;

use super::spec::WindowSpec;
use super::window::{Window, WindowFlags};
use super::zorder::ZOrder;
use crate::config::ShellConfig;
use crate::geometry::constrain;
use crate::math::{Rect, Size, Vec2};
use crate::observer::{SubscriptionId, Subscribers};
use crate::types::{WindowId, WorkspaceId};

/// Change published after each committed registry mutation
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    Opened(WindowId),
    Closed(WindowId),
    Focused(WindowId),
    /// Minimized or maximized flag changed
    StateChanged(WindowId),
    BoundsChanged(WindowId, Rect),
    VisibilityChanged(WindowId, bool),
    WorkspaceChanged(WindowId, WorkspaceId),
    TitleChanged(WindowId),
    /// Z-index changed without a change of focus
    Restacked(WindowId),
    /// Every window was removed at once
    Cleared,
}

/// Window registry
pub struct WindowRegistry {
    /// Windows in insertion order (breaks z-index ties)
    windows: Vec<Window>,
    z_order: ZOrder,
    /// Usable screen area
    screen: Rect,
    default_bounds: Rect,
    cascade_step: f32,
    min_size: Size,
    /// Workspace new windows land on and that is currently shown
    active_workspace: WorkspaceId,
    subscribers: Subscribers<WindowEvent>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new(&ShellConfig::default())
    }
}

impl WindowRegistry {
    /// Create an empty registry
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            windows: Vec::new(),
            z_order: ZOrder::default(),
            screen: config.usable_rect(),
            default_bounds: config.default_window_bounds,
            cascade_step: config.cascade_step,
            min_size: config.min_window_size,
            active_workspace: 1,
            subscribers: Subscribers::default(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open a window and return its id
    ///
    /// A window opened onto the active workspace becomes focused and top-most.
    /// One opened onto another workspace is stacked on top but left hidden
    /// and unfocused. If `spec.id` names an existing window, that window is
    /// focused and no new window is created.
    pub fn open(&mut self, spec: WindowSpec) -> WindowId {
        if let Some(id) = spec.id {
            if self.contains(id) {
                self.focus(id);
                return id;
            }
        }

        let id = spec.id.unwrap_or_default();
        let workspace = spec.workspace.unwrap_or(self.active_workspace);
        let min_size = spec.min_size.unwrap_or(self.min_size);
        let bounds = spec.bounds.unwrap_or_else(|| self.cascaded_bounds());
        let bounds = constrain(bounds, min_size, spec.max_size, self.screen);
        let visible = workspace == self.active_workspace;

        self.windows.push(Window {
            id,
            app_id: spec.app_id,
            title: spec.title,
            bounds,
            flags: WindowFlags::opened(spec.capabilities, visible),
            z_index: 0,
            workspace,
            min_size,
            max_size: spec.max_size,
        });
        debug!(window_id = %id, workspace, visible, "window opened");
        self.subscribers.notify(&WindowEvent::Opened(id));

        if visible {
            self.focus(id);
        } else {
            let z = self.z_order.next();
            if let Some(window) = self.get_mut(id) {
                window.z_index = z;
            }
        }

        id
    }

    /// Default bounds shifted by one cascade step per visible window
    fn cascaded_bounds(&self) -> Rect {
        let visible = self.windows.iter().filter(|w| w.flags.visible).count();
        let offset = visible as f32 * self.cascade_step;
        self.default_bounds.translate(Vec2::new(offset, offset))
    }

    /// Close a window
    pub fn close(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let window = self.windows.remove(index);
        debug!(window_id = %id, "window closed");
        self.subscribers.notify(&WindowEvent::Closed(id));

        if window.flags.focused {
            self.focus_fallback(None);
        }
        true
    }

    /// Remove every window and restart z-order allocation
    pub fn clear(&mut self) {
        self.windows.clear();
        self.z_order.reset();
        self.subscribers.notify(&WindowEvent::Cleared);
    }

    // =========================================================================
    // Focus and stacking
    // =========================================================================

    /// Focus a window and raise it to the top
    ///
    /// Un-minimizes the window and clears focus from every other window.
    /// A hidden window (one on another workspace) is raised and un-minimized
    /// but does not take focus; the focused window stays as it was.
    pub fn focus(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let z = self.z_order.next();

        if !self.windows[index].flags.visible {
            let window = &mut self.windows[index];
            window.flags.minimized = false;
            window.z_index = z;
            debug!(window_id = %id, "raised hidden window without focus");
            self.subscribers.notify(&WindowEvent::Restacked(id));
            return true;
        }

        for window in self.windows.iter_mut() {
            window.flags.focused = false;
        }

        let window = &mut self.windows[index];
        window.flags.focused = true;
        window.flags.minimized = false;
        window.z_index = z;
        self.subscribers.notify(&WindowEvent::Focused(id));
        true
    }

    /// Give focus to the top-most shown window other than `exclude`
    ///
    /// The chosen window keeps its z-index.
    fn focus_fallback(&mut self, exclude: Option<WindowId>) -> Option<WindowId> {
        let next = self
            .windows
            .iter()
            .filter(|w| w.is_shown() && Some(w.id) != exclude)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)?;

        if let Some(window) = self.get_mut(next) {
            window.flags.focused = true;
        }
        debug!(window_id = %next, "focus fell back");
        self.subscribers.notify(&WindowEvent::Focused(next));
        Some(next)
    }

    /// Ensure a shown window holds focus if any exists
    ///
    /// Clears focus left on a window that is no longer shown, then falls back
    /// to the top-most shown window. Returns the focused window.
    pub fn refocus(&mut self) -> Option<WindowId> {
        if let Some(window) = self.focused() {
            return Some(window.id);
        }
        for window in self.windows.iter_mut() {
            window.flags.focused = false;
        }
        self.focus_fallback(None)
    }

    /// Drop a window below every other window
    ///
    /// The new z-index may collide with another window's; ties paint in
    /// insertion order. Focus moves off the window if another shown window
    /// can take it.
    pub fn send_to_back(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let lowest = self
            .windows
            .iter()
            .filter(|w| w.id != id)
            .map(|w| w.z_index)
            .min()
            .unwrap_or(self.z_order.base());

        let window = &mut self.windows[index];
        window.z_index = lowest.saturating_sub(1);
        let was_focused = window.flags.focused;
        self.subscribers.notify(&WindowEvent::Restacked(id));

        if was_focused && self.focus_fallback(Some(id)).is_some() {
            if let Some(window) = self.get_mut(id) {
                window.flags.focused = false;
            }
        }
        true
    }

    // =========================================================================
    // Window state
    // =========================================================================

    /// Minimize a window, passing focus on if it held it
    pub fn minimize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        let was_focused = window.flags.focused;
        window.flags.minimized = true;
        window.flags.focused = false;
        self.subscribers.notify(&WindowEvent::StateChanged(id));

        if was_focused {
            self.focus_fallback(Some(id));
        }
        true
    }

    /// Toggle the maximized flag. Stored bounds are left untouched.
    pub fn maximize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.flags.maximized = !window.flags.maximized;
        self.subscribers.notify(&WindowEvent::StateChanged(id));
        true
    }

    /// Clear the maximized and minimized flags
    ///
    /// If no window held focus, the top-most shown window takes it.
    pub fn restore(&mut self, id: WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.flags.maximized = false;
        window.flags.minimized = false;
        self.subscribers.notify(&WindowEvent::StateChanged(id));
        self.refocus();
        true
    }

    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.title = title.into();
        self.subscribers.notify(&WindowEvent::TitleChanged(id));
        true
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Move a window's origin. Refused for non-movable windows.
    pub fn move_window(&mut self, id: WindowId, position: Vec2) -> bool {
        let screen = self.screen;
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        if !window.flags.movable {
            return false;
        }
        let candidate = window.bounds.with_position(position);
        let bounds = constrain(candidate, window.min_size, window.max_size, screen);
        window.bounds = bounds;
        self.subscribers
            .notify(&WindowEvent::BoundsChanged(id, bounds));
        true
    }

    /// Resize a window. Refused for non-resizable windows.
    pub fn resize(&mut self, id: WindowId, size: Size) -> bool {
        let screen = self.screen;
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        if !window.flags.resizable {
            return false;
        }
        let candidate = window.bounds.with_size(size);
        let bounds = constrain(candidate, window.min_size, window.max_size, screen);
        window.bounds = bounds;
        self.subscribers
            .notify(&WindowEvent::BoundsChanged(id, bounds));
        true
    }

    /// Replace a window's bounds as given, without constraint or capability checks
    pub fn update_bounds(&mut self, id: WindowId, bounds: Rect) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.bounds = bounds;
        self.subscribers
            .notify(&WindowEvent::BoundsChanged(id, bounds));
        true
    }

    /// Usable screen area windows are constrained to
    pub fn screen(&self) -> Rect {
        self.screen
    }

    /// Replace the usable screen area and pull every window back inside it
    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
        let mut moved = Vec::new();
        for window in self.windows.iter_mut() {
            let bounds = constrain(window.bounds, window.min_size, window.max_size, screen);
            if bounds != window.bounds {
                window.bounds = bounds;
                moved.push((window.id, bounds));
            }
        }
        for (id, bounds) in moved {
            self.subscribers
                .notify(&WindowEvent::BoundsChanged(id, bounds));
        }
    }

    // =========================================================================
    // Workspace plumbing (driven by the workspace coordinator)
    // =========================================================================

    /// Show or hide a window
    ///
    /// Hiding the focused window passes focus on. Showing a window while
    /// nothing holds focus gives focus to the top-most shown window.
    pub fn set_visibility(&mut self, id: WindowId, visible: bool) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        if window.flags.visible == visible {
            return true;
        }
        window.flags.visible = visible;
        let lost_focus = !visible && window.flags.focused;
        if lost_focus {
            window.flags.focused = false;
        }
        self.subscribers
            .notify(&WindowEvent::VisibilityChanged(id, visible));

        if lost_focus {
            self.focus_fallback(Some(id));
        } else if visible {
            self.refocus();
        }
        true
    }

    /// Show exactly the windows on `workspace` and hide every other window
    ///
    /// Walks the whole registry, then hands focus to the top-most shown
    /// window unless a shown window already holds it.
    pub fn show_workspace(&mut self, workspace: WorkspaceId) {
        let mut changed = Vec::new();
        for window in self.windows.iter_mut() {
            let visible = window.workspace == workspace;
            if !visible {
                window.flags.focused = false;
            }
            if window.flags.visible != visible {
                window.flags.visible = visible;
                changed.push((window.id, visible));
            }
        }
        for (id, visible) in changed {
            self.subscribers
                .notify(&WindowEvent::VisibilityChanged(id, visible));
        }
        self.refocus();
    }

    /// Reassign a window's workspace field
    pub fn move_to_workspace(&mut self, id: WindowId, workspace: WorkspaceId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.workspace = workspace;
        self.subscribers
            .notify(&WindowEvent::WorkspaceChanged(id, workspace));
        true
    }

    /// Workspace that new windows default to
    pub fn active_workspace(&self) -> WorkspaceId {
        self.active_workspace
    }

    /// Set the workspace new windows default to. Does not change visibility.
    pub fn set_active_workspace(&mut self, workspace: WorkspaceId) {
        self.active_workspace = workspace;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    /// Check if a window exists
    pub fn contains(&self, id: WindowId) -> bool {
        self.index_of(id).is_some()
    }

    /// All windows in insertion order
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Number of open windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows hosting the given application
    pub fn by_app(&self, app_id: &str) -> Vec<&Window> {
        self.windows.iter().filter(|w| w.app_id == app_id).collect()
    }

    /// Windows assigned to the given workspace
    pub fn by_workspace(&self, workspace: WorkspaceId) -> Vec<&Window> {
        self.windows
            .iter()
            .filter(|w| w.workspace == workspace)
            .collect()
    }

    /// The focused window, if a shown window holds focus
    pub fn focused(&self) -> Option<&Window> {
        self.windows
            .iter()
            .find(|w| w.flags.focused && w.is_shown())
    }

    /// Shown windows in paint order (z-index ascending, ties by insertion)
    pub fn visible(&self) -> Vec<&Window> {
        let mut shown: Vec<&Window> = self.windows.iter().filter(|w| w.is_shown()).collect();
        shown.sort_by_key(|w| w.z_index);
        shown
    }

    /// Cyclic successor of `id` in paint order
    ///
    /// When `id` is not shown, the bottom-most shown window is returned.
    pub fn next_in_stack(&self, id: WindowId) -> Option<WindowId> {
        let stack = self.visible();
        if stack.is_empty() {
            return None;
        }
        let next = match stack.iter().position(|w| w.id == id) {
            Some(pos) => (pos + 1) % stack.len(),
            None => 0,
        };
        Some(stack[next].id)
    }

    /// Highest z-index handed out since the last clear
    pub fn top_z_index(&self) -> Option<u32> {
        self.z_order.current()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a listener called after every committed mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&WindowEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl std::fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("windows", &self.windows)
            .field("screen", &self.screen)
            .field("active_workspace", &self.active_workspace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Capabilities;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn registry() -> WindowRegistry {
        WindowRegistry::new(&ShellConfig {
            dock_width: 0.0,
            topbar_height: 0.0,
            ..Default::default()
        })
    }

    fn focused_count(reg: &WindowRegistry) -> usize {
        reg.windows().iter().filter(|w| w.flags.focused).count()
    }

    #[test]
    fn test_open_default_bounds_and_focus() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("calc", "Calculator"));

        let w = reg.get(id).unwrap();
        assert_eq!(w.bounds, Rect::new(100.0, 100.0, 800.0, 600.0));
        assert!(w.flags.focused);
        assert!(w.flags.visible);
        assert_eq!(w.workspace, 1);
    }

    #[test]
    fn test_second_open_cascades_and_steals_focus() {
        let mut reg = registry();
        let first = reg.open(WindowSpec::new("calc", "Calculator"));
        let second = reg.open(WindowSpec::new("notes", "Notes"));

        let w2 = reg.get(second).unwrap();
        assert_eq!(w2.bounds.position(), Vec2::new(130.0, 130.0));
        assert!(!reg.get(first).unwrap().flags.focused);
        assert_eq!(reg.focused().map(|w| w.id), Some(second));
    }

    #[test]
    fn test_open_with_explicit_id_and_bounds() {
        let mut reg = registry();
        let id = WindowId::new();
        let bounds = Rect::new(10.0, 20.0, 400.0, 300.0);
        let opened = reg.open(WindowSpec::new("term", "Terminal").with_id(id).with_bounds(bounds));

        assert_eq!(opened, id);
        assert_eq!(reg.get(id).unwrap().bounds, bounds);
    }

    #[test]
    fn test_open_existing_id_focuses_instead_of_duplicating() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("a", "A"));
        reg.open(WindowSpec::new("b", "B"));

        let again = reg.open(WindowSpec::new("a", "A").with_id(id));
        assert_eq!(again, id);
        assert_eq!(reg.count(), 2);
        assert_eq!(reg.focused().map(|w| w.id), Some(id));
    }

    #[test]
    fn test_open_on_inactive_workspace_is_hidden() {
        let mut reg = registry();
        let shown = reg.open(WindowSpec::new("a", "A"));
        let hidden = reg.open(WindowSpec::new("b", "B").on_workspace(2));

        let w = reg.get(hidden).unwrap();
        assert!(!w.flags.visible);
        assert!(!w.flags.focused);
        assert_eq!(reg.focused().map(|w| w.id), Some(shown));
    }

    #[test]
    fn test_minimize_only_window_leaves_no_focus() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("calc", "Calculator"));

        assert!(reg.minimize(id));
        let w = reg.get(id).unwrap();
        assert!(w.flags.minimized);
        assert!(!w.flags.focused);
        assert!(reg.focused().is_none());
    }

    #[test]
    fn test_minimize_passes_focus_on() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));

        reg.minimize(b);
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
    }

    #[test]
    fn test_focus_unminimizes_and_raises() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));
        reg.minimize(a);

        assert!(reg.focus(a));
        let wa = reg.get(a).unwrap();
        assert!(!wa.flags.minimized);
        assert!(wa.z_index > reg.get(b).unwrap().z_index);
        assert_eq!(focused_count(&reg), 1);
    }

    #[test]
    fn test_focus_missing_window_is_noop() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));

        assert!(!reg.focus(WindowId::new()));
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
    }

    #[test]
    fn test_close_transfers_focus() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));

        assert!(reg.close(b));
        assert!(reg.get(b).is_none());
        assert_eq!(reg.focused().map(|w| w.id), Some(a));

        assert!(reg.close(a));
        assert!(reg.focused().is_none());
        assert!(!reg.close(a));
    }

    #[test]
    fn test_maximize_toggles_without_touching_bounds() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("a", "A"));
        let bounds = reg.get(id).unwrap().bounds;

        reg.maximize(id);
        assert!(reg.get(id).unwrap().flags.maximized);
        assert_eq!(reg.get(id).unwrap().bounds, bounds);
        assert_eq!(reg.get(id).unwrap().display_rect(reg.screen()), reg.screen());

        reg.maximize(id);
        assert!(!reg.get(id).unwrap().flags.maximized);
    }

    #[test]
    fn test_restore_clears_both_flags() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("a", "A"));
        reg.maximize(id);
        reg.minimize(id);

        reg.restore(id);
        let w = reg.get(id).unwrap();
        assert!(!w.flags.maximized);
        assert!(!w.flags.minimized);
    }

    #[test]
    fn test_move_and_resize_respect_capabilities() {
        let mut reg = registry();
        let fixed = reg.open(WindowSpec::new("a", "A").with_capabilities(Capabilities {
            movable: false,
            resizable: false,
            ..Default::default()
        }));
        let before = reg.get(fixed).unwrap().bounds;

        assert!(!reg.move_window(fixed, Vec2::new(400.0, 400.0)));
        assert!(!reg.resize(fixed, Size::new(500.0, 500.0)));
        assert_eq!(reg.get(fixed).unwrap().bounds, before);
    }

    #[test]
    fn test_move_and_resize_are_constrained() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("a", "A"));

        reg.move_window(id, Vec2::new(-200.0, -50.0));
        assert_eq!(reg.get(id).unwrap().bounds.position(), Vec2::ZERO);

        reg.resize(id, Size::new(10.0, 10.0));
        assert_eq!(reg.get(id).unwrap().bounds.size(), Size::new(300.0, 200.0));
    }

    #[test]
    fn test_update_bounds_is_unconditional() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("a", "A").with_capabilities(Capabilities {
            movable: false,
            ..Default::default()
        }));
        let rect = Rect::new(0.0, 0.0, 960.0, 1080.0);

        assert!(reg.update_bounds(id, rect));
        assert_eq!(reg.get(id).unwrap().bounds, rect);
    }

    #[test]
    fn test_visible_sorted_by_z() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));
        let c = reg.open(WindowSpec::new("c", "C"));
        reg.focus(a);
        reg.minimize(b);

        let order: Vec<WindowId> = reg.visible().iter().map(|w| w.id).collect();
        assert_eq!(order, vec![c, a]);
    }

    #[test]
    fn test_next_in_stack_cycles() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));
        let c = reg.open(WindowSpec::new("c", "C"));

        assert_eq!(reg.next_in_stack(a), Some(b));
        assert_eq!(reg.next_in_stack(c), Some(a));
        assert_eq!(reg.next_in_stack(WindowId::new()), Some(a));

        let empty = registry();
        assert_eq!(empty.next_in_stack(a), None);
    }

    #[test]
    fn test_queries_by_app_and_workspace() {
        let mut reg = registry();
        reg.open(WindowSpec::new("notes", "One"));
        reg.open(WindowSpec::new("notes", "Two"));
        reg.open(WindowSpec::new("calc", "Calc").on_workspace(2));

        assert_eq!(reg.by_app("notes").len(), 2);
        assert_eq!(reg.by_app("missing").len(), 0);
        assert_eq!(reg.by_workspace(2).len(), 1);
    }

    #[test]
    fn test_focus_on_hidden_window_keeps_current_focus() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B").on_workspace(2));

        assert!(reg.focus(b));
        let hidden = reg.get(b).unwrap();
        assert!(!hidden.flags.focused);
        assert!(hidden.z_index > reg.get(a).unwrap().z_index);
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
    }

    #[test]
    fn test_showing_window_with_nothing_focused_takes_focus() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        reg.minimize(a);
        assert!(reg.focused().is_none());

        reg.restore(a);
        assert_eq!(reg.focused().map(|w| w.id), Some(a));

        reg.set_visibility(a, false);
        assert!(reg.focused().is_none());
        reg.set_visibility(a, true);
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
    }

    #[test]
    fn test_send_to_back_of_only_window_keeps_focus() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));

        assert!(reg.send_to_back(a));
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
    }

    #[test]
    fn test_hiding_focused_window_passes_focus() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));

        reg.set_visibility(b, false);
        assert!(!reg.get(b).unwrap().flags.focused);
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
    }

    #[test]
    fn test_send_to_back() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B"));

        assert!(reg.send_to_back(b));
        assert!(reg.get(b).unwrap().z_index < reg.get(a).unwrap().z_index);
        assert_eq!(reg.focused().map(|w| w.id), Some(a));
        assert_eq!(reg.visible()[0].id, b);
    }

    #[test]
    fn test_set_screen_pulls_windows_inside() {
        let mut reg = registry();
        let id = reg.open(WindowSpec::new("a", "A").with_bounds(Rect::new(1000.0, 400.0, 800.0, 600.0)));

        reg.set_screen(Rect::new(0.0, 0.0, 1280.0, 800.0));
        assert_eq!(
            reg.get(id).unwrap().bounds,
            Rect::new(480.0, 200.0, 800.0, 600.0)
        );
    }

    #[test]
    fn test_refocus_after_clearing() {
        let mut reg = registry();
        let a = reg.open(WindowSpec::new("a", "A"));
        let b = reg.open(WindowSpec::new("b", "B").on_workspace(2));

        // Show b without focus, then ask for a repair: a is still focused
        reg.set_visibility(b, true);
        assert_eq!(reg.refocus(), Some(a));

        reg.set_visibility(a, false);
        assert_eq!(reg.refocus(), Some(b));
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let mut reg = registry();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let sub = reg.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let id = reg.open(WindowSpec::new("a", "A"));
        reg.set_title(id, "Renamed");
        reg.close(id);

        assert_eq!(
            *events.borrow(),
            vec![
                WindowEvent::Opened(id),
                WindowEvent::Focused(id),
                WindowEvent::TitleChanged(id),
                WindowEvent::Closed(id),
            ]
        );
        assert!(reg.unsubscribe(sub));
    }

    #[test]
    fn test_clear_resets_z_order() {
        let mut reg = registry();
        reg.open(WindowSpec::new("a", "A"));
        reg.open(WindowSpec::new("b", "B"));
        reg.clear();

        assert!(reg.is_empty());
        assert_eq!(reg.top_z_index(), None);
    }
}
