//! Desktop engine coordinating all components

use serde::Serialize;
use tracing::{debug, info, warn};
use wds_storage::{BlobStore, MemoryBlobStore};

use crate::clock::{Clock, SystemClock};
use crate::config::ShellConfig;
use crate::error::DesktopError;
use crate::geometry::{snap_zone, SnapZone};
use crate::input::{BoundsUpdate, InteractionController, InteractionEnd, InteractionKind};
use crate::input::{PointerCapture, ResizeHandle};
use crate::math::{Rect, Size, Vec2};
use crate::overview::OverviewModel;
use crate::persistence::{Autosave, SessionSnapshot};
use crate::types::{WindowId, WorkspaceId};
use crate::window::{WindowRegistry, WindowSpec};
use crate::workspace::WorkspaceManager;

/// Window as the renderer paints it
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowFrame {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    /// Painted rectangle: the usable screen while maximized, else the stored bounds
    pub rect: Rect,
    pub z_index: u32,
    pub focused: bool,
    pub maximized: bool,
}

/// Desktop engine coordinating all desktop components
///
/// This is the main entry point for desktop operations, managing:
/// - Window registry (window CRUD, focus, z-order)
/// - Workspace coordinator (membership, visibility, overview flag)
/// - Interaction controller (drag/resize state machine, aero-snap on release)
/// - Session persistence (snapshot, restore, autosave schedule)
///
/// Operations that change workspace membership go through the engine so the
/// window's `workspace` field and the workspace lists change together.
pub struct DesktopEngine {
    /// Window registry
    ///
    /// Open for queries and for per-window state changes. Opening, closing
    /// and moving windows between workspaces must go through the engine
    /// (`open_window`, `close_window`, `move_window_to_workspace`); calling
    /// `open` or `move_to_workspace` here leaves the workspace lists behind.
    pub windows: WindowRegistry,
    /// Workspace coordinator
    pub workspaces: WorkspaceManager,
    interaction: InteractionController,
    autosave: Autosave,
    /// Host settings, persisted with the session
    settings: serde_json::Value,
    config: ShellConfig,
    store: Box<dyn BlobStore>,
    clock: Box<dyn Clock>,
}

impl Default for DesktopEngine {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl DesktopEngine {
    /// Create an engine backed by an in-memory store and the wall clock
    pub fn new(config: ShellConfig) -> Self {
        let clock = SystemClock;
        Self {
            windows: WindowRegistry::new(&config),
            workspaces: WorkspaceManager::new(),
            interaction: InteractionController::new(config.snap_threshold),
            autosave: Autosave::new(config.autosave_interval(), clock.now()),
            settings: serde_json::Value::Null,
            config,
            store: Box::new(MemoryBlobStore::new()),
            clock: Box::new(clock),
        }
    }

    /// Use `store` for session persistence
    pub fn with_store(mut self, store: impl BlobStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Use `clock` for autosave scheduling and snapshot timestamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.autosave = Autosave::new(self.config.autosave_interval(), clock.now());
        self.clock = Box::new(clock);
        self
    }

    /// Bind document-level pointer listeners through `capture`
    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.set_capture(capture);
        self
    }

    /// Replace the pointer capture hook, cancelling any drag in progress
    pub fn set_capture(&mut self, capture: impl PointerCapture + 'static) {
        self.interaction.set_capture(Box::new(capture));
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Resize the browser viewport; windows are pulled back inside
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.config.screen = Size::new(width, height);
        self.windows.set_screen(self.config.usable_rect());
    }

    pub fn settings(&self) -> &serde_json::Value {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: serde_json::Value) {
        self.settings = settings;
    }

    // =========================================================================
    // Window operations
    // =========================================================================

    /// Open a window and record it on its workspace
    ///
    /// A workspace id that does not exist is replaced by the current workspace.
    pub fn open_window(&mut self, mut spec: WindowSpec) -> WindowId {
        if let Some(ws) = spec.workspace {
            if !self.workspaces.contains(ws) {
                warn!(workspace = ws, "open on unknown workspace, using current");
                spec.workspace = None;
            }
        }

        let id = self.windows.open(spec);
        if let Some(window) = self.windows.get(id) {
            let workspace = window.workspace;
            self.workspaces.attach_window(id, workspace);
        }
        id
    }

    /// Close a window, ending any drag on it
    pub fn close_window(&mut self, id: WindowId) -> bool {
        self.interaction.cancel_for(id);
        self.workspaces.detach_window(id);
        self.windows.close(id)
    }

    /// Focus a window, switching to its workspace first if needed
    pub fn focus_window(&mut self, id: WindowId) -> bool {
        let Some(workspace) = self.windows.get(id).map(|w| w.workspace) else {
            return false;
        };
        if workspace != self.workspaces.current() {
            self.switch_workspace(workspace);
        }
        self.windows.focus(id)
    }

    pub fn minimize_window(&mut self, id: WindowId) -> bool {
        self.interaction.cancel_for(id);
        self.windows.minimize(id)
    }

    /// Toggle maximize
    pub fn maximize_window(&mut self, id: WindowId) -> bool {
        self.interaction.cancel_for(id);
        self.windows.maximize(id)
    }

    /// Restore a window; a window coming back from minimized is also focused
    pub fn restore_window(&mut self, id: WindowId) -> bool {
        let Some(was_minimized) = self.windows.get(id).map(|w| w.flags.minimized) else {
            return false;
        };
        self.windows.restore(id);
        if was_minimized {
            self.focus_window(id);
        }
        true
    }

    pub fn move_window(&mut self, id: WindowId, x: f32, y: f32) -> bool {
        self.windows.move_window(id, Vec2::new(x, y))
    }

    pub fn resize_window(&mut self, id: WindowId, width: f32, height: f32) -> bool {
        self.windows.resize(id, Size::new(width, height))
    }

    pub fn set_window_title(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        self.windows.set_title(id, title)
    }

    pub fn send_to_back(&mut self, id: WindowId) -> bool {
        self.windows.send_to_back(id)
    }

    /// Alt-Tab: focus the next shown window in paint order
    pub fn focus_next(&mut self) -> Option<WindowId> {
        let next = match self.windows.focused() {
            Some(focused) => self.windows.next_in_stack(focused.id),
            None => self.windows.visible().last().map(|w| w.id),
        }?;
        self.windows.focus(next);
        Some(next)
    }

    /// Shown windows in paint order, with their painted rectangles
    pub fn frames(&self) -> Vec<WindowFrame> {
        let screen = self.windows.screen();
        self.windows
            .visible()
            .into_iter()
            .map(|w| WindowFrame {
                id: w.id,
                app_id: w.app_id.clone(),
                title: w.title.clone(),
                rect: w.display_rect(screen),
                z_index: w.z_index,
                focused: w.flags.focused,
                maximized: w.flags.maximized,
            })
            .collect()
    }

    // =========================================================================
    // Drag and resize
    // =========================================================================

    /// Pointer-down on a window's title area
    ///
    /// Focuses the window, then starts a move if the window allows it.
    pub fn begin_move(&mut self, id: WindowId, x: f32, y: f32) -> bool {
        if !self.focus_window(id) {
            return false;
        }
        self.interaction.begin_drag(&self.windows, id, Vec2::new(x, y))
    }

    /// Pointer-down on one of a window's resize handles
    pub fn begin_resize(&mut self, id: WindowId, handle: ResizeHandle, x: f32, y: f32) -> bool {
        if !self.focus_window(id) {
            return false;
        }
        self.interaction
            .begin_resize(&self.windows, id, handle, Vec2::new(x, y))
    }

    /// Document-level pointer move while dragging or resizing
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<BoundsUpdate> {
        self.interaction
            .pointer_move(&mut self.windows, Vec2::new(x, y))
    }

    /// Document-level pointer up
    ///
    /// A finished move is tiled when released against a screen edge: the top
    /// edge maximizes, the left or right edge fills that half of the screen.
    /// A press and release that never moved the window is left alone. The
    /// returned bounds are the window's stored bounds after tiling.
    pub fn pointer_up(&mut self) -> Option<InteractionEnd> {
        let mut end = self.interaction.pointer_up(&self.windows)?;
        if end.kind == InteractionKind::Move && end.moved {
            self.apply_aero_snap(end.window_id, end.bounds);
            if let Some(window) = self.windows.get(end.window_id) {
                end.bounds = window.bounds;
            }
        }
        Some(end)
    }

    fn apply_aero_snap(&mut self, id: WindowId, bounds: Rect) -> Option<SnapZone> {
        let screen = self.windows.screen();
        let zone = snap_zone(bounds, screen, self.config.aero_snap_threshold)?;
        match zone {
            SnapZone::Maximize => {
                if self.windows.get(id).is_some_and(|w| !w.flags.maximized) {
                    self.windows.maximize(id);
                }
            }
            SnapZone::LeftHalf | SnapZone::RightHalf => {
                if let Some(target) = zone.target_bounds(screen) {
                    self.windows.update_bounds(id, target);
                }
            }
        }
        debug!(window_id = %id, ?zone, "aero snap");
        Some(zone)
    }

    pub fn is_interacting(&self) -> bool {
        !self.interaction.is_idle()
    }

    // =========================================================================
    // Workspaces
    // =========================================================================

    pub fn create_workspace(&mut self, name: Option<&str>) -> WorkspaceId {
        self.workspaces.create(name)
    }

    pub fn delete_workspace(&mut self, id: WorkspaceId) -> bool {
        self.workspaces.delete(&mut self.windows, id)
    }

    pub fn rename_workspace(&mut self, id: WorkspaceId, name: impl Into<String>) -> bool {
        self.workspaces.rename(id, name)
    }

    /// Make `id` current, ending any drag in progress
    pub fn switch_workspace(&mut self, id: WorkspaceId) -> bool {
        if !self.workspaces.contains(id) {
            return false;
        }
        self.interaction.cancel();
        self.workspaces.switch_to(&mut self.windows, id)
    }

    pub fn switch_next_workspace(&mut self) -> WorkspaceId {
        self.interaction.cancel();
        self.workspaces.switch_next(&mut self.windows)
    }

    pub fn switch_previous_workspace(&mut self) -> WorkspaceId {
        self.interaction.cancel();
        self.workspaces.switch_previous(&mut self.windows)
    }

    pub fn move_window_to_workspace(&mut self, id: WindowId, workspace: WorkspaceId) -> bool {
        if workspace != self.workspaces.current() {
            self.interaction.cancel_for(id);
        }
        self.workspaces
            .move_window_to_workspace(&mut self.windows, id, workspace)
    }

    pub fn current_workspace(&self) -> WorkspaceId {
        self.workspaces.current()
    }

    // =========================================================================
    // Overview
    // =========================================================================

    pub fn toggle_overview(&mut self) -> bool {
        self.workspaces.toggle_overview()
    }

    pub fn open_overview(&mut self) {
        self.workspaces.open_overview();
    }

    pub fn close_overview(&mut self) {
        self.workspaces.close_overview();
    }

    pub fn overview(&self) -> OverviewModel {
        OverviewModel::build(&self.windows, &self.workspaces)
    }

    /// Pick a window from the overview: switch to its workspace, focus it,
    /// and close the overview
    pub fn activate_window(&mut self, id: WindowId) -> bool {
        if !self.focus_window(id) {
            return false;
        }
        self.workspaces.close_overview();
        true
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Capture the current desktop
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.windows,
            &self.workspaces,
            &self.settings,
            self.clock.now(),
        )
    }

    /// Write a snapshot to the store
    ///
    /// Failures are logged and otherwise ignored; returns whether the write
    /// succeeded.
    pub fn save_session(&mut self) -> bool {
        let snapshot = self.snapshot();
        match snapshot.write_to(self.store.as_ref(), &self.config.session_key) {
            Ok(()) => {
                info!(windows = snapshot.windows.len(), "session saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "session save failed");
                false
            }
        }
    }

    /// Restore the session stored in the blob store, if any
    ///
    /// Missing, unreadable, malformed or stale snapshots leave the desktop
    /// untouched. Malformed and stale snapshots are also removed from the
    /// store so the next load does not read them again.
    pub fn load_session(&mut self) -> bool {
        match SessionSnapshot::read_from(self.store.as_ref(), &self.config.session_key) {
            Ok(Some(snapshot)) => {
                let restored = self.restore_session(&snapshot);
                if !restored {
                    self.discard_stored_session();
                }
                restored
            }
            Ok(None) => {
                debug!("no stored session");
                false
            }
            Err(e @ (DesktopError::Serialization(_) | DesktopError::InvalidSnapshot(_))) => {
                warn!(error = %e, "stored session malformed, starting fresh");
                self.discard_stored_session();
                false
            }
            Err(e) => {
                warn!(error = %e, "stored session unreadable, starting fresh");
                false
            }
        }
    }

    fn discard_stored_session(&self) {
        match self.store.remove_blob(&self.config.session_key) {
            Ok(()) => debug!("stored session discarded"),
            Err(e) => warn!(error = %e, "could not discard stored session"),
        }
    }

    /// Replace the desktop with `snapshot` unless it is stale
    pub fn restore_session(&mut self, snapshot: &SessionSnapshot) -> bool {
        let now = self.clock.now();
        if let Err(e) = snapshot.ensure_fresh(now, self.config.session_max_age()) {
            warn!(error = %e, "discarding session snapshot");
            return false;
        }

        self.interaction.cancel();
        match snapshot.restore_into(&mut self.windows, &mut self.workspaces) {
            Ok(()) => {
                self.settings = snapshot.settings.clone();
                info!(
                    windows = self.windows.count(),
                    workspaces = self.workspaces.count(),
                    "session restored"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "session restore failed");
                false
            }
        }
    }

    /// Save if the autosave interval has elapsed. Returns true if a save was attempted.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        if !self.autosave.is_due(now) {
            return false;
        }
        self.save_session();
        self.autosave.mark_saved(now);
        true
    }

    /// Page teardown: save unconditionally
    pub fn shutdown(&mut self) {
        self.interaction.cancel();
        self.save_session();
        self.autosave.mark_saved(self.clock.now());
    }
}

impl std::fmt::Debug for DesktopEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopEngine")
            .field("windows", &self.windows)
            .field("workspaces", &self.workspaces)
            .field("interaction", &self.interaction)
            .field("autosave", &self.autosave)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
