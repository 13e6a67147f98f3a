//! Drag and resize state machine
//!
//! ```text
//!            begin_drag (movable, not maximized)
//!   Idle ─────────────────────────────────────────> Dragging
//!    │ ^                                               │
//!    │ └──────── pointer_up / cancel / window gone ────┤
//!    │                                                 │
//!    └───────────────────────────────────────────> Resizing
//!            begin_resize (resizable, not maximized)
//! ```
//!
//! The controller never writes window fields itself. Every pointer move
//! computes candidate bounds from the pointer delta and commits them through
//! [`WindowRegistry::update_bounds`].

use tracing::debug;

use super::capture::{NoopCapture, PointerCapture};
use super::handle::ResizeHandle;
use crate::geometry::{clamp_size, constrain, snap_edges};
use crate::math::{Rect, Size, Vec2};
use crate::types::WindowId;
use crate::window::WindowRegistry;

/// Current interaction
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        window_id: WindowId,
        start_pointer: Vec2,
        initial_bounds: Rect,
        /// Set once a pointer move commits bounds other than `initial_bounds`
        moved: bool,
    },
    Resizing {
        window_id: WindowId,
        handle: ResizeHandle,
        start_pointer: Vec2,
        initial_bounds: Rect,
        moved: bool,
    },
}

impl InteractionState {
    /// Window being dragged or resized
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging { window_id, .. }
            | InteractionState::Resizing { window_id, .. } => Some(*window_id),
        }
    }

    pub fn kind(&self) -> Option<InteractionKind> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging { .. } => Some(InteractionKind::Move),
            InteractionState::Resizing { .. } => Some(InteractionKind::Resize),
        }
    }

    /// Whether the interaction has changed the window's bounds
    pub fn moved(&self) -> bool {
        match self {
            InteractionState::Idle => false,
            InteractionState::Dragging { moved, .. } | InteractionState::Resizing { moved, .. } => {
                *moved
            }
        }
    }
}

/// Move or resize
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    Move,
    Resize,
}

/// Bounds committed by one pointer move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsUpdate {
    pub window_id: WindowId,
    pub kind: InteractionKind,
    pub bounds: Rect,
}

impl BoundsUpdate {
    /// Position-only view, for move listeners
    pub fn position(&self) -> Vec2 {
        self.bounds.position()
    }

    /// Size-only view, for resize listeners
    pub fn size(&self) -> Size {
        self.bounds.size()
    }
}

/// Interaction finished by pointer-up
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionEnd {
    pub window_id: WindowId,
    pub kind: InteractionKind,
    /// Final stored bounds of the window
    pub bounds: Rect,
    /// False for a press and release that never changed the bounds
    pub moved: bool,
}

/// Compute bounds for a resize from `handle` by `delta`.
///
/// Edges named by the handle follow the pointer. The size is clamped to the
/// window's limits, and for north/west handles the origin is recomputed so
/// the opposite edge stays where it was.
pub fn resize_bounds(
    handle: ResizeHandle,
    initial: Rect,
    delta: Vec2,
    min: Size,
    max: Option<Size>,
) -> Rect {
    let mut width = initial.width;
    let mut height = initial.height;

    if handle.east() {
        width = initial.width + delta.x;
    } else if handle.west() {
        width = initial.width - delta.x;
    }
    if handle.south() {
        height = initial.height + delta.y;
    } else if handle.north() {
        height = initial.height - delta.y;
    }

    let size = clamp_size(Size::new(width, height), min, max);
    let x = if handle.west() {
        initial.right() - size.width
    } else {
        initial.x
    };
    let y = if handle.north() {
        initial.bottom() - size.height
    } else {
        initial.y
    };

    Rect::new(x, y, size.width, size.height)
}

/// Stop north/west growth at the usable screen edge.
///
/// `resize_bounds` keeps the south/east edge anchored, but an origin pulled
/// past the top or left of the screen would otherwise be clamped back by
/// [`constrain`], shifting the anchored edge. The dimension is shortened to
/// what fits between the screen edge and the anchored edge instead.
fn anchor_to_screen(handle: ResizeHandle, candidate: Rect, screen: Rect, min: Size) -> Rect {
    let mut bounds = candidate;
    if handle.north() && bounds.y < screen.y {
        let bottom = bounds.bottom();
        bounds.y = screen.y;
        bounds.height = (bottom - screen.y).max(min.height);
    }
    if handle.west() && bounds.x < screen.x {
        let right = bounds.right();
        bounds.x = screen.x;
        bounds.width = (right - screen.x).max(min.width);
    }
    bounds
}

/// Pointer-driven move/resize controller
///
/// One instance serves every window: there is only one pointer.
pub struct InteractionController {
    state: InteractionState,
    capture: Box<dyn PointerCapture>,
    snap_threshold: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl InteractionController {
    /// Create an idle controller snapping to screen edges within `snap_threshold`
    pub fn new(snap_threshold: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            capture: Box::new(NoopCapture),
            snap_threshold,
        }
    }

    /// Replace the pointer capture hook
    ///
    /// An interaction in progress is cancelled first so its listeners are
    /// released through the hook that attached them.
    pub fn set_capture(&mut self, capture: Box<dyn PointerCapture>) {
        self.cancel();
        self.capture = capture;
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    /// Window being dragged or resized
    pub fn active_window(&self) -> Option<WindowId> {
        self.state.window_id()
    }

    /// Start moving a window from its title area
    ///
    /// Refused when the window is missing, not movable, or maximized.
    pub fn begin_drag(&mut self, registry: &WindowRegistry, id: WindowId, pointer: Vec2) -> bool {
        let Some(window) = registry.get(id) else {
            return false;
        };
        if !window.flags.movable || window.flags.maximized {
            return false;
        }
        let initial_bounds = window.bounds;

        self.cancel();
        self.state = InteractionState::Dragging {
            window_id: id,
            start_pointer: pointer,
            initial_bounds,
            moved: false,
        };
        self.capture.attach();
        debug!(window_id = %id, "drag started");
        true
    }

    /// Start resizing a window from one of its handles
    ///
    /// Refused when the window is missing, not resizable, or maximized.
    pub fn begin_resize(
        &mut self,
        registry: &WindowRegistry,
        id: WindowId,
        handle: ResizeHandle,
        pointer: Vec2,
    ) -> bool {
        let Some(window) = registry.get(id) else {
            return false;
        };
        if !window.flags.resizable || window.flags.maximized {
            return false;
        }
        let initial_bounds = window.bounds;

        self.cancel();
        self.state = InteractionState::Resizing {
            window_id: id,
            handle,
            start_pointer: pointer,
            initial_bounds,
            moved: false,
        };
        self.capture.attach();
        debug!(window_id = %id, %handle, "resize started");
        true
    }

    /// Apply a pointer move and commit the resulting bounds
    ///
    /// Returns `None` while idle. If the window was closed mid-interaction the
    /// controller drops back to Idle and releases its listeners.
    pub fn pointer_move(
        &mut self,
        registry: &mut WindowRegistry,
        pointer: Vec2,
    ) -> Option<BoundsUpdate> {
        let window_id = self.state.window_id()?;
        let Some(window) = registry.get(window_id) else {
            debug!(window_id = %window_id, "interaction target closed");
            self.cancel();
            return None;
        };
        let (min, max) = (window.min_size, window.max_size);
        let screen = registry.screen();

        let (kind, bounds) = match self.state {
            InteractionState::Idle => return None,
            InteractionState::Dragging {
                start_pointer,
                initial_bounds,
                ..
            } => {
                let candidate = initial_bounds.translate(pointer - start_pointer);
                let snapped = snap_edges(candidate, screen, self.snap_threshold);
                (InteractionKind::Move, constrain(snapped, min, max, screen))
            }
            InteractionState::Resizing {
                handle,
                start_pointer,
                initial_bounds,
                ..
            } => {
                let candidate =
                    resize_bounds(handle, initial_bounds, pointer - start_pointer, min, max);
                let anchored = anchor_to_screen(handle, candidate, screen, min);
                (InteractionKind::Resize, constrain(anchored, min, max, screen))
            }
        };

        match &mut self.state {
            InteractionState::Dragging {
                initial_bounds,
                moved,
                ..
            }
            | InteractionState::Resizing {
                initial_bounds,
                moved,
                ..
            } => *moved |= bounds != *initial_bounds,
            InteractionState::Idle => {}
        }
        registry.update_bounds(window_id, bounds);
        Some(BoundsUpdate {
            window_id,
            kind,
            bounds,
        })
    }

    /// Finish the interaction and release listeners
    ///
    /// Returns the final bounds, or `None` if idle or the window is gone.
    pub fn pointer_up(&mut self, registry: &WindowRegistry) -> Option<InteractionEnd> {
        let window_id = self.state.window_id()?;
        let kind = self.state.kind()?;
        let moved = self.state.moved();
        self.cancel();

        let bounds = registry.get(window_id)?.bounds;
        debug!(window_id = %window_id, ?kind, "interaction ended");
        Some(InteractionEnd {
            window_id,
            kind,
            bounds,
            moved,
        })
    }

    /// Return to Idle without a pointer-up. Returns false if already idle.
    pub fn cancel(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        self.state = InteractionState::Idle;
        self.capture.release();
        true
    }

    /// Cancel if the interaction targets `id`
    pub fn cancel_for(&mut self, id: WindowId) -> bool {
        if self.active_window() == Some(id) {
            self.cancel()
        } else {
            false
        }
    }
}

impl std::fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionController")
            .field("state", &self.state)
            .field("snap_threshold", &self.snap_threshold)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::window::WindowSpec;
    use proptest::prelude::*;

    fn handle() -> impl Strategy<Value = ResizeHandle> {
        (0usize..8).prop_map(|i| ResizeHandle::ALL[i])
    }

    proptest! {
        /// Drag and resize results respect the minimum size and keep the
        /// origin on the usable screen
        #[test]
        fn bounds_invariant(
            handle in handle(),
            moves in proptest::collection::vec((-3000.0f32..3000.0, -3000.0f32..3000.0), 1..20),
            resize in any::<bool>(),
        ) {
            let config = ShellConfig::default();
            let mut reg = WindowRegistry::new(&config);
            let id = reg.open(WindowSpec::new("app", "App"));
            let screen = reg.screen();
            let mut ctl = InteractionController::new(config.snap_threshold);

            let started = if resize {
                ctl.begin_resize(&reg, id, handle, Vec2::ZERO)
            } else {
                ctl.begin_drag(&reg, id, Vec2::ZERO)
            };
            prop_assert!(started);

            for (x, y) in moves {
                let update = ctl.pointer_move(&mut reg, Vec2::new(x, y)).unwrap();
                let b = update.bounds;
                prop_assert!(b.width >= config.min_window_size.width);
                prop_assert!(b.height >= config.min_window_size.height);
                prop_assert!(b.x >= screen.x && b.x <= screen.right());
                prop_assert!(b.y >= screen.y && b.y <= screen.bottom());
            }
        }
    }
}
