//! Edge snapping and post-drag tiling targets

use crate::math::Rect;

/// Snap window edges to nearby screen edges.
///
/// Each axis is independent: the near edge (left/top) is tried first, then
/// the far edge (right/bottom), which aligns the window's far edge with the
/// screen's rather than its origin.
pub fn snap_edges(bounds: Rect, screen: Rect, threshold: f32) -> Rect {
    let mut out = bounds;

    if (bounds.x - screen.x).abs() <= threshold {
        out.x = screen.x;
    } else if (bounds.right() - screen.right()).abs() <= threshold {
        out.x = screen.right() - bounds.width;
    }

    if (bounds.y - screen.y).abs() <= threshold {
        out.y = screen.y;
    } else if (bounds.bottom() - screen.bottom()).abs() <= threshold {
        out.y = screen.bottom() - bounds.height;
    }

    out
}

/// Where a window released at the end of a move should be tiled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapZone {
    /// Released against the top edge
    Maximize,
    /// Released against the left edge
    LeftHalf,
    /// Released against the right edge
    RightHalf,
}

impl SnapZone {
    /// Bounds the window takes in this zone. Maximize has none: it is a
    /// flag, and the stored bounds are kept for un-maximizing.
    pub fn target_bounds(self, screen: Rect) -> Option<Rect> {
        match self {
            SnapZone::Maximize => None,
            SnapZone::LeftHalf => Some(screen.left_half()),
            SnapZone::RightHalf => Some(screen.right_half()),
        }
    }
}

/// Decide the tiling zone for a window released at `bounds`.
///
/// Top wins over the sides, left over right.
pub fn snap_zone(bounds: Rect, screen: Rect, threshold: f32) -> Option<SnapZone> {
    if bounds.y <= screen.y + threshold {
        Some(SnapZone::Maximize)
    } else if bounds.x <= screen.x + threshold {
        Some(SnapZone::LeftHalf)
    } else if bounds.right() >= screen.right() - threshold {
        Some(SnapZone::RightHalf)
    } else {
        None
    }
}
