//! Size and position clamping

use crate::math::{Rect, Size};

/// Clamp a size to `[min, max]`. `max` is unbounded when `None`.
///
/// The minimum wins when a window's maximum is smaller than its minimum.
pub fn clamp_size(size: Size, min: Size, max: Option<Size>) -> Size {
    let mut clamped = size.max(min);
    if let Some(max) = max {
        clamped = clamped.min(max.max(min));
    }
    clamped
}

/// Clamp a window rectangle to its size limits and the usable screen.
///
/// Size is clamped first. The origin is then clamped so the window lies
/// inside `screen`; a window larger than the screen is pulled back so its
/// top-left corner sits on the screen's top-left corner. The window is never
/// shrunk to fit beyond the size clamp.
pub fn constrain(bounds: Rect, min: Size, max: Option<Size>, screen: Rect) -> Rect {
    let size = clamp_size(bounds.size(), min, max);

    let max_x = screen.right() - size.width;
    let max_y = screen.bottom() - size.height;
    let x = bounds.x.min(max_x).max(screen.x);
    let y = bounds.y.min(max_y).max(screen.y);

    Rect::new(x, y, size.width, size.height)
}
