//! Axis-aligned rectangle

use serde::{Deserialize, Serialize};

use super::{Size, Vec2};

/// Axis-aligned rectangle in screen coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from position and size
    pub fn from_pos_size(pos: Vec2, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Get position (top-left)
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Get size
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, new origin
    pub fn with_position(&self, pos: Vec2) -> Rect {
        Rect::new(pos.x, pos.y, self.width, self.height)
    }

    /// Same origin, new size
    pub fn with_size(&self, size: Size) -> Rect {
        Rect::new(self.x, self.y, size.width, size.height)
    }

    /// Translate by an offset
    pub fn translate(&self, delta: Vec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Check if a point is inside the rectangle
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Get the right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Left half of this rectangle
    pub fn left_half(&self) -> Rect {
        Rect::new(self.x, self.y, self.width / 2.0, self.height)
    }

    /// Right half of this rectangle
    pub fn right_half(&self) -> Rect {
        let half = self.width / 2.0;
        Rect::new(self.x + half, self.y, half, self.height)
    }
}
