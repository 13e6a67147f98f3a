//! Core geometry types for the desktop shell
//!
//! Screen-space positions, sizes and rectangles. All coordinates are CSS
//! pixels with the origin at the top-left of the browser viewport.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
