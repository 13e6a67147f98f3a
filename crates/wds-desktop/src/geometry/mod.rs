//! Geometry and constraint engine
//!
//! Pure functions over rectangles. Nothing here holds state; the drag
//! controller and the window registry call in with candidate bounds and
//! commit whatever comes back.

mod constrain;
mod snap;

pub use constrain::{clamp_size, constrain};
pub use snap::{snap_edges, snap_zone, SnapZone};
