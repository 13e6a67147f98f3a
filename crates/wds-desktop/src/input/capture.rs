//! Global pointer listener binding
//!
//! While a drag or resize is in progress the host listens for pointer moves
//! on the whole document, not just the window frame. Those listeners must
//! exist only while the controller is out of Idle; the controller calls
//! [`PointerCapture::attach`] on entering Dragging or Resizing and
//! [`PointerCapture::release`] on every return to Idle.

/// Host hook for binding and unbinding document-level pointer listeners
pub trait PointerCapture {
    /// Bind pointer-move/pointer-up listeners
    fn attach(&mut self);

    /// Unbind the listeners bound by the last `attach`
    fn release(&mut self);
}

/// Capture for hosts that deliver pointer events some other way
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn attach(&mut self) {}

    fn release(&mut self) {}
}
