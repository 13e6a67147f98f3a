//! Paint-order counter

/// First z-index handed out by a fresh counter
pub const BASE_Z_INDEX: u32 = 100;

/// Monotonically increasing z-index source
///
/// Owned by the window registry. Every call to [`ZOrder::next`] returns a
/// value strictly greater than all previous ones until [`ZOrder::reset`].
#[derive(Clone, Debug)]
pub struct ZOrder {
    base: u32,
    next: u32,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self::new(BASE_Z_INDEX)
    }
}

impl ZOrder {
    /// Create a counter starting at `base`
    pub fn new(base: u32) -> Self {
        Self { base, next: base }
    }

    /// Allocate the next top-most z-index
    pub fn next(&mut self) -> u32 {
        let z = self.next;
        self.next = self.next.saturating_add(1);
        z
    }

    /// Highest z-index allocated so far, if any
    pub fn current(&self) -> Option<u32> {
        (self.next > self.base).then(|| self.next - 1)
    }

    /// Lowest z-index this counter hands out
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Start over from the base
    pub fn reset(&mut self) {
        self.next = self.base;
    }
}
