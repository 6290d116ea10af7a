#![forbid(unsafe_code)]

//! Page-pixel geometry for overlay placement.

/// A rectangle in page coordinates (CSS pixels, origin at the page's
/// top-left). Edges may be negative when a container is scrolled or
/// positioned off-page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PxRect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PxRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle at the page origin with the given size.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(clamp_px(self.width))
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(clamp_px(self.height))
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top-left page position that centers a `width` x `height` box within
    /// this rectangle. A box larger than the rectangle is pinned to the
    /// rectangle's own top-left rather than pushed off to the left or above.
    #[must_use]
    pub fn center_within(&self, width: u32, height: u32) -> (i32, i32) {
        let dx = self.width.saturating_sub(width) / 2;
        let dy = self.height.saturating_sub(height) / 2;
        (
            self.left.saturating_add(dx as i32),
            self.top.saturating_add(dy as i32),
        )
    }
}

/// Extents above `i32::MAX` saturate instead of wrapping negative.
#[inline]
const fn clamp_px(extent: u32) -> i32 {
    if extent > i32::MAX as u32 {
        i32::MAX
    } else {
        extent as i32
    }
}
