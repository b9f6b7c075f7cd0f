//! Bounding rectangles
//!
//! Provides [`Geometry`], the `(x, y, width, height)` rectangle used for both
//! sub-item placement and the container window itself.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Axis-aligned bounding rectangle in container coordinates
///
/// `x`/`y` are signed because a sub-window may be dragged partly outside the
/// container's visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    /// Create a rectangle
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size anchored at the origin
    #[inline]
    #[must_use]
    pub const fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Same size, shifted by `(dx, dy)`
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Area in square pixels
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when either dimension is zero
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_size() {
        let g = Geometry::new(10, 20, 300, 400).offset(5, -25);
        assert_eq!(g, Geometry::new(15, -5, 300, 400));
    }

    #[test]
    fn offset_saturates() {
        let g = Geometry::new(i32::MAX, 0, 1, 1).offset(10, 0);
        assert_eq!(g.x, i32::MAX);
    }

    #[test]
    fn area_and_empty() {
        assert_eq!(Geometry::sized(300, 400).area(), 120_000);
        assert!(Geometry::sized(0, 10).is_empty());
        assert!(!Geometry::sized(1, 1).is_empty());
    }

    #[test]
    fn display_format() {
        assert_eq!(Geometry::new(10, 20, 300, 400).to_string(), "300x400+10+20");
    }
}
