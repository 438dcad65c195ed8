//! Pointer and bounding-box geometry used by the drag controller.
//!
//! Hosts report pointer positions and the bounding rectangle of the row or
//! column under the pointer in the same coordinate space (CSS pixels in a
//! browser). The editor never measures anything itself.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a rendered row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Horizontal midpoint.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Where a moved element lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

impl Placement {
    /// Midpoint rule: strictly past the center means after, anything else
    /// (including exactly on the center) means before.
    #[must_use]
    pub fn from_axis(pointer: f64, center: f64) -> Self {
        if pointer > center { Self::After } else { Self::Before }
    }

    /// Placement for a row drag: compares the pointer's y against the row's
    /// vertical midpoint.
    #[must_use]
    pub fn vertical(pointer: Point, target: Rect) -> Self {
        Self::from_axis(pointer.y, target.center_y())
    }

    /// Placement for a column drag: compares the pointer's x against the
    /// column's horizontal midpoint.
    #[must_use]
    pub fn horizontal(pointer: Point, target: Rect) -> Self {
        Self::from_axis(pointer.x, target.center_x())
    }
}
