//! Rectangle geometry for pointer classification
//!
//! Coordinates follow the page-coordinate convention: the origin is the
//! top-left corner, `x` grows rightward and `y` grows downward.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether `(x, y)` falls strictly inside the rectangle expanded by
    /// `margin` on all four sides.
    ///
    /// Bounds are exclusive: a point exactly on an edge is outside. A zero
    /// margin tests the exact bounds, so a zero-size rectangle contains
    /// nothing, not even its own corner.
    pub fn contains_with_margin(&self, x: f64, y: f64, margin: f64) -> bool {
        x > self.left - margin
            && x < self.left + self.width + margin
            && y > self.top - margin
            && y < self.top + self.height + margin
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;
