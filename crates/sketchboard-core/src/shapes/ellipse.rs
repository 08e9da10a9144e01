//! Ellipse shape.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned ellipse. The owning shape's `position` is its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Horizontal radius.
    pub rx: f64,
    /// Vertical radius.
    pub ry: f64,
}

impl Ellipse {
    pub fn new(rx: f64, ry: f64) -> Self {
        Self { rx, ry }
    }

    /// Create a circle.
    pub fn circle(radius: f64) -> Self {
        Self::new(radius, radius)
    }

    /// Bounding box relative to the center.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(-self.rx, -self.ry, self.rx, self.ry)
    }

    /// Normalized quadratic-form test for an offset from the center.
    /// Degenerate radii only contain the center line itself.
    pub fn contains(&self, offset: Vec2) -> bool {
        if self.rx <= f64::EPSILON || self.ry <= f64::EPSILON {
            return false;
        }
        let nx = offset.x / self.rx;
        let ny = offset.y / self.ry;
        nx * nx + ny * ny <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle() {
        let circle = Ellipse::circle(10.0);
        assert!((circle.rx - circle.ry).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains_edge() {
        let ellipse = Ellipse::new(30.0, 20.0);
        assert!(ellipse.contains(Vec2::ZERO));
        assert!(ellipse.contains(Vec2::new(30.0, 0.0)));
        assert!(!ellipse.contains(Vec2::new(25.0, 15.0)));
    }

    #[test]
    fn test_degenerate_contains_nothing() {
        let ellipse = Ellipse::new(0.0, 5.0);
        assert!(!ellipse.contains(Vec2::ZERO));
    }
}
