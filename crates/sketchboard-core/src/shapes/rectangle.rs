//! Rectangle shape.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A rectangle with optional rounded corners. The owning shape's `position`
/// is its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// Width and height.
    pub size: Vec2,
    /// Corner radius (None = sharp corners).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Rectangle {
    pub fn new(size: Vec2) -> Self {
        Self { size, radius: None }
    }

    /// Bounding box relative to the top-left corner.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.x, self.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_bounds() {
        let rect = Rectangle::new(Vec2::new(100.0, 50.0));
        assert_eq!(rect.local_bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }
}
