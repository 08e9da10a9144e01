//! Freehand path shape.

use super::offsets_bounds;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// A freehand path. Vertices are relative to the owning shape's `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub d: Vec<Vec2>,
    /// Closed paths hit-test as filled polygons.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,
}

impl Path {
    pub fn new(d: Vec<Vec2>) -> Self {
        Self { d, closed: false }
    }

    /// Get the number of vertices.
    pub fn len(&self) -> usize {
        self.d.len()
    }

    /// Check if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// Largest side of the vertex bounding box.
    pub fn extent(&self) -> f64 {
        let bounds = offsets_bounds(&self.d);
        bounds.width().max(bounds.height())
    }
}
