//! Line and arrow shapes.

use serde::{Deserialize, Serialize};
use kurbo::Vec2;

/// Default arrowhead size in world units.
pub const DEFAULT_HEAD_SIZE: f64 = 15.0;

fn default_head_size() -> f64 {
    DEFAULT_HEAD_SIZE
}

/// An open polyline. Points are relative to the owning shape's `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Vec2>,
}

impl Polyline {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Distance between the first and last point.
    pub fn span(&self) -> f64 {
        endpoint_span(&self.points)
    }
}

/// A polyline with an arrowhead at its last point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub points: Vec<Vec2>,
    /// Size of the arrowhead.
    #[serde(default = "default_head_size")]
    pub head_size: f64,
}

impl Arrow {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self {
            points,
            head_size: DEFAULT_HEAD_SIZE,
        }
    }

    /// Distance between the first and last point.
    pub fn span(&self) -> f64 {
        endpoint_span(&self.points)
    }

    /// Unit direction of the final segment, if it has length.
    pub fn head_direction(&self) -> Option<Vec2> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let dir = self.points[n - 1] - self.points[n - 2];
        let len = dir.hypot();
        (len > f64::EPSILON).then(|| dir / len)
    }
}

pub(crate) fn endpoint_span(points: &[Vec2]) -> f64 {
    match (points.first(), points.last()) {
        (Some(a), Some(b)) => (*b - *a).hypot(),
        _ => 0.0,
    }
}
