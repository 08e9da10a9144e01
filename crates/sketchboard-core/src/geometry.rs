//! Axis-aligned bounds and the small geometric predicates built on them.
//!
//! Bounds are `kurbo::Rect` in world units (`x0,y0` = min, `x1,y1` = max).
//! They are derived on demand and never stored. Rotation is ignored: a
//! rotated shape reports its unrotated box.

use crate::shapes::Shape;
use kurbo::{Point, Rect, Vec2};

/// Axis-aligned bounding box of a shape in world coordinates.
pub fn bounds_of(shape: &Shape) -> Rect {
    shape.bounds()
}

/// Grow `bounds` by `padding` on every side.
pub fn expand(bounds: Rect, padding: f64) -> Rect {
    bounds.inflate(padding, padding)
}

/// Running min/max over a list of bounds. `None` for empty input.
pub fn combine<I>(bounds: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    bounds.into_iter().reduce(|acc, b| acc.union(b))
}

/// Combined bounds of a set of shapes.
pub fn selection_bounds<'a, I>(shapes: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Shape>,
{
    combine(shapes.into_iter().map(Shape::bounds))
}

/// Inclusive point containment (edges count as inside).
pub fn contains_point(bounds: Rect, point: Point) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// Full containment: true only if `inner` lies entirely within `outer`.
pub fn contains_bounds(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
/// A single vertex degrades to point distance; an empty list is infinitely far.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Perpendicular distance from a point to the infinite line through a and b.
pub fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len = d.hypot();
    if len < f64::EPSILON {
        return point.distance(a);
    }
    d.cross(point - a).abs() / len
}

/// Even-odd point-in-polygon test over the closed vertex loop.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = vi.x + (point.y - vi.y) * (vj.x - vi.x) / (vj.y - vi.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Rotate `point` about `pivot` by `angle` radians.
pub fn rotate_about(point: Point, pivot: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let v = point - pivot;
    pivot + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
