//! Click and marquee selection queries.

use crate::geometry::{contains_bounds, contains_point, point_in_polygon, point_to_polyline_dist};
use crate::shapes::{Shape, ShapeKind};
use kurbo::{Point, Rect};

/// Minimum world-unit tolerance for stroke-only shapes.
pub const MIN_STROKE_TOLERANCE: f64 = 4.0;

/// Whether `point` hits `shape` under its variant-specific rule.
///
/// Rect/text/image use bounds containment, ellipses the normalized quadratic
/// form, open point lists the distance to their segments within
/// `max(min_tolerance, strokeWidth)`, closed paths even-odd containment.
pub fn shape_contains(shape: &Shape, point: Point, min_tolerance: f64) -> bool {
    match &shape.kind {
        ShapeKind::Rect(_) | ShapeKind::Text(_) | ShapeKind::Image(_) => {
            contains_point(shape.bounds(), point)
        }
        ShapeKind::Ellipse(e) => e.contains(point - shape.position),
        ShapeKind::Path(p) if p.closed => shape
            .world_points()
            .is_some_and(|pts| point_in_polygon(point, &pts)),
        ShapeKind::Line(_) | ShapeKind::Arrow(_) | ShapeKind::Path(_) => {
            let tolerance = min_tolerance.max(shape.stroke_width);
            shape
                .world_points()
                .is_some_and(|pts| point_to_polyline_dist(point, &pts) <= tolerance)
        }
    }
}

/// Topmost visible shape under `point`, by descending `z_index`.
/// Among equal z-indices the shape later in the list wins.
pub fn hit_test(shapes: &[Shape], point: Point) -> Option<&Shape> {
    hit_test_with_tolerance(shapes, point, MIN_STROKE_TOLERANCE)
}

/// [`hit_test`] with an explicit minimum stroke tolerance.
pub fn hit_test_with_tolerance(shapes: &[Shape], point: Point, min_tolerance: f64) -> Option<&Shape> {
    let mut candidates: Vec<&Shape> = shapes.iter().rev().filter(|s| !s.hidden).collect();
    candidates.sort_by(|a, b| b.z_index.total_cmp(&a.z_index));
    candidates
        .into_iter()
        .find(|s| shape_contains(s, point, min_tolerance))
}

/// Visible shapes whose bounds lie entirely within `region`.
/// Partially overlapping shapes are excluded.
pub fn shapes_within_bounds(shapes: &[Shape], region: Rect) -> Vec<&Shape> {
    let region = region.abs();
    shapes
        .iter()
        .filter(|s| !s.hidden && contains_bounds(region, s.bounds()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Path;
    use kurbo::Vec2;

    fn rect(x: f64, y: f64, w: f64, h: f64, z: f64) -> Shape {
        Shape::rect(Point::new(x, y), Vec2::new(w, h)).with_z_index(z)
    }

    #[test]
    fn test_topmost_by_z_index() {
        let back = rect(0.0, 0.0, 100.0, 100.0, 5.0);
        let front = rect(50.0, 50.0, 100.0, 100.0, 1.0);
        let shapes = vec![back.clone(), front.clone()];

        assert_eq!(hit_test(&shapes, Point::new(75.0, 75.0)).map(Shape::id), Some(back.id()));
        assert_eq!(hit_test(&shapes, Point::new(140.0, 140.0)).map(Shape::id), Some(front.id()));
        assert!(hit_test(&shapes, Point::new(300.0, 300.0)).is_none());
    }

    #[test]
    fn test_equal_z_prefers_later_shape() {
        let a = rect(0.0, 0.0, 10.0, 10.0, 0.0);
        let b = rect(0.0, 0.0, 10.0, 10.0, 0.0);
        let shapes = vec![a, b.clone()];
        assert_eq!(hit_test(&shapes, Point::new(5.0, 5.0)).map(Shape::id), Some(b.id()));
    }

    #[test]
    fn test_hidden_shapes_are_skipped() {
        let mut hidden = rect(0.0, 0.0, 10.0, 10.0, 0.0);
        hidden.hidden = true;
        let shapes = vec![hidden];
        assert!(hit_test(&shapes, Point::new(5.0, 5.0)).is_none());
        assert!(shapes_within_bounds(&shapes, Rect::new(-1.0, -1.0, 20.0, 20.0)).is_empty());
    }

    #[test]
    fn test_ellipse_uses_quadratic_form() {
        let shapes = vec![Shape::ellipse(Point::new(50.0, 50.0), 30.0, 20.0)];
        assert!(hit_test(&shapes, Point::new(50.0, 50.0)).is_some());
        assert!(hit_test(&shapes, Point::new(80.0, 50.0)).is_some());
        // Inside the bounds but outside the ellipse.
        assert!(hit_test(&shapes, Point::new(78.0, 68.0)).is_none());
    }

    #[test]
    fn test_line_tolerance_uses_stroke_width() {
        let mut line = Shape::line(Point::ZERO, vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let shapes = vec![line.clone()];
        assert!(hit_test(&shapes, Point::new(50.0, 3.9)).is_some());
        assert!(hit_test(&shapes, Point::new(50.0, 6.0)).is_none());

        line.stroke_width = 8.0;
        let shapes = vec![line];
        assert!(hit_test(&shapes, Point::new(50.0, 6.0)).is_some());
    }

    #[test]
    fn test_closed_path_even_odd() {
        let mut shape = Shape::path(
            Point::new(10.0, 10.0),
            vec![Vec2::ZERO, Vec2::new(40.0, 0.0), Vec2::new(40.0, 40.0), Vec2::new(0.0, 40.0)],
        );
        let shapes = vec![shape.clone()];
        // Open: the interior is not a hit.
        assert!(hit_test(&shapes, Point::new(30.0, 30.0)).is_none());

        if let ShapeKind::Path(Path { closed, .. }) = &mut shape.kind {
            *closed = true;
        }
        let shapes = vec![shape];
        assert!(hit_test(&shapes, Point::new(30.0, 30.0)).is_some());
        assert!(hit_test(&shapes, Point::new(60.0, 30.0)).is_none());
    }

    #[test]
    fn test_marquee_requires_full_containment() {
        let inside = rect(10.0, 10.0, 20.0, 20.0, 0.0);
        let partial = rect(90.0, 90.0, 20.0, 20.0, 0.0);
        let shapes = vec![inside.clone(), partial];
        let hits = shapes_within_bounds(&shapes, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), inside.id());
    }

    #[test]
    fn test_marquee_accepts_inverted_region() {
        let inside = rect(10.0, 10.0, 20.0, 20.0, 0.0);
        let shapes = vec![inside];
        assert_eq!(shapes_within_bounds(&shapes, Rect::new(100.0, 100.0, 0.0, 0.0)).len(), 1);
    }
}
