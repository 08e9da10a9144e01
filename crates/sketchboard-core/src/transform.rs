//! Snapshot-based translate / scale / rotate of a set of shapes.
//!
//! A [`TransformSnapshot`] is taken once when a gesture starts. Every frame
//! re-derives the shapes from that snapshot, so repeated pointer moves never
//! accumulate error and cancelling restores the snapshot verbatim.

use crate::geometry::{rotate_about, selection_bounds};
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::{Point, Rect, Vec2};

/// Default minimum dimension a scaled shape may shrink to.
pub const MIN_SCALE_DIMENSION: f64 = 1.0;

/// Deep copy of the shapes under transformation and their combined bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSnapshot {
    shapes: Vec<Shape>,
    bounds: Rect,
}

impl TransformSnapshot {
    /// Snapshot `shapes`. Returns `None` for an empty set.
    pub fn capture<'a, I>(shapes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        let shapes: Vec<Shape> = shapes.into_iter().cloned().collect();
        let bounds = selection_bounds(shapes.iter())?;
        Some(Self { shapes, bounds })
    }

    /// Combined bounds at capture time.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center of the captured bounds; the default rotation pivot.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// The captured shapes, unmodified.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    /// Every shape moved by `delta`.
    pub fn translate(&self, delta: Vec2) -> Vec<Shape> {
        self.map(|shape| translate_shape(shape, delta))
    }

    /// Every shape remapped from the captured bounds onto `target`.
    ///
    /// `target` may be inverted (`x1 < x0`) to mirror. Each shape keeps at
    /// least `min_dimension` on any axis it had extent on.
    pub fn scale(&self, target: Rect, min_dimension: f64) -> Vec<Shape> {
        let map = AxisMap::new(self.bounds, target);
        self.map(|shape| scale_shape(shape, &map, min_dimension))
    }

    /// Every shape rotated by `angle` radians about `pivot`.
    ///
    /// Point-list shapes rotate around the pivot; box shapes only add the
    /// angle to their own `rotation` and keep their position.
    pub fn rotate(&self, angle: f64, pivot: Point) -> Vec<Shape> {
        self.map(|shape| rotate_shape(shape, angle, pivot))
    }

    /// Mirror every shape about the captured bounds' center line.
    pub fn flip(&self, horizontal: bool) -> Vec<Shape> {
        let b = self.bounds;
        let target = if horizontal {
            Rect::new(b.x1, b.y0, b.x0, b.y1)
        } else {
            Rect::new(b.x0, b.y1, b.x1, b.y0)
        };
        self.scale(target, 0.0)
    }

    fn map(&self, f: impl Fn(&Shape) -> Shape) -> Vec<Shape> {
        self.shapes
            .iter()
            .map(|shape| if shape.locked { shape.clone() } else { f(shape) })
            .collect()
    }
}

/// Per-axis linear map between two boxes. A zero-extent source axis only
/// translates.
#[derive(Debug, Clone, Copy)]
struct AxisMap {
    from: Rect,
    to: Rect,
}

impl AxisMap {
    fn new(from: Rect, to: Rect) -> Self {
        Self { from, to }
    }

    fn factor_x(&self) -> f64 {
        let w = self.from.width();
        if w.abs() <= f64::EPSILON { 1.0 } else { (self.to.x1 - self.to.x0) / w }
    }

    fn factor_y(&self) -> f64 {
        let h = self.from.height();
        if h.abs() <= f64::EPSILON { 1.0 } else { (self.to.y1 - self.to.y0) / h }
    }

    fn apply(&self, p: Point) -> Point {
        Point::new(
            self.to.x0 + (p.x - self.from.x0) * self.factor_x(),
            self.to.y0 + (p.y - self.from.y0) * self.factor_y(),
        )
    }
}

fn translate_shape(shape: &Shape, delta: Vec2) -> Shape {
    let mut out = shape.clone();
    out.position = shape.position + delta;
    out.touch();
    out
}

fn scale_shape(shape: &Shape, selection: &AxisMap, min_dimension: f64) -> Shape {
    let original = shape.bounds();
    let a = selection.apply(original.origin());
    let c = selection.apply(Point::new(original.x1, original.y1));
    // Not normalized: a negative factor leaves x1 < x0 (a mirror).
    let target = enforce_min(original, Rect::new(a.x, a.y, c.x, c.y), min_dimension);

    let local = AxisMap::new(original, target);
    let (fx, fy) = (local.factor_x(), local.factor_y());
    let mut out = shape.clone();

    match &shape.kind {
        ShapeKind::Rect(_) | ShapeKind::Text(_) | ShapeKind::Image(_) => {
            let r = target.abs();
            let size = Vec2::new(r.width().max(min_dimension), r.height().max(min_dimension));
            out.position = r.origin();
            match &mut out.kind {
                ShapeKind::Rect(rect) => rect.size = size,
                ShapeKind::Text(text) => text.box_size = size,
                ShapeKind::Image(image) => image.size = size,
                _ => {}
            }
        }
        ShapeKind::Ellipse(_) => {
            let r = target.abs();
            out.position = r.center();
            if let ShapeKind::Ellipse(ellipse) = &mut out.kind {
                ellipse.rx = (r.width() / 2.0).max(min_dimension / 2.0);
                ellipse.ry = (r.height() / 2.0).max(min_dimension / 2.0);
            }
        }
        ShapeKind::Line(_) | ShapeKind::Arrow(_) | ShapeKind::Path(_) => {
            if let ShapeKind::Arrow(arrow) = &mut out.kind {
                arrow.head_size *= (fx * fy).abs().sqrt();
            }
            if let Some(points) = shape.world_points() {
                let mapped: Vec<Point> = points.into_iter().map(|p| local.apply(p)).collect();
                out.set_world_points(&mapped);
            }
        }
    }

    // A single-axis mirror reverses the visual rotation direction.
    if (fx < 0.0) != (fy < 0.0) && !shape.has_points() {
        out.rotation = -shape.rotation;
    }
    out.touch();
    out
}

/// Grow `target` so that no axis the original had extent on shrinks below
/// `min_dimension`, keeping the mirror direction.
fn enforce_min(original: Rect, target: Rect, min_dimension: f64) -> Rect {
    let mut out = target;
    if original.width() > 0.0 && (out.x1 - out.x0).abs() < min_dimension {
        let sign = if out.x1 < out.x0 { -1.0 } else { 1.0 };
        out.x1 = out.x0 + sign * min_dimension;
    }
    if original.height() > 0.0 && (out.y1 - out.y0).abs() < min_dimension {
        let sign = if out.y1 < out.y0 { -1.0 } else { 1.0 };
        out.y1 = out.y0 + sign * min_dimension;
    }
    out
}

fn rotate_shape(shape: &Shape, angle: f64, pivot: Point) -> Shape {
    let mut out = shape.clone();
    match shape.world_points() {
        Some(points) => {
            let rotated: Vec<Point> = points
                .into_iter()
                .map(|p| rotate_about(p, pivot, angle))
                .collect();
            out.set_world_points(&rotated);
        }
        None => out.rotation = shape.rotation + angle.to_degrees(),
    }
    out.touch();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::rect(Point::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_translate_is_idempotent() {
        let shapes = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            Shape::line(Point::new(5.0, 5.0), vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]),
        ];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        let once = snapshot.translate(Vec2::new(3.0, 4.0));
        let twice = snapshot.translate(Vec2::new(3.0, 4.0));
        assert_eq!(once[0].position, twice[0].position);
        assert_eq!(once[1].position, Point::new(8.0, 9.0));
        assert_eq!(once[1].kind, shapes[1].kind);
    }

    #[test]
    fn test_scale_remaps_each_shape() {
        let shapes = vec![rect(0.0, 0.0, 50.0, 50.0), rect(50.0, 50.0, 50.0, 50.0)];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        let out = snapshot.scale(Rect::new(0.0, 0.0, 200.0, 100.0), MIN_SCALE_DIMENSION);

        assert_eq!(out[0].bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(out[1].bounds(), Rect::new(100.0, 50.0, 200.0, 100.0));
    }

    #[test]
    fn test_scale_ellipse_and_points() {
        let shapes = vec![
            Shape::ellipse(Point::new(10.0, 10.0), 10.0, 10.0),
            Shape::arrow(Point::new(20.0, 20.0), vec![Vec2::ZERO, Vec2::new(20.0, 20.0)]),
        ];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        assert_eq!(snapshot.bounds(), Rect::new(0.0, 0.0, 40.0, 40.0));
        let out = snapshot.scale(Rect::new(0.0, 0.0, 80.0, 20.0), MIN_SCALE_DIMENSION);

        let ShapeKind::Ellipse(e) = &out[0].kind else {
            panic!("Expected ellipse");
        };
        assert!(approx(e.rx, 20.0) && approx(e.ry, 5.0));
        assert_eq!(out[0].position, Point::new(20.0, 5.0));

        let points = out[1].world_points().unwrap();
        assert_eq!(points, vec![Point::new(40.0, 10.0), Point::new(80.0, 20.0)]);
        let ShapeKind::Arrow(a) = &out[1].kind else {
            panic!("Expected arrow");
        };
        // Geometric mean of 2.0 and 0.5 is 1.
        assert!(approx(a.head_size, crate::shapes::Arrow::new(vec![]).head_size));
    }

    #[test]
    fn test_scale_enforces_min_dimension() {
        let shapes = vec![rect(0.0, 0.0, 100.0, 100.0)];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        let out = snapshot.scale(Rect::new(0.0, 0.0, 0.1, 50.0), MIN_SCALE_DIMENSION);
        let b = out[0].bounds();
        assert!(approx(b.width(), 1.0));
        assert!(approx(b.height(), 50.0));
    }

    #[test]
    fn test_scale_degenerate_axis_translates() {
        // A vertical line has zero selection width.
        let shapes = vec![Shape::line(Point::new(10.0, 0.0), vec![Vec2::ZERO, Vec2::new(0.0, 100.0)])];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        let out = snapshot.scale(Rect::new(15.0, 0.0, 15.0, 50.0), MIN_SCALE_DIMENSION);
        let points = out[0].world_points().unwrap();
        assert_eq!(points, vec![Point::new(15.0, 0.0), Point::new(15.0, 50.0)]);
    }

    #[test]
    fn test_rotate_points_about_pivot_and_boxes_in_place() {
        let shapes = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            Shape::line(Point::new(10.0, 0.0), vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]),
        ];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        let out = snapshot.rotate(std::f64::consts::FRAC_PI_2, Point::ZERO);

        assert_eq!(out[0].position, Point::ZERO);
        assert!(approx(out[0].rotation, 90.0));

        let points = out[1].world_points().unwrap();
        assert!(approx(points[0].x, 0.0) && approx(points[0].y, 10.0));
        assert!(approx(points[1].x, 0.0) && approx(points[1].y, 20.0));
        assert_eq!(out[1].position, points[0]);
    }

    #[test]
    fn test_locked_shapes_are_untouched() {
        let mut locked = rect(0.0, 0.0, 10.0, 10.0);
        locked.locked = true;
        let snapshot = TransformSnapshot::capture([&locked]).unwrap();
        let out = snapshot.translate(Vec2::new(5.0, 5.0));
        assert_eq!(out[0], locked);
    }

    #[test]
    fn test_flip_mirrors_points() {
        let shapes = vec![Shape::line(Point::ZERO, vec![Vec2::ZERO, Vec2::new(10.0, 5.0)])];
        let snapshot = TransformSnapshot::capture(&shapes).unwrap();
        let out = snapshot.flip(true);
        let points = out[0].world_points().unwrap();
        assert_eq!(points, vec![Point::new(10.0, 0.0), Point::new(0.0, 5.0)]);
    }

    #[test]
    fn test_empty_capture() {
        let shapes: Vec<Shape> = Vec::new();
        assert!(TransformSnapshot::capture(&shapes).is_none());
    }
}
