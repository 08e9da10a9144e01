//! Selection handles and handle-driven resizing of the selection box.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Distance from the top edge to the rotation handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle, scales both axes.
    Corner(Corner),
    /// Edge midpoint handle, scales one axis.
    Edge(Edge),
    /// Rotation handle (positioned outside the box).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Corner {
    fn moves_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    fn moves_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    /// `tolerance` is in world units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Handles around a selection box at the given zoom `scale`.
pub fn handles_for(bounds: Rect, scale: f64) -> Vec<Handle> {
    let center = bounds.center();
    let rotate_offset = ROTATE_HANDLE_OFFSET / scale.max(f64::EPSILON);
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(Point::new(center.x, bounds.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(bounds.x1, center.y), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(center.x, bounds.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(bounds.x0, center.y), HandleKind::Edge(Edge::Left)),
        Handle::new(Point::new(center.x, bounds.y0 - rotate_offset), HandleKind::Rotate),
    ]
}

/// Find the handle nearest to `point` within `tolerance_px` screen pixels.
pub fn hit_test_handles(bounds: Rect, point: Point, scale: f64, tolerance_px: f64) -> Option<HandleKind> {
    let tolerance = tolerance_px / scale.max(f64::EPSILON);
    handles_for(bounds, scale)
        .into_iter()
        .filter(|h| h.hit_test(point, tolerance))
        .min_by(|a, b| {
            (point - a.position)
                .hypot2()
                .total_cmp(&(point - b.position).hypot2())
        })
        .map(|h| h.kind)
}

/// World position of a handle on `bounds` (the rotate handle maps to the top center).
pub fn handle_position(bounds: Rect, kind: HandleKind) -> Point {
    let center = bounds.center();
    match kind {
        HandleKind::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
        HandleKind::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
        HandleKind::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
        HandleKind::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
        HandleKind::Edge(Edge::Top) | HandleKind::Rotate => Point::new(center.x, bounds.y0),
        HandleKind::Edge(Edge::Right) => Point::new(bounds.x1, center.y),
        HandleKind::Edge(Edge::Bottom) => Point::new(center.x, bounds.y1),
        HandleKind::Edge(Edge::Left) => Point::new(bounds.x0, center.y),
    }
}

/// New selection box for a handle dragged to `point`.
///
/// The returned rect is *not* normalized: `x0`/`y0` are where the original
/// `x0`/`y0` edges go, so dragging past the opposite edge yields an inverted
/// box (a mirror). With `keep_aspect_ratio`, corner drags scale both axes by
/// the dominant axis factor, anchored at the opposite corner.
pub fn resize_bounds(original: Rect, handle: HandleKind, point: Point, keep_aspect_ratio: bool) -> Rect {
    let mut target = original;
    match handle {
        HandleKind::Corner(corner) => {
            if corner.moves_left() {
                target.x0 = point.x;
            } else {
                target.x1 = point.x;
            }
            if corner.moves_top() {
                target.y0 = point.y;
            } else {
                target.y1 = point.y;
            }
            if keep_aspect_ratio {
                target = keep_aspect(original, target, corner);
            }
        }
        HandleKind::Edge(Edge::Top) => target.y0 = point.y,
        HandleKind::Edge(Edge::Bottom) => target.y1 = point.y,
        HandleKind::Edge(Edge::Left) => target.x0 = point.x,
        HandleKind::Edge(Edge::Right) => target.x1 = point.x,
        HandleKind::Rotate => {}
    }
    target
}

fn keep_aspect(original: Rect, target: Rect, corner: Corner) -> Rect {
    let (ow, oh) = (original.width(), original.height());
    if ow <= f64::EPSILON || oh <= f64::EPSILON {
        return target;
    }
    let sx = (target.x1 - target.x0) / ow;
    let sy = (target.y1 - target.y0) / oh;
    let magnitude = sx.abs().max(sy.abs());
    let signed = |s: f64| if s < 0.0 { -magnitude } else { magnitude };
    let (sx, sy) = (signed(sx), signed(sy));

    let mut out = target;
    if corner.moves_left() {
        out.x0 = target.x1 - ow * sx;
    } else {
        out.x1 = target.x0 + ow * sx;
    }
    if corner.moves_top() {
        out.y0 = target.y1 - oh * sy;
    } else {
        out.y1 = target.y0 + oh * sy;
    }
    out
}

/// Angle swept from `start` to `current` around `pivot`, in radians.
pub fn rotation_angle(pivot: Point, start: Point, current: Point) -> f64 {
    let a: Vec2 = start - pivot;
    let b: Vec2 = current - pivot;
    if a.hypot2() <= f64::EPSILON || b.hypot2() <= f64::EPSILON {
        return 0.0;
    }
    let mut angle = b.atan2() - a.atan2();
    if angle > std::f64::consts::PI {
        angle -= std::f64::consts::TAU;
    } else if angle <= -std::f64::consts::PI {
        angle += std::f64::consts::TAU;
    }
    angle
}
