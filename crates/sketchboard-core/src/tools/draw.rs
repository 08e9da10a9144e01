//! Creation gestures: rectangle, ellipse, line, arrow and freehand path.
//!
//! `begin` inserts a degenerate shape right away so it is visible while
//! dragging; `update` re-derives its geometry from the gesture origin and the
//! current pointer; `finalize` validates and commits exactly one undo step;
//! `cancel` removes the shape as if it had never existed.

use super::ToolKind;
use crate::input::{Modifiers, PointerId};
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
use crate::simplify::simplify;
use crate::snap::snap_line_endpoint;
use crate::store::{CommitOptions, SelectionMode, Store};
use kurbo::{Point, Rect, Vec2};

/// Which shape a draw gesture creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Path,
}

impl DrawKind {
    /// The draw kind behind a creation tool.
    pub fn from_tool(tool: ToolKind) -> Option<Self> {
        match tool {
            ToolKind::Rectangle => Some(DrawKind::Rectangle),
            ToolKind::Ellipse => Some(DrawKind::Ellipse),
            ToolKind::Line => Some(DrawKind::Line),
            ToolKind::Arrow => Some(DrawKind::Arrow),
            ToolKind::Path => Some(DrawKind::Path),
            ToolKind::Select | ToolKind::Pan => None,
        }
    }

    /// History label for a finished draw.
    pub fn label(self) -> &'static str {
        match self {
            DrawKind::Rectangle => "Draw rectangle",
            DrawKind::Ellipse => "Draw ellipse",
            DrawKind::Line => "Draw line",
            DrawKind::Arrow => "Draw arrow",
            DrawKind::Path => "Draw path",
        }
    }

    fn snaps(self) -> bool {
        !matches!(self, DrawKind::Path)
    }

    fn initial_shape(self, origin: Point) -> Shape {
        match self {
            DrawKind::Rectangle => Shape::rect(origin, Vec2::ZERO),
            DrawKind::Ellipse => Shape::ellipse(origin, 0.0, 0.0),
            DrawKind::Line => Shape::line(origin, vec![Vec2::ZERO, Vec2::ZERO]),
            DrawKind::Arrow => Shape::arrow(origin, vec![Vec2::ZERO, Vec2::ZERO]),
            DrawKind::Path => Shape::path(origin, vec![Vec2::ZERO]),
        }
    }
}

/// An in-progress creation gesture.
#[derive(Debug, Clone)]
pub struct DrawGesture {
    kind: DrawKind,
    pointer: PointerId,
    origin: Point,
    shape_id: ShapeId,
    /// Raw world samples (path only).
    samples: Vec<Point>,
    /// Whether `begin` created the pending history snapshot.
    created_pending: bool,
}

impl DrawGesture {
    /// Start drawing at `point` and insert the provisional shape.
    pub fn begin(
        store: &mut Store,
        kind: DrawKind,
        pointer: PointerId,
        point: Point,
        modifiers: Modifiers,
        style: &ShapeStyle,
    ) -> Self {
        let origin = if kind.snaps() && !modifiers.bypass_snap() {
            store.snap_context(&[]).snap_point(point).point()
        } else {
            point
        };
        let shape = kind
            .initial_shape(origin)
            .with_style(style)
            .with_z_index(store.document().next_z());
        let shape_id = shape.id();

        let created_pending = store.capture_snapshot();
        store.add_or_replace_shape(shape);
        log::debug!("Begin {:?} draw at ({:.1}, {:.1})", kind, origin.x, origin.y);

        Self {
            kind,
            pointer,
            origin,
            shape_id,
            samples: vec![origin],
            created_pending,
        }
    }

    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// Re-derive the shape from the origin and `point`. For paths, `force`
    /// records the sample even if it is closer than the sampling distance.
    pub fn update(&mut self, store: &mut Store, point: Point, modifiers: Modifiers, force: bool) {
        let point = if self.kind.snaps() && !modifiers.bypass_snap() {
            store.snap_context(&[self.shape_id]).snap_point(point).point()
        } else {
            point
        };
        let origin = self.origin;
        let constrain = modifiers.constrain();
        let angle_step = store.config().snap.angle_step_deg;

        match self.kind {
            DrawKind::Rectangle | DrawKind::Ellipse => {
                let corner = if constrain { square_corner(origin, point) } else { point };
                let r = Rect::from_points(origin, corner);
                store.update_shape(self.shape_id, |shape| match &mut shape.kind {
                    ShapeKind::Rect(rect) => {
                        shape.position = r.origin();
                        rect.size = Vec2::new(r.width(), r.height());
                    }
                    ShapeKind::Ellipse(ellipse) => {
                        shape.position = r.center();
                        ellipse.rx = r.width() / 2.0;
                        ellipse.ry = r.height() / 2.0;
                    }
                    _ => {}
                });
            }
            DrawKind::Line | DrawKind::Arrow => {
                let end = if constrain {
                    snap_line_endpoint(origin, point, angle_step)
                } else {
                    point
                };
                store.update_shape(self.shape_id, |shape| {
                    if let Some(points) = shape.kind.offsets_mut() {
                        *points = vec![Vec2::ZERO, end - origin];
                    }
                });
            }
            DrawKind::Path => {
                let min_distance = store.config().freehand_min_sample_distance;
                let far_enough = self
                    .samples
                    .last()
                    .is_none_or(|last| last.distance(point) >= min_distance);
                let is_new = self.samples.last() != Some(&point);
                if !(far_enough || (force && is_new)) {
                    return;
                }
                self.samples.push(point);
                let d: Vec<Vec2> = self.samples.iter().map(|p| *p - origin).collect();
                store.update_shape(self.shape_id, |shape| {
                    if let Some(points) = shape.kind.offsets_mut() {
                        *points = d;
                    }
                });
            }
        }
        log::trace!("Update {:?} draw to ({:.1}, {:.1})", self.kind, point.x, point.y);
    }

    /// Validate and commit the shape. Degenerate results are cancelled.
    /// On success the shape becomes the sole selection and the tool
    /// returns to select.
    pub fn finalize(self, store: &mut Store) -> Option<ShapeId> {
        if self.kind == DrawKind::Path {
            let epsilon = store.config().simplify_epsilon;
            let simplified = simplify(&self.samples, epsilon);
            log::debug!(
                "Simplified path from {} to {} points",
                self.samples.len(),
                simplified.len()
            );
            let origin = self.origin;
            store.update_shape(self.shape_id, |shape| {
                if let Some(points) = shape.kind.offsets_mut() {
                    *points = simplified.iter().map(|p| *p - origin).collect();
                }
            });
        }

        let min_size = store.config().min_draw_size;
        let valid = store
            .shape(self.shape_id)
            .is_some_and(|shape| is_valid_draw(shape, min_size));
        if !valid {
            log::debug!("Discarding degenerate {:?} draw", self.kind);
            self.cancel(store);
            return None;
        }

        store.commit(self.kind.label(), CommitOptions::default());
        store.set_selection(&[self.shape_id], SelectionMode::Set);
        store.set_tool(ToolKind::Select);
        log::debug!("Finalized {:?} draw {}", self.kind, self.shape_id);
        Some(self.shape_id)
    }

    /// Remove the provisional shape without leaving an undo step.
    pub fn cancel(self, store: &mut Store) {
        if self.created_pending {
            store.revert_pending();
        } else {
            // An earlier uncommitted change owns the pending snapshot, which
            // predates this shape; removing it folds back into that state.
            store.delete_shapes(&[self.shape_id]);
        }
        log::debug!("Cancelled {:?} draw", self.kind);
    }
}

/// Corner that makes the box from `origin` square along the dominant axis.
fn square_corner(origin: Point, point: Point) -> Point {
    let d = point - origin;
    let side = d.x.abs().max(d.y.abs());
    let sign = |v: f64| if v < 0.0 { -1.0 } else { 1.0 };
    origin + Vec2::new(side * sign(d.x), side * sign(d.y))
}

/// Whether a drawn shape is large enough to keep.
pub fn is_valid_draw(shape: &Shape, min_size: f64) -> bool {
    match &shape.kind {
        ShapeKind::Rect(rect) => rect.size.x >= min_size && rect.size.y >= min_size,
        ShapeKind::Ellipse(e) => e.rx * 2.0 >= min_size && e.ry * 2.0 >= min_size,
        ShapeKind::Line(line) => line.span() >= min_size,
        ShapeKind::Arrow(arrow) => arrow.span() >= min_size,
        ShapeKind::Path(path) => path.len() >= 2 && path.extent() >= min_size,
        ShapeKind::Text(_) | ShapeKind::Image(_) => true,
    }
}
