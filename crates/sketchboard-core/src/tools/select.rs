//! Select-tool gestures: marquee selection and move / scale / rotate of the
//! current selection.

use crate::input::{exceeds_drag_threshold, Modifiers, PointerId};
use crate::selection::{handle_position, resize_bounds, rotation_angle, HandleKind};
use crate::shapes::ShapeId;
use crate::snap::{snap_angle, SnapGuide};
use crate::store::{CommitOptions, SelectionMode, Store};
use crate::transform::TransformSnapshot;
use kurbo::{Point, Rect};

/// Rectangular drag selection.
#[derive(Debug, Clone)]
pub struct MarqueeGesture {
    pointer: PointerId,
    origin: Point,
    current: Point,
    /// Selection before the press; kept when extending, restored on cancel.
    initial: Vec<ShapeId>,
    extend: bool,
}

impl MarqueeGesture {
    /// Start a marquee. Without the extend modifier the selection is
    /// cleared right away.
    pub fn begin(store: &mut Store, pointer: PointerId, point: Point, modifiers: Modifiers) -> Self {
        log::debug!("Begin marquee at ({:.1}, {:.1})", point.x, point.y);
        let initial = store.selection();
        let extend = modifiers.extend_selection();
        if !extend {
            store.clear_selection();
        }
        Self {
            pointer,
            origin: point,
            current: point,
            initial,
            extend,
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// The marquee region in world space.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.origin, self.current)
    }

    /// Select the shapes fully inside the region.
    pub fn update(&mut self, store: &mut Store, point: Point) {
        self.current = point;
        let mut ids = if self.extend { self.initial.clone() } else { Vec::new() };
        for shape in store.shapes_within(self.rect()) {
            if !ids.contains(&shape.id()) {
                ids.push(shape.id());
            }
        }
        store.set_selection(&ids, SelectionMode::Set);
        log::trace!("Marquee selects {} shapes", ids.len());
    }

    pub fn finalize(self, store: &mut Store) -> Vec<ShapeId> {
        let selection = store.selection();
        log::debug!("Marquee selected {} shapes", selection.len());
        selection
    }

    /// Put the selection back as it was before the drag.
    pub fn cancel(self, store: &mut Store) {
        store.set_selection(&self.initial, SelectionMode::Set);
    }
}

/// What a transform gesture does with the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    Move,
    /// Scale by dragging a corner or edge handle.
    Scale(HandleKind),
    Rotate,
}

impl TransformMode {
    pub fn label(self) -> &'static str {
        match self {
            TransformMode::Move => "Move",
            TransformMode::Scale(_) => "Resize",
            TransformMode::Rotate => "Rotate",
        }
    }
}

/// Move / scale / rotate of the selection, always derived from the snapshot
/// taken at `begin`.
#[derive(Debug, Clone)]
pub struct TransformGesture {
    pointer: PointerId,
    mode: TransformMode,
    origin: Point,
    snapshot: TransformSnapshot,
    /// Whether a pending snapshot existed before this gesture changed anything.
    had_pending: bool,
    /// Set once the pointer has left the drag threshold.
    changed: bool,
    guides: Vec<SnapGuide>,
}

impl TransformGesture {
    /// Start transforming the current selection. `None` if nothing is selected.
    pub fn begin(store: &Store, pointer: PointerId, point: Point, mode: TransformMode) -> Option<Self> {
        let snapshot = TransformSnapshot::capture(store.selected_shapes())?;
        let mode = match mode {
            TransformMode::Scale(HandleKind::Rotate) => TransformMode::Rotate,
            other => other,
        };
        log::debug!("Begin {:?} of {} shapes", mode, snapshot.shapes().len());
        Some(Self {
            pointer,
            mode,
            origin: point,
            snapshot,
            had_pending: store.history().has_pending(),
            changed: false,
            guides: Vec::new(),
        })
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    /// Snap guides for the last update.
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    pub fn snapshot(&self) -> &TransformSnapshot {
        &self.snapshot
    }

    /// Recompute the selection from the snapshot for the pointer at `point`.
    /// Nothing changes until the pointer leaves the drag threshold.
    pub fn update(&mut self, store: &mut Store, point: Point, modifiers: Modifiers) {
        if !self.changed && !exceeds_drag_threshold(self.origin, point, store.viewport().scale) {
            return;
        }
        let snap = !modifiers.bypass_snap();
        let bounds = self.snapshot.bounds();
        self.guides.clear();

        let shapes = match self.mode {
            TransformMode::Move => {
                let mut delta = point - self.origin;
                if snap {
                    let result = store
                        .snap_context(&self.snapshot.ids())
                        .snap_translation(bounds, delta);
                    delta = result.value;
                    self.guides = result.guides;
                }
                self.snapshot.translate(delta)
            }
            TransformMode::Scale(handle) => {
                let mut target = handle_position(bounds, handle) + (point - self.origin);
                if snap {
                    let result = store.snap_context(&self.snapshot.ids()).snap_point(target);
                    target = result.point();
                    self.guides = result.guides;
                }
                let keep_aspect = modifiers.constrain() && matches!(handle, HandleKind::Corner(_));
                let new_bounds = resize_bounds(bounds, handle, target, keep_aspect);
                self.snapshot
                    .scale(new_bounds, store.config().min_scale_dimension)
            }
            TransformMode::Rotate => {
                let pivot = self.snapshot.center();
                let mut angle = rotation_angle(pivot, self.origin, point);
                if snap {
                    angle = store.snap_context(&self.snapshot.ids()).snap_rotation(angle).angle;
                }
                // Constrain snaps to the step even with snapping off.
                if modifiers.constrain() {
                    let step = store.config().snap.angle_step_deg;
                    angle = snap_angle(angle, step, step / 2.0).angle;
                }
                self.snapshot.rotate(angle, pivot)
            }
        };

        store.replace_shapes(shapes);
        self.changed = true;
        log::trace!("Update {:?} to ({:.1}, {:.1})", self.mode, point.x, point.y);
    }

    /// Commit one undo step if anything changed.
    pub fn finalize(self, store: &mut Store) -> bool {
        if !self.changed {
            return false;
        }
        log::debug!("Finalized {:?}", self.mode);
        store.commit(self.mode.label(), CommitOptions::default())
    }

    /// Restore the snapshot verbatim.
    pub fn cancel(self, store: &mut Store) {
        if !self.changed {
            return;
        }
        if self.had_pending {
            store.replace_shapes(self.snapshot.shapes().to_vec());
        } else {
            store.revert_pending();
        }
        log::debug!("Cancelled {:?}", self.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::selection::Edge;
    use crate::shapes::Shape;
    use crate::snap::SnapConfig;
    use kurbo::Vec2;

    const P: PointerId = PointerId::MOUSE;

    fn store_with_rects() -> (Store, ShapeId, ShapeId) {
        let mut store = Store::new(EditorConfig {
            snap: SnapConfig::disabled(),
            ..EditorConfig::default()
        });
        let a = store.add_or_replace_shape(Shape::rect(Point::new(0.0, 0.0), Vec2::new(10.0, 10.0)));
        let b = store.add_or_replace_shape(Shape::rect(Point::new(20.0, 0.0), Vec2::new(10.0, 10.0)));
        store.commit("Add", CommitOptions::default());
        (store, a, b)
    }

    #[test]
    fn test_marquee_requires_full_containment() {
        let (mut store, a, _) = store_with_rects();
        let mut marquee = MarqueeGesture::begin(&mut store, P, Point::new(-5.0, -5.0), Modifiers::NONE);
        marquee.update(&mut store, Point::new(25.0, 15.0));
        assert_eq!(store.selection(), vec![a]);
        assert_eq!(marquee.finalize(&mut store), vec![a]);
    }

    #[test]
    fn test_marquee_extend_and_cancel() {
        let (mut store, a, b) = store_with_rects();
        store.set_selection(&[b], SelectionMode::Set);
        let mut marquee = MarqueeGesture::begin(&mut store, P, Point::new(-5.0, -5.0), Modifiers::SHIFT);
        marquee.update(&mut store, Point::new(15.0, 15.0));
        assert_eq!(store.selection(), vec![b, a]);
        marquee.cancel(&mut store);
        assert_eq!(store.selection(), vec![b]);
    }

    #[test]
    fn test_marquee_cancel_restores_cleared_selection() {
        let (mut store, a, b) = store_with_rects();
        store.set_selection(&[a, b], SelectionMode::Set);
        let mut marquee = MarqueeGesture::begin(&mut store, P, Point::new(100.0, 100.0), Modifiers::NONE);
        assert!(store.selection().is_empty());
        marquee.update(&mut store, Point::new(90.0, 90.0));
        marquee.cancel(&mut store);
        assert_eq!(store.selection(), vec![a, b]);
    }

    #[test]
    fn test_move_commits_one_step() {
        let (mut store, a, b) = store_with_rects();
        store.set_selection(&[a, b], SelectionMode::Set);
        let mut gesture = TransformGesture::begin(&store, P, Point::new(5.0, 5.0), TransformMode::Move).unwrap();
        for i in 1..=10 {
            gesture.update(&mut store, Point::new(5.0 + i as f64, 5.0), Modifiers::NONE);
        }
        assert!(gesture.finalize(&mut store));
        assert_eq!(store.shape(a).unwrap().position, Point::new(10.0, 0.0));
        assert_eq!(store.shape(b).unwrap().position, Point::new(30.0, 0.0));
        assert_eq!(store.history().past_len(), 2);

        assert!(store.undo());
        assert_eq!(store.shape(a).unwrap().position, Point::ZERO);
    }

    #[test]
    fn test_click_without_drag_commits_nothing() {
        let (mut store, a, _) = store_with_rects();
        store.set_selection(&[a], SelectionMode::Set);
        let gesture = TransformGesture::begin(&store, P, Point::new(5.0, 5.0), TransformMode::Move).unwrap();
        assert!(!gesture.finalize(&mut store));
        assert_eq!(store.history().past_len(), 1);
    }

    #[test]
    fn test_scale_edge_and_cancel() {
        let (mut store, a, b) = store_with_rects();
        store.set_selection(&[a, b], SelectionMode::Set);
        let mut gesture = TransformGesture::begin(
            &store,
            P,
            Point::new(30.0, 5.0),
            TransformMode::Scale(HandleKind::Edge(Edge::Right)),
        )
        .unwrap();
        gesture.update(&mut store, Point::new(60.0, 5.0), Modifiers::NONE);
        assert_eq!(store.shape(b).unwrap().bounds(), Rect::new(40.0, 0.0, 60.0, 10.0));

        gesture.cancel(&mut store);
        assert_eq!(store.shape(b).unwrap().bounds(), Rect::new(20.0, 0.0, 30.0, 10.0));
        assert!(!store.history().has_pending());
    }

    #[test]
    fn test_rotate_snaps_with_constrain() {
        let (mut store, a, _) = store_with_rects();
        store.set_selection(&[a], SelectionMode::Set);
        // Pivot is (5, 5); start straight right of it.
        let mut gesture = TransformGesture::begin(&store, P, Point::new(15.0, 5.0), TransformMode::Rotate).unwrap();
        let p = Point::new(5.0 + 10.0 * 0.3_f64.cos(), 5.0 + 10.0 * 0.3_f64.sin());
        gesture.update(&mut store, p, Modifiers::SHIFT);
        assert!((store.shape(a).unwrap().rotation - 15.0).abs() < 1e-9);
        assert!(gesture.finalize(&mut store));
        assert_eq!(store.history().undo_label(), Some("Rotate"));
    }

    #[test]
    fn test_rotate_snaps_when_snapping_enabled() {
        let mut store = Store::new(EditorConfig::default());
        let a = store.add_or_replace_shape(Shape::rect(Point::new(0.0, 0.0), Vec2::new(10.0, 10.0)));
        store.commit("Add", CommitOptions::default());
        store.set_selection(&[a], SelectionMode::Set);

        let mut gesture = TransformGesture::begin(&store, P, Point::new(15.0, 5.0), TransformMode::Rotate).unwrap();
        let sweep = 17.0_f64.to_radians();
        let p = Point::new(5.0 + 10.0 * sweep.cos(), 5.0 + 10.0 * sweep.sin());
        gesture.update(&mut store, p, Modifiers::NONE);
        assert!((store.shape(a).unwrap().rotation - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_free_when_snapping_disabled() {
        let (mut store, a, _) = store_with_rects();
        store.set_selection(&[a], SelectionMode::Set);
        let mut gesture = TransformGesture::begin(&store, P, Point::new(15.0, 5.0), TransformMode::Rotate).unwrap();
        let sweep = 17.0_f64.to_radians();
        let p = Point::new(5.0 + 10.0 * sweep.cos(), 5.0 + 10.0 * sweep.sin());
        gesture.update(&mut store, p, Modifiers::NONE);
        assert!((store.shape(a).unwrap().rotation - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_below_threshold_commits_nothing() {
        let (mut store, a, _) = store_with_rects();
        store.set_selection(&[a], SelectionMode::Set);
        let mut gesture = TransformGesture::begin(&store, P, Point::new(5.0, 5.0), TransformMode::Move).unwrap();
        gesture.update(&mut store, Point::new(6.0, 5.5), Modifiers::NONE);
        gesture.update(&mut store, Point::new(4.0, 6.0), Modifiers::NONE);
        assert_eq!(store.shape(a).unwrap().position, Point::ZERO);
        assert!(!store.history().has_pending());
        assert!(!gesture.finalize(&mut store));
        assert_eq!(store.history().past_len(), 1);
    }

    #[test]
    fn test_empty_selection_has_no_gesture() {
        let (store, _, _) = store_with_rects();
        assert!(TransformGesture::begin(&store, P, Point::ZERO, TransformMode::Move).is_none());
    }
}
