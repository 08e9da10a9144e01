//! The document store: single source of truth for shapes, selection,
//! viewport and active tool.
//!
//! Every document or viewport mutation captures a history snapshot before it
//! applies, so any change is undoable even if the caller never commits.
//! Listeners registered with [`Store::subscribe`] are notified synchronously
//! after each change.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::geometry::selection_bounds;
use crate::history::{History, Restore};
use crate::hit_test::{hit_test_with_tolerance, shapes_within_bounds};
use crate::shapes::{Shape, ShapeId};
use crate::snap::SnapContext;
use crate::tools::ToolKind;
use crate::transform::TransformSnapshot;
use crate::viewport::{Viewport, ViewportPatch};
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashSet;
use std::fmt;

/// How `set_selection` combines the given IDs with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Replace the selection.
    #[default]
    Set,
    /// Append IDs not already selected.
    Add,
    /// Remove selected IDs, append the others.
    Toggle,
}

/// Z-order move for `reorder_selection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    /// One step toward the top.
    Forward,
    /// One step toward the bottom.
    Backward,
    /// Above everything.
    Front,
    /// Below everything.
    Back,
}

/// Mirror direction for `flip_selection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror left/right.
    Horizontal,
    /// Mirror top/bottom.
    Vertical,
}

/// Options for [`Store::commit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Merge into the previous squash entry instead of appending. A run of
    /// squash commits is one undo step: undo returns to the state before
    /// the whole run, not to the state before the last commit.
    pub squash: bool,
}

impl CommitOptions {
    /// Options for a squash commit.
    pub fn squash() -> Self {
        Self { squash: true }
    }
}

/// Change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    DocumentChanged,
    SelectionChanged,
    ViewportChanged,
    ToolChanged(ToolKind),
    HistoryChanged,
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Owned, injectable editor state.
pub struct Store {
    document: Document,
    selection: Vec<ShapeId>,
    tool: ToolKind,
    history: History,
    config: EditorConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("document", &self.document)
            .field("selection", &self.selection)
            .field("tool", &self.tool)
            .field("history", &self.history)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Store {
    /// Create a store with an empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    /// Create a store around an existing document.
    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        Self {
            document,
            selection: Vec::new(),
            tool: ToolKind::default(),
            history: History::new(config.history_capacity),
            config,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    // --- Queries ---

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Selected IDs, in selection order, restricted to shapes that exist.
    pub fn selection(&self) -> Vec<ShapeId> {
        self.selection
            .iter()
            .copied()
            .filter(|id| self.document.contains(*id))
            .collect()
    }

    /// Selected shapes, in selection order.
    pub fn selected_shapes(&self) -> Vec<&Shape> {
        self.selection
            .iter()
            .filter_map(|id| self.document.shape(*id))
            .collect()
    }

    /// Combined bounds of the selection.
    pub fn selection_bounds(&self) -> Option<Rect> {
        selection_bounds(self.selected_shapes())
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id) && self.document.contains(id)
    }

    pub fn viewport(&self) -> Viewport {
        self.document.viewport
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.document.shape(id)
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Topmost visible shape under a world point.
    pub fn hit_test(&self, point: Point) -> Option<&Shape> {
        hit_test_with_tolerance(&self.document.shapes, point, self.config.hit_tolerance)
    }

    /// Visible shapes fully inside a world region.
    pub fn shapes_within(&self, region: Rect) -> Vec<&Shape> {
        shapes_within_bounds(&self.document.shapes, region)
    }

    /// Snapping context against every visible shape except `exclude`.
    pub fn snap_context(&self, exclude: &[ShapeId]) -> SnapContext {
        let targets = self
            .document
            .shapes
            .iter()
            .filter(|s| !s.hidden && !exclude.contains(&s.id))
            .map(Shape::bounds)
            .collect();
        SnapContext::new(self.config.snap, self.document.viewport.scale, targets)
    }

    // --- Subscriptions ---

    /// Register a listener called after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // --- History ---

    /// Snapshot the current state as the pending undo step if none exists.
    /// Returns `true` if this call created the pending snapshot.
    pub fn capture_snapshot(&mut self) -> bool {
        let had_redo = self.history.can_redo();
        let created = self.history.capture(&self.document, &self.selection);
        if created || had_redo {
            self.emit(StoreEvent::HistoryChanged);
        }
        created
    }

    /// Finalize the pending snapshot as an undo step. No-op without one.
    pub fn commit(&mut self, label: &str, options: CommitOptions) -> bool {
        let committed = self.history.commit(label, options.squash);
        if committed {
            self.emit(StoreEvent::HistoryChanged);
        }
        committed
    }

    /// Revert to the previous undo step (or the pending one).
    pub fn undo(&mut self) -> bool {
        let current = self.selection();
        match self.history.undo(&self.document, &current) {
            Some(restore) => {
                self.restore(restore);
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone step.
    pub fn redo(&mut self) -> bool {
        let current = self.selection();
        match self.history.redo(&self.document, &current) {
            Some(restore) => {
                self.restore(restore);
                true
            }
            None => false,
        }
    }

    /// Restore and drop the pending snapshot (used when a gesture is
    /// cancelled). Returns `false` if nothing was pending.
    pub fn revert_pending(&mut self) -> bool {
        match self.history.take_pending() {
            Some(restore) => {
                log::debug!("Reverting uncommitted changes");
                self.restore(restore);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, restore: Restore) {
        let viewport_changed = restore.document.viewport != self.document.viewport;
        self.document = restore.document;
        self.selection = restore.selection;
        self.prune_selection();
        self.emit(StoreEvent::DocumentChanged);
        self.emit(StoreEvent::SelectionChanged);
        if viewport_changed {
            self.emit(StoreEvent::ViewportChanged);
        }
        self.emit(StoreEvent::HistoryChanged);
    }

    // --- Shape mutations ---

    /// Insert a shape, or replace the shape with the same ID in place.
    pub fn add_or_replace_shape(&mut self, shape: Shape) -> ShapeId {
        self.capture_snapshot();
        let id = shape.id;
        match self.document.shape_mut(id) {
            Some(existing) => *existing = shape,
            None => self.document.shapes.push(shape),
        }
        self.emit(StoreEvent::DocumentChanged);
        id
    }

    /// Mutate a shape in place. Returns `false` if the ID is unknown.
    pub fn update_shape(&mut self, id: ShapeId, mutator: impl FnOnce(&mut Shape)) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.capture_snapshot();
        if let Some(shape) = self.document.shape_mut(id) {
            mutator(shape);
            shape.touch();
        }
        self.emit(StoreEvent::DocumentChanged);
        true
    }

    /// Replace shapes by ID with new versions (unknown IDs are ignored).
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        if shapes.is_empty() {
            return;
        }
        self.capture_snapshot();
        for shape in shapes {
            if let Some(existing) = self.document.shape_mut(shape.id) {
                *existing = shape;
            }
        }
        self.emit(StoreEvent::DocumentChanged);
    }

    /// Remove shapes. Returns the number removed.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> usize {
        if !ids.iter().any(|id| self.document.contains(*id)) {
            return 0;
        }
        self.capture_snapshot();
        let doomed: HashSet<ShapeId> = ids.iter().copied().collect();
        let before = self.document.shapes.len();
        self.document.shapes.retain(|s| !doomed.contains(&s.id));
        let removed = before - self.document.shapes.len();
        self.emit(StoreEvent::DocumentChanged);
        if self.prune_selection() {
            self.emit(StoreEvent::SelectionChanged);
        }
        removed
    }

    /// Drop selected IDs whose shapes no longer exist.
    fn prune_selection(&mut self) -> bool {
        let before = self.selection.len();
        let document = &self.document;
        self.selection.retain(|id| document.contains(*id));
        self.selection.len() != before
    }

    // --- Selection ---

    /// Change the selection. Unknown IDs are ignored.
    pub fn set_selection(&mut self, ids: &[ShapeId], mode: SelectionMode) {
        let mut next = match mode {
            SelectionMode::Set => Vec::new(),
            SelectionMode::Add | SelectionMode::Toggle => self.selection(),
        };
        for &id in ids.iter().filter(|id| self.document.contains(**id)) {
            match next.iter().position(|s| *s == id) {
                Some(i) if mode == SelectionMode::Toggle => {
                    next.remove(i);
                }
                Some(_) => {}
                None => next.push(id),
            }
        }
        if next != self.selection {
            self.selection = next;
            self.emit(StoreEvent::SelectionChanged);
        }
    }

    /// Select every visible shape.
    pub fn select_all(&mut self) {
        let ids: Vec<ShapeId> = self
            .document
            .shapes
            .iter()
            .filter(|s| !s.hidden)
            .map(|s| s.id)
            .collect();
        self.set_selection(&ids, SelectionMode::Set);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(&[], SelectionMode::Set);
    }

    // --- Viewport / tool ---

    /// Apply a partial viewport update (scale is clamped).
    pub fn set_viewport(&mut self, patch: ViewportPatch) {
        let next = self.document.viewport.apply(&patch);
        if next == self.document.viewport {
            return;
        }
        self.capture_snapshot();
        self.document.viewport = next;
        self.emit(StoreEvent::ViewportChanged);
    }

    /// Show all visible shapes in a surface of `size` pixels.
    pub fn fit_to_content(&mut self, size: Size, padding: f64) -> bool {
        let Some(bounds) = self.document.content_bounds() else {
            return false;
        };
        let fitted = Viewport::fit_to_bounds(bounds, size, padding);
        self.set_viewport(ViewportPatch::from_viewport(&fitted));
        self.commit("Zoom to fit", CommitOptions::default())
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("Tool changed: {:?} -> {:?}", self.tool, tool);
            self.tool = tool;
            self.emit(StoreEvent::ToolChanged(tool));
        }
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    // --- Selection actions (each commits one undo step) ---

    /// Copy the selected shapes, offset by the configured distance, above
    /// everything else. The copies become the selection.
    pub fn duplicate_selection(&mut self) -> Vec<ShapeId> {
        let mut originals: Vec<Shape> = self.selected_shapes().into_iter().cloned().collect();
        if originals.is_empty() {
            return Vec::new();
        }
        originals.sort_by(|a, b| a.z_index.total_cmp(&b.z_index));

        self.capture_snapshot();
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);
        let mut z = self.document.next_z();
        let mut ids = Vec::with_capacity(originals.len());
        for mut copy in originals {
            copy.regenerate_id();
            copy.position += offset;
            copy.z_index = z;
            copy.created_at = crate::time::now_millis();
            copy.updated_at = copy.created_at;
            z += 1.0;
            ids.push(copy.id);
            self.document.shapes.push(copy);
        }
        self.emit(StoreEvent::DocumentChanged);
        self.selection = ids.clone();
        self.emit(StoreEvent::SelectionChanged);
        self.commit("Duplicate", CommitOptions::default());
        ids
    }

    /// Move the selection in z-order. z-indices are renumbered 0..n.
    pub fn reorder_selection(&mut self, direction: ReorderDirection) -> bool {
        let selected: HashSet<ShapeId> = self.selection().into_iter().collect();
        if selected.is_empty() {
            return false;
        }

        let current = self.document.z_order();
        let mut order = current.clone();
        match direction {
            ReorderDirection::Front => {
                let (mut rest, top): (Vec<_>, Vec<_>) =
                    order.into_iter().partition(|id| !selected.contains(id));
                rest.extend(top);
                order = rest;
            }
            ReorderDirection::Back => {
                let (mut bottom, rest): (Vec<_>, Vec<_>) =
                    order.into_iter().partition(|id| selected.contains(id));
                bottom.extend(rest);
                order = bottom;
            }
            ReorderDirection::Forward => {
                for i in (0..order.len().saturating_sub(1)).rev() {
                    if selected.contains(&order[i]) && !selected.contains(&order[i + 1]) {
                        order.swap(i, i + 1);
                    }
                }
            }
            ReorderDirection::Backward => {
                for i in 1..order.len() {
                    if selected.contains(&order[i]) && !selected.contains(&order[i - 1]) {
                        order.swap(i, i - 1);
                    }
                }
            }
        }

        if order == current {
            return false;
        }

        self.capture_snapshot();
        for (i, id) in order.iter().enumerate() {
            if let Some(shape) = self.document.shape_mut(*id) {
                shape.z_index = i as f64;
            }
        }
        self.emit(StoreEvent::DocumentChanged);
        self.commit("Reorder", CommitOptions::default())
    }

    /// Move the selected, unlocked shapes by `delta`.
    pub fn nudge_selection(&mut self, delta: Vec2) -> bool {
        let Some(snapshot) = TransformSnapshot::capture(self.selected_shapes()) else {
            return false;
        };
        self.replace_shapes(snapshot.translate(delta));
        self.commit("Nudge", CommitOptions::default())
    }

    /// Mirror the selection about its bounds' center.
    pub fn flip_selection(&mut self, axis: FlipAxis) -> bool {
        let Some(snapshot) = TransformSnapshot::capture(self.selected_shapes()) else {
            return false;
        };
        self.replace_shapes(snapshot.flip(axis == FlipAxis::Horizontal));
        let label = match axis {
            FlipAxis::Horizontal => "Flip horizontal",
            FlipAxis::Vertical => "Flip vertical",
        };
        self.commit(label, CommitOptions::default())
    }

    /// Delete the selected shapes as one undo step.
    pub fn delete_selection(&mut self) -> usize {
        let ids = self.selection();
        let removed = self.delete_shapes(&ids);
        if removed > 0 {
            self.commit("Delete", CommitOptions::default());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(x: f64, y: f64) -> Shape {
        Shape::rect(Point::new(x, y), Vec2::new(10.0, 10.0))
    }

    #[test]
    fn test_add_and_replace() {
        let mut store = Store::default();
        let mut shape = rect(0.0, 0.0);
        let id = store.add_or_replace_shape(shape.clone());
        shape.position = Point::new(5.0, 5.0);
        store.add_or_replace_shape(shape);
        assert_eq!(store.document().len(), 1);
        assert_eq!(store.shape(id).unwrap().position, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_uncommitted_mutation_is_undoable() {
        let mut store = Store::default();
        store.add_or_replace_shape(rect(0.0, 0.0));
        assert!(store.can_undo());
        assert!(store.undo());
        assert!(store.document().is_empty());
        assert!(store.redo());
        assert_eq!(store.document().len(), 1);
    }

    #[test]
    fn test_selection_pruned_after_delete() {
        let mut store = Store::default();
        let a = store.add_or_replace_shape(rect(0.0, 0.0));
        let b = store.add_or_replace_shape(rect(20.0, 0.0));
        store.set_selection(&[a, b], SelectionMode::Set);
        store.delete_shapes(&[a]);
        assert_eq!(store.selection(), vec![b]);
    }

    #[test]
    fn test_selection_modes() {
        let mut store = Store::default();
        let a = store.add_or_replace_shape(rect(0.0, 0.0));
        let b = store.add_or_replace_shape(rect(20.0, 0.0));
        store.set_selection(&[a], SelectionMode::Set);
        store.set_selection(&[b], SelectionMode::Add);
        assert_eq!(store.selection(), vec![a, b]);
        store.set_selection(&[a], SelectionMode::Toggle);
        assert_eq!(store.selection(), vec![b]);
        store.set_selection(&[ShapeId::new_v4()], SelectionMode::Set);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_update_unknown_shape() {
        let mut store = Store::default();
        assert!(!store.update_shape(ShapeId::new_v4(), |s| s.locked = true));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_duplicate_selection() {
        let mut store = Store::default();
        let a = store.add_or_replace_shape(rect(0.0, 0.0));
        store.commit("Add", CommitOptions::default());
        store.set_selection(&[a], SelectionMode::Set);

        let copies = store.duplicate_selection();
        assert_eq!(copies.len(), 1);
        assert_ne!(copies[0], a);
        assert_eq!(store.selection(), copies);
        let copy = store.shape(copies[0]).unwrap();
        assert_eq!(copy.position, Point::new(10.0, 10.0));
        assert!(copy.z_index > store.shape(a).unwrap().z_index);

        assert!(store.undo());
        assert_eq!(store.document().len(), 1);
        assert_eq!(store.selection(), vec![a]);
    }

    #[test]
    fn test_duplicate_keeps_lock_flag() {
        let mut store = Store::default();
        let mut locked = rect(0.0, 0.0);
        locked.locked = true;
        let a = store.add_or_replace_shape(locked);
        store.commit("Add", CommitOptions::default());
        store.set_selection(&[a], SelectionMode::Set);

        let copies = store.duplicate_selection();
        assert_eq!(copies.len(), 1);
        let copy = store.shape(copies[0]).unwrap();
        assert!(copy.locked);
        assert_eq!(copy.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_reorder_selection() {
        let mut store = Store::default();
        let a = store.add_or_replace_shape(rect(0.0, 0.0).with_z_index(0.0));
        let b = store.add_or_replace_shape(rect(0.0, 0.0).with_z_index(1.0));
        let c = store.add_or_replace_shape(rect(0.0, 0.0).with_z_index(2.0));
        store.commit("Add", CommitOptions::default());

        store.set_selection(&[a], SelectionMode::Set);
        assert!(store.reorder_selection(ReorderDirection::Forward));
        assert_eq!(store.document().z_order(), vec![b, a, c]);
        assert!(store.reorder_selection(ReorderDirection::Front));
        assert_eq!(store.document().z_order(), vec![b, c, a]);
        assert!(!store.reorder_selection(ReorderDirection::Front));

        store.set_selection(&[c], SelectionMode::Set);
        assert!(store.reorder_selection(ReorderDirection::Back));
        assert_eq!(store.document().z_order(), vec![c, b, a]);
        assert!(!store.reorder_selection(ReorderDirection::Backward));
    }

    #[test]
    fn test_nudge_skips_locked() {
        let mut store = Store::default();
        let a = store.add_or_replace_shape(rect(0.0, 0.0));
        let mut locked = rect(50.0, 0.0);
        locked.locked = true;
        let b = store.add_or_replace_shape(locked);
        store.set_selection(&[a, b], SelectionMode::Set);

        assert!(store.nudge_selection(Vec2::new(1.0, 0.0)));
        assert_eq!(store.shape(a).unwrap().position, Point::new(1.0, 0.0));
        assert_eq!(store.shape(b).unwrap().position, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_flip_selection() {
        let mut store = Store::default();
        let a = store.add_or_replace_shape(Shape::line(Point::ZERO, vec![Vec2::ZERO, Vec2::new(10.0, 10.0)]));
        store.set_selection(&[a], SelectionMode::Set);
        assert!(store.flip_selection(FlipAxis::Vertical));
        let points = store.shape(a).unwrap().world_points().unwrap();
        assert_eq!(points, vec![Point::new(0.0, 10.0), Point::new(10.0, 0.0)]);
    }

    #[test]
    fn test_viewport_clamped_and_undoable() {
        let mut store = Store::default();
        store.set_viewport(ViewportPatch {
            scale: Some(100.0),
            ..Default::default()
        });
        assert!((store.viewport().scale - crate::viewport::MAX_ZOOM).abs() < f64::EPSILON);
        store.commit("Zoom", CommitOptions::squash());
        assert!(store.undo());
        assert!((store.viewport().scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_content() {
        let mut store = Store::default();
        assert!(!store.fit_to_content(Size::new(800.0, 600.0), 20.0));
        store.add_or_replace_shape(Shape::rect(Point::new(100.0, 100.0), Vec2::new(200.0, 100.0)));
        assert!(store.fit_to_content(Size::new(800.0, 600.0), 20.0));
        let vp = store.viewport();
        let top_left = vp.world_to_screen(Point::new(100.0, 100.0));
        assert!(top_left.x >= 20.0 - 1e-9 && top_left.y >= 20.0 - 1e-9);
    }

    #[test]
    fn test_revert_pending() {
        let mut store = Store::default();
        store.add_or_replace_shape(rect(0.0, 0.0));
        store.commit("Add", CommitOptions::default());
        store.add_or_replace_shape(rect(50.0, 0.0));
        assert!(store.revert_pending());
        assert_eq!(store.document().len(), 1);
        assert_eq!(store.history().past_len(), 1);
        assert!(!store.revert_pending());
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::default();
        let sink = Rc::clone(&events);
        let sub = store.subscribe(move |e| sink.borrow_mut().push(*e));

        let id = store.add_or_replace_shape(rect(0.0, 0.0));
        store.set_selection(&[id], SelectionMode::Set);
        store.set_tool(ToolKind::Rectangle);
        assert!(events.borrow().contains(&StoreEvent::DocumentChanged));
        assert!(events.borrow().contains(&StoreEvent::SelectionChanged));
        assert!(events.borrow().contains(&StoreEvent::ToolChanged(ToolKind::Rectangle)));

        assert!(store.unsubscribe(sub));
        let count = events.borrow().len();
        store.clear_selection();
        assert_eq!(events.borrow().len(), count);
    }
}
