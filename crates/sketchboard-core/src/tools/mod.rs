//! Tool system: routes pointer input to the gesture state machines.
//!
//! All positions passed in are world coordinates, converted by the caller
//! with the store's current viewport.

mod draw;
mod select;

pub use draw::{is_valid_draw, DrawGesture, DrawKind};
pub use select::{MarqueeGesture, TransformGesture, TransformMode};

use crate::input::{Instant, Modifiers, PointerEvent, PointerId, SquashDebouncer};
use crate::selection::hit_test_handles;
use crate::shapes::ShapeStyle;
use crate::store::{CommitOptions, SelectionMode, Store};
use crate::viewport::{Viewport, ViewportPatch};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Path,
}

impl ToolKind {
    /// Whether the tool creates shapes.
    pub fn is_drawing(self) -> bool {
        DrawKind::from_tool(self).is_some()
    }
}

/// Drag-to-pan. Because positions are in world space, keeping the grabbed
/// world point under the pointer means shifting the pan offset by the
/// pointer's world delta from the grab point.
#[derive(Debug, Clone)]
pub struct PanGesture {
    pointer: PointerId,
    grab: Point,
    /// Viewport at `begin`, restored on cancel.
    start: Viewport,
    changed: bool,
    created_pending: bool,
}

impl PanGesture {
    pub fn begin(store: &Store, pointer: PointerId, point: Point) -> Self {
        log::debug!("Begin pan at ({:.1}, {:.1})", point.x, point.y);
        Self {
            pointer,
            grab: point,
            start: store.viewport(),
            changed: false,
            created_pending: false,
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn update(&mut self, store: &mut Store, point: Point) {
        let delta = point - self.grab;
        if delta == Vec2::ZERO {
            return;
        }
        if !self.changed {
            self.created_pending = store.capture_snapshot();
        }
        let vp = store.viewport();
        store.set_viewport(ViewportPatch {
            x: Some(vp.x - delta.x),
            y: Some(vp.y - delta.y),
            ..Default::default()
        });
        self.changed = true;
        log::trace!("Pan to ({:.1}, {:.1})", vp.x - delta.x, vp.y - delta.y);
    }

    pub fn finalize(self, store: &mut Store) -> bool {
        self.changed && store.commit("Pan", CommitOptions::squash())
    }

    /// Put the viewport back. An earlier uncommitted change that owns the
    /// pending snapshot is left in place.
    pub fn cancel(self, store: &mut Store) {
        if !self.changed {
            return;
        }
        if self.created_pending {
            store.revert_pending();
        } else {
            store.set_viewport(ViewportPatch::from_viewport(&self.start));
        }
        log::debug!("Cancelled pan");
    }
}

/// The gesture currently owning pointer input.
#[derive(Debug, Clone)]
pub enum Gesture {
    Draw(DrawGesture),
    Marquee(MarqueeGesture),
    Transform(TransformGesture),
    Pan(PanGesture),
}

impl Gesture {
    pub fn pointer(&self) -> PointerId {
        match self {
            Gesture::Draw(g) => g.pointer(),
            Gesture::Marquee(g) => g.pointer(),
            Gesture::Transform(g) => g.pointer(),
            Gesture::Pan(g) => g.pointer(),
        }
    }

    fn cancel(self, store: &mut Store) {
        match self {
            Gesture::Draw(g) => g.cancel(store),
            Gesture::Marquee(g) => g.cancel(store),
            Gesture::Transform(g) => g.cancel(store),
            Gesture::Pan(g) => g.cancel(store),
        }
    }
}

/// Routes pointer events for one active gesture at a time and owns the
/// squash timer for wheel pan/zoom.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Current style to apply to new shapes.
    pub current_style: ShapeStyle,
    active: Option<Gesture>,
    debouncer: SquashDebouncer,
    /// Label for the pending wheel commit.
    wheel_label: &'static str,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new(store: &Store) -> Self {
        Self {
            current_style: ShapeStyle::default(),
            active: None,
            debouncer: SquashDebouncer::new(store.config().squash_debounce()),
            wheel_label: "Zoom",
        }
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The gesture in progress, for rendering previews and guides.
    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active.as_ref().map(Gesture::pointer)
    }

    /// Dispatch a pointer event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, store: &mut Store, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                pointer,
                position,
                modifiers,
            } => self.pointer_down(store, pointer, position, modifiers),
            PointerEvent::Move {
                pointer,
                position,
                modifiers,
            } => self.pointer_move(store, pointer, position, modifiers),
            PointerEvent::Up {
                pointer,
                position,
                modifiers,
            } => self.pointer_up(store, pointer, position, modifiers),
            PointerEvent::Cancel { pointer } => self.pointer_cancel(store, pointer),
        }
    }

    /// Start a gesture for the store's active tool. Ignored while another
    /// pointer owns a gesture.
    pub fn pointer_down(&mut self, store: &mut Store, pointer: PointerId, point: Point, modifiers: Modifiers) -> bool {
        if self.active.is_some() {
            return false;
        }
        // A new gesture closes any pending wheel run first.
        self.flush(store);

        let tool = store.tool();
        let gesture = match tool {
            ToolKind::Select => Self::begin_select(store, pointer, point, modifiers),
            ToolKind::Pan => Some(Gesture::Pan(PanGesture::begin(store, pointer, point))),
            _ => DrawKind::from_tool(tool).map(|kind| {
                Gesture::Draw(DrawGesture::begin(
                    store,
                    kind,
                    pointer,
                    point,
                    modifiers,
                    &self.current_style,
                ))
            }),
        };
        self.active = gesture;
        self.active.is_some()
    }

    fn begin_select(store: &mut Store, pointer: PointerId, point: Point, modifiers: Modifiers) -> Option<Gesture> {
        let scale = store.viewport().scale;
        if let Some(bounds) = store.selection_bounds() {
            let tolerance = store.config().handle_tolerance_px;
            if let Some(handle) = hit_test_handles(bounds, point, scale, tolerance) {
                return TransformGesture::begin(store, pointer, point, TransformMode::Scale(handle))
                    .map(Gesture::Transform);
            }
        }

        let hit = store.hit_test(point).map(|s| s.id());
        match hit {
            Some(id) => {
                if modifiers.extend_selection() {
                    store.set_selection(&[id], SelectionMode::Toggle);
                    if !store.is_selected(id) {
                        return None;
                    }
                } else if !store.is_selected(id) {
                    store.set_selection(&[id], SelectionMode::Set);
                }
                TransformGesture::begin(store, pointer, point, TransformMode::Move).map(Gesture::Transform)
            }
            None => Some(Gesture::Marquee(MarqueeGesture::begin(store, pointer, point, modifiers))),
        }
    }

    /// Update the active gesture if `pointer` owns it.
    pub fn pointer_move(&mut self, store: &mut Store, pointer: PointerId, point: Point, modifiers: Modifiers) -> bool {
        let Some(gesture) = self.active.as_mut().filter(|g| g.pointer() == pointer) else {
            return false;
        };
        match gesture {
            Gesture::Draw(g) => g.update(store, point, modifiers, false),
            Gesture::Marquee(g) => g.update(store, point),
            Gesture::Transform(g) => g.update(store, point, modifiers),
            Gesture::Pan(g) => g.update(store, point),
        }
        true
    }

    /// Finish the active gesture if `pointer` owns it.
    pub fn pointer_up(&mut self, store: &mut Store, pointer: PointerId, point: Point, modifiers: Modifiers) -> bool {
        if self.active_pointer() != Some(pointer) {
            return false;
        }
        let Some(gesture) = self.active.take() else {
            return false;
        };
        match gesture {
            Gesture::Draw(mut g) => {
                g.update(store, point, modifiers, true);
                g.finalize(store);
            }
            Gesture::Marquee(mut g) => {
                g.update(store, point);
                g.finalize(store);
            }
            Gesture::Transform(g) => {
                g.finalize(store);
            }
            Gesture::Pan(mut g) => {
                g.update(store, point);
                g.finalize(store);
            }
        }
        true
    }

    /// Cancel the active gesture if `pointer` owns it (pointer capture lost).
    pub fn pointer_cancel(&mut self, store: &mut Store, pointer: PointerId) -> bool {
        if self.active_pointer() != Some(pointer) {
            return false;
        }
        self.cancel(store)
    }

    /// Cancel whatever gesture is active (Escape).
    pub fn cancel(&mut self, store: &mut Store) -> bool {
        match self.active.take() {
            Some(gesture) => {
                gesture.cancel(store);
                true
            }
            None => false,
        }
    }

    /// Zoom by `factor` around a screen point; committed after the quiet period.
    pub fn wheel_zoom(&mut self, store: &mut Store, screen_point: Point, factor: f64, now: Instant) {
        let vp = store.viewport();
        let zoomed = vp.zoom_at_point(screen_point, vp.scale * factor);
        store.set_viewport(ViewportPatch::from_viewport(&zoomed));
        self.bump(store, "Zoom", now);
    }

    /// Pan by a screen-space delta; committed after the quiet period.
    pub fn wheel_pan(&mut self, store: &mut Store, delta: Vec2, now: Instant) {
        let panned = store.viewport().pan_by_screen(delta);
        store.set_viewport(ViewportPatch::from_viewport(&panned));
        self.bump(store, "Pan", now);
    }

    fn bump(&mut self, store: &mut Store, label: &'static str, now: Instant) {
        if self.debouncer.is_armed() && self.wheel_label != label {
            self.flush(store);
        }
        self.wheel_label = label;
        self.debouncer.bump(now);
    }

    /// Commit the wheel run once the quiet period has elapsed.
    pub fn tick(&mut self, store: &mut Store, now: Instant) -> bool {
        self.debouncer.poll(now) && store.commit(self.wheel_label, CommitOptions::squash())
    }

    /// Commit any pending wheel run immediately (teardown, new gesture).
    pub fn flush(&mut self, store: &mut Store) -> bool {
        self.debouncer.flush() && store.commit(self.wheel_label, CommitOptions::squash())
    }
}
