//! Pointer input types and the debounce timer for continuous gestures.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Identity of an input pointer (mouse, pen, or one touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The mouse pointer.
    pub const MOUSE: PointerId = PointerId(1);
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Constrain proportions / angles while drawing or transforming.
    pub fn constrain(&self) -> bool {
        self.shift
    }

    /// Add to or toggle the selection instead of replacing it.
    pub fn extend_selection(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }

    /// Temporarily disable snapping.
    pub fn bypass_snap(&self) -> bool {
        self.alt
    }
}

/// Pointer event in world coordinates, tagged with the pointer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        pointer: PointerId,
        position: Point,
        modifiers: Modifiers,
    },
    Move {
        pointer: PointerId,
        position: Point,
        modifiers: Modifiers,
    },
    Up {
        pointer: PointerId,
        position: Point,
        modifiers: Modifiers,
    },
    /// Escape pressed or pointer capture lost.
    Cancel { pointer: PointerId },
}

impl PointerEvent {
    pub fn pointer(&self) -> PointerId {
        match self {
            PointerEvent::Down { pointer, .. }
            | PointerEvent::Move { pointer, .. }
            | PointerEvent::Up { pointer, .. }
            | PointerEvent::Cancel { pointer } => *pointer,
        }
    }
}

/// Minimum pointer travel (screen pixels) before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Whether the pointer moved far enough from `origin` to count as a drag.
pub fn exceeds_drag_threshold(origin: Point, current: Point, scale: f64) -> bool {
    let delta: Vec2 = current - origin;
    delta.hypot() * scale >= DRAG_THRESHOLD_PX
}

/// Cancellable quiet-period timer for continuous operations (pan, zoom).
///
/// Every input delta calls [`bump`](Self::bump); once no delta has arrived for
/// `delay`, [`poll`](Self::poll) fires exactly once and the owner commits a
/// squash history entry. The owner must [`flush`](Self::flush) on teardown.
#[derive(Debug, Clone)]
pub struct SquashDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SquashDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the timer from `now`.
    pub fn bump(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Check if the timer is running.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire immediately if armed.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Stop the timer without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
