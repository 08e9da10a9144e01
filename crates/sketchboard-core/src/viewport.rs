//! Viewport pan/zoom and the screen <-> world coordinate transform.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 16.0;

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`. Non-finite input maps to 1.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        1.0
    }
}

/// The view onto the infinite canvas.
///
/// `x`/`y` is the world point shown at the screen origin and `scale` is the
/// zoom factor, so `world = screen / scale + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World-space pan offset (x).
    pub x: f64,
    /// World-space pan offset (y).
    pub y: f64,
    /// Zoom factor in `[MIN_ZOOM, MAX_ZOOM]`.
    pub scale: f64,
    /// Reserved; always 0.
    #[serde(default)]
    pub rotation: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

/// Partial viewport update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
}

impl ViewportPatch {
    /// Patch that sets pan and zoom from another viewport.
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            x: Some(viewport.x),
            y: Some(viewport.y),
            scale: Some(viewport.scale),
            rotation: Some(viewport.rotation),
        }
    }
}

impl Viewport {
    /// Create a viewport with a clamped scale.
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale: clamp_scale(scale),
            rotation: 0.0,
        }
    }

    /// World-space pan offset.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// World-to-screen transform, for renderers.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale) * Affine::translate(-self.translation())
    }

    /// Screen-to-world transform, for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(1.0 / self.scale)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Zoom to `new_scale` (clamped), keeping the world point under
    /// `screen_point` fixed on screen.
    pub fn zoom_at_point(&self, screen_point: Point, new_scale: f64) -> Viewport {
        let new_scale = clamp_scale(new_scale);
        let anchor = self.screen_to_world(screen_point);
        Viewport {
            x: anchor.x - screen_point.x / new_scale,
            y: anchor.y - screen_point.y / new_scale,
            scale: new_scale,
            rotation: self.rotation,
        }
    }

    /// Pan so the content follows a pointer moved by `delta` screen pixels.
    pub fn pan_by_screen(&self, delta: Vec2) -> Viewport {
        Viewport {
            x: self.x - delta.x / self.scale,
            y: self.y - delta.y / self.scale,
            ..*self
        }
    }

    /// Apply a partial update. The scale is clamped; rotation is reserved and
    /// kept at 0.
    pub fn apply(&self, patch: &ViewportPatch) -> Viewport {
        Viewport {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            scale: clamp_scale(patch.scale.unwrap_or(self.scale)),
            rotation: 0.0,
        }
    }

    /// The world rectangle visible in a surface of `size` pixels.
    pub fn visible_world_rect(&self, size: Size) -> Rect {
        let origin = self.screen_to_world(Point::ZERO);
        let corner = self.screen_to_world(Point::new(size.width, size.height));
        Rect::from_points(origin, corner)
    }

    /// Viewport that shows `bounds` centered in a surface of `size` pixels,
    /// leaving `padding` pixels on each side.
    pub fn fit_to_bounds(bounds: Rect, size: Size, padding: f64) -> Viewport {
        if bounds.width() <= f64::EPSILON || bounds.height() <= f64::EPSILON {
            let center = bounds.center();
            return Viewport::new(
                center.x - size.width / 2.0,
                center.y - size.height / 2.0,
                1.0,
            );
        }

        let avail_w = (size.width - padding * 2.0).max(1.0);
        let avail_h = (size.height - padding * 2.0).max(1.0);
        let scale = clamp_scale((avail_w / bounds.width()).min(avail_h / bounds.height()));

        let center = bounds.center();
        Viewport::new(
            center.x - size.width / (2.0 * scale),
            center.y - size.height / (2.0 * scale),
            scale,
        )
    }
}
