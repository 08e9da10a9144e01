//! Snap functionality for aligning moving geometry to the grid and to other shapes.
//!
//! Everything here is a pure function of its inputs so it can run on every
//! pointer move without accumulating error: callers always snap the value
//! derived from the gesture origin, never a previously snapped value.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default grid size in world units.
pub const GRID_SIZE: f64 = 20.0;

/// Default snap tolerance in screen pixels.
pub const SNAP_TOLERANCE_PX: f64 = 8.0;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Snapping settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Master switch.
    pub enabled: bool,
    /// Snap to grid multiples.
    pub snap_to_grid: bool,
    /// Snap to edges and centers of other shapes.
    pub snap_to_shapes: bool,
    /// Grid spacing in world units.
    pub grid_size: f64,
    /// Acceptance distance in screen pixels.
    pub tolerance_px: f64,
    /// Rotation snapping step in degrees.
    pub angle_step_deg: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_to_grid: true,
            snap_to_shapes: true,
            grid_size: GRID_SIZE,
            tolerance_px: SNAP_TOLERANCE_PX,
            angle_step_deg: ANGLE_SNAP_INCREMENT,
        }
    }
}

impl SnapConfig {
    /// Settings with every snap source switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// What a snapped value aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTargetKind {
    /// A grid multiple.
    Grid,
    /// The low edge of another shape's bounds.
    Min,
    /// The center of another shape's bounds.
    Center,
    /// The high edge of another shape's bounds.
    Max,
}

/// An alignment line to draw while snapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    /// Axis the coordinate belongs to (`X` = vertical guide line).
    pub axis: Axis,
    /// World coordinate of the guide.
    pub position: f64,
    pub kind: SnapTargetKind,
}

/// Result of snapping one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSnap {
    /// Amount added to the reference value to reach the target.
    pub correction: f64,
    pub guide: SnapGuide,
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// The snapped delta (translation) or point (handle drag), as a vector.
    pub value: Vec2,
    /// Correction applied on each axis.
    pub correction: Vec2,
    /// Guides for the axes that snapped.
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    /// A result with no snapping.
    pub fn none(value: Vec2) -> Self {
        Self {
            value,
            correction: Vec2::ZERO,
            guides: Vec::new(),
        }
    }

    pub fn snapped_x(&self) -> bool {
        self.guides.iter().any(|g| g.axis == Axis::X)
    }

    pub fn snapped_y(&self) -> bool {
        self.guides.iter().any(|g| g.axis == Axis::Y)
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        !self.guides.is_empty()
    }

    /// The snapped value as a point.
    pub fn point(&self) -> Point {
        self.value.to_point()
    }
}

/// Result of an angle snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSnapResult {
    /// Angle in radians after snapping.
    pub angle: f64,
    pub snapped: bool,
}

/// Nearest multiple of `grid_size` to `value`.
pub fn nearest_grid_line(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap an angle (radians) to the nearest multiple of `step_deg` if it lies
/// within `tolerance_deg` of it.
pub fn snap_angle(angle: f64, step_deg: f64, tolerance_deg: f64) -> AngleSnapResult {
    if step_deg <= 0.0 {
        return AngleSnapResult { angle, snapped: false };
    }
    let step = step_deg.to_radians();
    let nearest = (angle / step).round() * step;
    if (nearest - angle).abs() <= tolerance_deg.to_radians() + f64::EPSILON {
        AngleSnapResult { angle: nearest, snapped: true }
    } else {
        AngleSnapResult { angle, snapped: false }
    }
}

/// Snap a line endpoint to angle increments around `start`, preserving its
/// distance from `start`.
pub fn snap_line_endpoint(start: Point, end: Point, step_deg: f64) -> Point {
    let v = end - start;
    let distance = v.hypot();
    if distance < 0.001 {
        return end;
    }
    let snapped = snap_angle(v.atan2(), step_deg, step_deg / 2.0);
    start + Vec2::from_angle(snapped.angle) * distance
}

/// Snapping context for one gesture frame.
#[derive(Debug, Clone)]
pub struct SnapContext {
    pub config: SnapConfig,
    /// Current zoom; converts the pixel tolerance to world units.
    pub viewport_scale: f64,
    /// Bounds of shapes that are not being moved.
    pub targets: Vec<Rect>,
}

impl SnapContext {
    pub fn new(config: SnapConfig, viewport_scale: f64, targets: Vec<Rect>) -> Self {
        Self {
            config,
            viewport_scale,
            targets,
        }
    }

    /// Acceptance distance in world units.
    pub fn tolerance(&self) -> f64 {
        self.config.tolerance_px / self.viewport_scale.max(f64::EPSILON)
    }

    fn grid_enabled(&self) -> bool {
        self.config.enabled && self.config.snap_to_grid && self.config.grid_size > 0.0
    }

    fn shapes_enabled(&self) -> bool {
        self.config.enabled && self.config.snap_to_shapes
    }

    fn target_lines(&self, axis: Axis) -> Vec<(f64, SnapTargetKind)> {
        if !self.shapes_enabled() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.targets.len() * 3);
        for t in &self.targets {
            let (lo, hi) = match axis {
                Axis::X => (t.x0, t.x1),
                Axis::Y => (t.y0, t.y1),
            };
            lines.push((lo, SnapTargetKind::Min));
            lines.push(((lo + hi) / 2.0, SnapTargetKind::Center));
            lines.push((hi, SnapTargetKind::Max));
        }
        lines
    }

    /// Best candidate within tolerance for any of the reference values.
    /// `grid_refs` are matched against grid multiples, `shape_refs` against
    /// other shapes' min/center/max. Smallest absolute distance wins.
    fn best_on_axis(&self, axis: Axis, grid_refs: &[f64], shape_refs: &[f64]) -> Option<AxisSnap> {
        let tolerance = self.tolerance();
        let mut best: Option<AxisSnap> = None;
        let mut consider = |reference: f64, target: f64, kind: SnapTargetKind| {
            let correction = target - reference;
            if correction.abs() > tolerance {
                return;
            }
            if best.is_none_or(|b| correction.abs() < b.correction.abs()) {
                best = Some(AxisSnap {
                    correction,
                    guide: SnapGuide {
                        axis,
                        position: target,
                        kind,
                    },
                });
            }
        };

        if self.grid_enabled() {
            for &r in grid_refs {
                consider(r, nearest_grid_line(r, self.config.grid_size), SnapTargetKind::Grid);
            }
        }
        for (line, kind) in self.target_lines(axis) {
            for &r in shape_refs {
                consider(r, line, kind);
            }
        }
        best
    }

    /// Snap a single coordinate on one axis.
    pub fn snap_value(&self, axis: Axis, value: f64) -> Option<AxisSnap> {
        self.best_on_axis(axis, &[value], &[value])
    }

    /// Snap a free point (a dragged handle or a drawing cursor).
    pub fn snap_point(&self, point: Point) -> SnapResult {
        self.combine(
            point.to_vec2(),
            self.snap_value(Axis::X, point.x),
            self.snap_value(Axis::Y, point.y),
        )
    }

    /// Snap a translation of `moving` by `delta`.
    ///
    /// The moved box's min edge is matched against the grid; its min, center
    /// and max are matched against the other shapes' min, center and max.
    pub fn snap_translation(&self, moving: Rect, delta: Vec2) -> SnapResult {
        let moved = moving + delta;
        let xs = [moved.x0, (moved.x0 + moved.x1) / 2.0, moved.x1];
        let ys = [moved.y0, (moved.y0 + moved.y1) / 2.0, moved.y1];
        self.combine(
            delta,
            self.best_on_axis(Axis::X, &xs[..1], &xs),
            self.best_on_axis(Axis::Y, &ys[..1], &ys),
        )
    }

    /// Snap a rotation angle (radians) to the configured step within half a step.
    pub fn snap_rotation(&self, angle: f64) -> AngleSnapResult {
        if !self.config.enabled {
            return AngleSnapResult { angle, snapped: false };
        }
        snap_angle(angle, self.config.angle_step_deg, self.config.angle_step_deg / 2.0)
    }

    fn combine(&self, value: Vec2, x: Option<AxisSnap>, y: Option<AxisSnap>) -> SnapResult {
        let mut result = SnapResult::none(value);
        if let Some(s) = x {
            result.value.x += s.correction;
            result.correction.x = s.correction;
            result.guides.push(s.guide);
        }
        if let Some(s) = y {
            result.value.y += s.correction;
            result.correction.y = s.correction;
            result.guides.push(s.guide);
        }
        result
    }
}
