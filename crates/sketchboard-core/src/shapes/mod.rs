//! Shape definitions for the drawing surface.
//!
//! A [`Shape`] carries the fields every variant shares (identity, placement,
//! stroke and fill, flags, timestamps) plus a [`ShapeKind`] holding the
//! variant-specific geometry. Point lists (`Line`, `Arrow`, `Path`) are stored
//! relative to `position`; world coordinates are always `position + offset`.

mod ellipse;
mod image;
mod line;
mod path;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use image::{Image, ObjectFit};
pub use line::{Arrow, Polyline};
pub use path::Path;
pub use rectangle::Rectangle;
pub use text::{Font, Text, TextAlign};

use crate::time::now_millis;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style applied to newly created shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke: Rgba,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    #[serde(default)]
    pub fill: Option<Rgba>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: Rgba::black(),
            stroke_width: 2.0,
            fill: None,
        }
    }
}

/// Variant-specific geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Rect(Rectangle),
    Ellipse(Ellipse),
    Line(Polyline),
    Arrow(Arrow),
    Path(Path),
    Text(Text),
    Image(Image),
}

impl ShapeKind {
    /// The serialized type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Rect(_) => "rect",
            ShapeKind::Ellipse(_) => "ellipse",
            ShapeKind::Line(_) => "line",
            ShapeKind::Arrow(_) => "arrow",
            ShapeKind::Path(_) => "path",
            ShapeKind::Text(_) => "text",
            ShapeKind::Image(_) => "image",
        }
    }

    /// Bounding box relative to the owning shape's `position`.
    pub fn local_bounds(&self) -> Rect {
        match self {
            ShapeKind::Rect(r) => r.local_bounds(),
            ShapeKind::Ellipse(e) => e.local_bounds(),
            ShapeKind::Line(l) => offsets_bounds(&l.points),
            ShapeKind::Arrow(a) => offsets_bounds(&a.points),
            ShapeKind::Path(p) => offsets_bounds(&p.d),
            ShapeKind::Text(t) => t.local_bounds(),
            ShapeKind::Image(i) => i.local_bounds(),
        }
    }

    /// Relative point list for line-like variants.
    pub fn offsets(&self) -> Option<&[Vec2]> {
        match self {
            ShapeKind::Line(l) => Some(&l.points),
            ShapeKind::Arrow(a) => Some(&a.points),
            ShapeKind::Path(p) => Some(&p.d),
            _ => None,
        }
    }

    /// Mutable relative point list for line-like variants.
    pub fn offsets_mut(&mut self) -> Option<&mut Vec<Vec2>> {
        match self {
            ShapeKind::Line(l) => Some(&mut l.points),
            ShapeKind::Arrow(a) => Some(&mut a.points),
            ShapeKind::Path(p) => Some(&mut p.d),
            _ => None,
        }
    }
}

/// Axis-aligned box around a list of relative offsets.
pub(crate) fn offsets_bounds(offsets: &[Vec2]) -> Rect {
    let Some(first) = offsets.first() else {
        return Rect::ZERO;
    };
    offsets.iter().skip(1).fold(
        Rect::new(first.x, first.y, first.x, first.y),
        |r, v| r.union_pt(v.to_point()),
    )
}

/// A shape on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// World-space origin. Rect/text/image: top-left; ellipse: center;
    /// line/arrow/path: origin of the relative point list.
    pub position: Point,
    /// Rotation in degrees. Visual only; bounds ignore it.
    #[serde(default)]
    pub rotation: f64,
    /// Paint and hit priority; higher draws on top.
    #[serde(default)]
    pub z_index: f64,
    /// Stroke color.
    pub stroke: Rgba,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Rgba>,
    /// Locked shapes are not moved by transforms.
    #[serde(default)]
    pub locked: bool,
    /// Hidden shapes are skipped by hit-testing and marquee selection.
    #[serde(default)]
    pub hidden: bool,
    /// Creation time (Unix millis).
    #[serde(default)]
    pub created_at: u64,
    /// Last modification time (Unix millis).
    #[serde(default)]
    pub updated_at: u64,
    /// Variant geometry.
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Create a shape with default style and a fresh ID.
    pub fn new(position: Point, kind: ShapeKind) -> Self {
        let now = now_millis();
        let style = ShapeStyle::default();
        Self {
            id: Uuid::new_v4(),
            position,
            rotation: 0.0,
            z_index: 0.0,
            stroke: style.stroke,
            stroke_width: style.stroke_width,
            fill: style.fill,
            locked: false,
            hidden: false,
            created_at: now,
            updated_at: now,
            kind,
        }
    }

    /// Rectangle with its top-left corner at `position`.
    pub fn rect(position: Point, size: Vec2) -> Self {
        Self::new(position, ShapeKind::Rect(Rectangle::new(size)))
    }

    /// Ellipse centered at `center`.
    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        Self::new(center, ShapeKind::Ellipse(Ellipse::new(rx, ry)))
    }

    /// Line through `points`, relative to `position`.
    pub fn line(position: Point, points: Vec<Vec2>) -> Self {
        Self::new(position, ShapeKind::Line(Polyline::new(points)))
    }

    /// Arrow through `points`, relative to `position`.
    pub fn arrow(position: Point, points: Vec<Vec2>) -> Self {
        Self::new(position, ShapeKind::Arrow(Arrow::new(points)))
    }

    /// Freehand path through `d`, relative to `position`.
    pub fn path(position: Point, d: Vec<Vec2>) -> Self {
        Self::new(position, ShapeKind::Path(Path::new(d)))
    }

    /// Text box with its top-left corner at `position`.
    pub fn text(position: Point, text: impl Into<String>, box_size: Vec2) -> Self {
        Self::new(position, ShapeKind::Text(Text::new(text, box_size)))
    }

    /// Image with its top-left corner at `position`.
    pub fn image(position: Point, size: Vec2, asset_id: impl Into<String>) -> Self {
        Self::new(position, ShapeKind::Image(Image::new(size, asset_id)))
    }

    /// Apply stroke and fill from a style.
    pub fn with_style(mut self, style: &ShapeStyle) -> Self {
        self.stroke = style.stroke;
        self.stroke_width = style.stroke_width;
        self.fill = style.fill;
        self
    }

    /// Set the z-index.
    pub fn with_z_index(mut self, z_index: f64) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Axis-aligned bounding box in world coordinates, ignoring `rotation`.
    pub fn bounds(&self) -> Rect {
        self.kind.local_bounds() + self.position.to_vec2()
    }

    /// Whether the geometry is stored as a point list.
    pub fn has_points(&self) -> bool {
        self.kind.offsets().is_some()
    }

    /// World-space points for line-like variants.
    pub fn world_points(&self) -> Option<Vec<Point>> {
        self.kind
            .offsets()
            .map(|offsets| offsets.iter().map(|v| self.position + *v).collect())
    }

    /// Replace the point list from world coordinates, re-deriving `position`
    /// as the first point. No-op for box-like variants or an empty list.
    pub fn set_world_points(&mut self, points: &[Point]) {
        let Some(&origin) = points.first() else {
            return;
        };
        if let Some(offsets) = self.kind.offsets_mut() {
            *offsets = points.iter().map(|p| *p - origin).collect();
            self.position = origin;
        }
    }

    /// Mark the shape as modified now.
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// Used when duplicating so the copy gets its own identity.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }
}
