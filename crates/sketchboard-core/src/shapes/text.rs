//! Text shape.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Font description for a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font family name as understood by the renderer.
    pub family: String,
    /// CSS-style numeric weight (400 = regular).
    pub weight: u16,
    /// Font size in world units.
    pub size: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            weight: 400,
            size: 20.0,
        }
    }
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A text box. The owning shape's `position` is the top-left corner of `box`.
/// Layout is the renderer's concern; geometry only uses the box size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    /// Width and height of the layout box.
    #[serde(rename = "box")]
    pub box_size: Vec2,
    #[serde(default)]
    pub font: Font,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub shadow: bool,
}

impl Text {
    pub fn new(text: impl Into<String>, box_size: Vec2) -> Self {
        Self {
            text: text.into(),
            box_size,
            font: Font::default(),
            letter_spacing: None,
            line_height: None,
            align: None,
            italic: false,
            underline: false,
            shadow: false,
        }
    }

    /// Bounding box relative to the top-left corner.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.box_size.x, self.box_size.y)
    }
}
