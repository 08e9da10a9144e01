//! Image shape referencing an external asset.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// How the asset is fitted into the shape's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

/// An image placed on the canvas. Pixel data is owned by the asset store;
/// only the reference is kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Display width and height.
    pub size: Vec2,
    /// Key into the external asset store.
    pub asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
}

impl Image {
    pub fn new(size: Vec2, asset_id: impl Into<String>) -> Self {
        Self {
            size,
            asset_id: asset_id.into(),
            object_fit: None,
        }
    }

    /// Bounding box relative to the top-left corner.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.x, self.size.y)
    }
}
