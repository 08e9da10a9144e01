//! The persisted document: shapes, viewport and theme.

use crate::geometry::combine;
use crate::shapes::{Shape, ShapeId};
use crate::viewport::Viewport;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Layout version written by [`Document::to_json`].
pub const CURRENT_VERSION: u32 = 1;

/// Document decode errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unsupported document version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("Invalid document: {0}")]
    Invalid(String),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Color theme the document was authored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// A drawing document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes. Paint order is decided by `z_index`, not list position.
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub theme: Theme,
    /// Persisted layout version.
    pub version: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: Vec::new(),
            viewport: Viewport::default(),
            theme: Theme::default(),
            version: CURRENT_VERSION,
        }
    }

    /// Create a document with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Get a mutable shape by ID.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// List index of a shape.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the document has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Highest z-index in use, if any.
    pub fn max_z(&self) -> Option<f64> {
        self.shapes.iter().map(|s| s.z_index).reduce(f64::max)
    }

    /// z-index that places a new shape above everything else.
    pub fn next_z(&self) -> f64 {
        self.max_z().map_or(0.0, |z| z + 1.0)
    }

    /// Shape IDs sorted back to front (ties keep list order).
    pub fn z_order(&self) -> Vec<ShapeId> {
        let mut shapes: Vec<&Shape> = self.shapes.iter().collect();
        shapes.sort_by(|a, b| a.z_index.total_cmp(&b.z_index));
        shapes.into_iter().map(|s| s.id).collect()
    }

    /// Combined bounds of every visible shape.
    pub fn content_bounds(&self) -> Option<Rect> {
        combine(self.shapes.iter().filter(|s| !s.hidden).map(Shape::bounds))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, migrating older layouts forward.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        migrate(&mut value)?;
        let document: Document = serde_json::from_value(value)?;

        let mut seen = HashSet::with_capacity(document.shapes.len());
        if let Some(dup) = document.shapes.iter().find(|s| !seen.insert(s.id)) {
            return Err(DocumentError::Invalid(format!("duplicate shape id {}", dup.id)));
        }
        Ok(document)
    }
}

/// Bring a raw JSON document up to [`CURRENT_VERSION`].
fn migrate(value: &mut Value) -> DocumentResult<()> {
    let Some(root) = value.as_object_mut() else {
        return Err(DocumentError::Invalid("document root is not an object".to_string()));
    };
    let version = match root.get("version") {
        None | Some(Value::Null) => 0,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| DocumentError::Invalid("version is not an integer".to_string()))?,
    };
    if version > CURRENT_VERSION {
        return Err(DocumentError::UnsupportedVersion {
            found: version,
            supported: CURRENT_VERSION,
        });
    }

    if version < 1 {
        log::warn!("Migrating document from version {} to 1", version);
        let Some(shapes) = root.get_mut("shapes").and_then(Value::as_array_mut) else {
            return Err(DocumentError::Invalid("shapes is not an array".to_string()));
        };
        for (index, shape) in shapes.iter_mut().enumerate() {
            if let Some(obj) = shape.as_object_mut() {
                obj.entry("zIndex").or_insert_with(|| Value::from(index as f64));
            }
        }
    }

    root.insert("version".to_string(), Value::from(CURRENT_VERSION));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.version, CURRENT_VERSION);
        assert_eq!(doc.name, "Untitled");
        assert!(doc.content_bounds().is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = Document::with_name("Plan");
        doc.shapes.push(Shape::rect(Point::new(10.0, 10.0), Vec2::new(100.0, 50.0)));
        doc.shapes.push(Shape::ellipse(Point::new(0.0, 0.0), 5.0, 3.0).with_z_index(1.0));
        doc.shapes.push(Shape::path(
            Point::new(1.0, 2.0),
            vec![Vec2::ZERO, Vec2::new(3.0, 4.0)],
        ));

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"type\": \"rect\""));
        assert!(json.contains("\"zIndex\""));
        let restored = Document::from_json(&json).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_migrate_v0_assigns_z_index() {
        let json = r#"{
            "id": "doc",
            "name": "Old",
            "shapes": [
                {"id": "5f1c2a36-2c5d-4f49-9d4b-0a5b0f8d9e01", "type": "rect",
                 "position": {"x": 0.0, "y": 0.0}, "stroke": {"r": 0, "g": 0, "b": 0, "a": 255},
                 "strokeWidth": 2.0, "size": {"x": 10.0, "y": 10.0}},
                {"id": "5f1c2a36-2c5d-4f49-9d4b-0a5b0f8d9e02", "type": "ellipse",
                 "position": {"x": 0.0, "y": 0.0}, "stroke": {"r": 0, "g": 0, "b": 0, "a": 255},
                 "strokeWidth": 2.0, "rx": 4.0, "ry": 4.0}
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.version, CURRENT_VERSION);
        assert!((doc.shapes[0].z_index - 0.0).abs() < f64::EPSILON);
        assert!((doc.shapes[1].z_index - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_newer_version() {
        let json = r#"{"id": "d", "name": "n", "shapes": [], "version": 99}"#;
        let err = Document::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnsupportedVersion { found: 99, supported: CURRENT_VERSION }
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let shape = Shape::rect(Point::ZERO, Vec2::new(1.0, 1.0));
        let mut doc = Document::new();
        doc.shapes.push(shape.clone());
        doc.shapes.push(shape);
        let json = doc.to_json().unwrap();
        assert!(matches!(Document::from_json(&json), Err(DocumentError::Invalid(_))));
    }

    #[test]
    fn test_z_order_and_next_z() {
        let mut doc = Document::new();
        let a = Shape::rect(Point::ZERO, Vec2::new(1.0, 1.0)).with_z_index(3.0);
        let b = Shape::rect(Point::ZERO, Vec2::new(1.0, 1.0)).with_z_index(-1.0);
        let (a_id, b_id) = (a.id(), b.id());
        doc.shapes.push(a);
        doc.shapes.push(b);
        assert_eq!(doc.z_order(), vec![b_id, a_id]);
        assert!((doc.next_z() - 4.0).abs() < f64::EPSILON);
    }
}
