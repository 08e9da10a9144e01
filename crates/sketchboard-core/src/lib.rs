//! Sketchboard Core Library
//!
//! Platform-agnostic interaction and geometry engine for the Sketchboard
//! drawing surface: shapes, viewport, hit-testing, snapping, undo history,
//! the document store and the tool gestures that edit it.

pub mod config;
pub mod document;
pub mod geometry;
pub mod history;
pub mod hit_test;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod simplify;
pub mod snap;
pub mod store;
pub mod time;
pub mod tools;
pub mod transform;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use document::{Document, DocumentError, DocumentResult, Theme, CURRENT_VERSION};
pub use history::{History, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
pub use input::{Modifiers, PointerEvent, PointerId, SquashDebouncer};
pub use selection::{Corner, Edge, Handle, HandleKind};
pub use shapes::{Rgba, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use simplify::simplify;
pub use snap::{SnapConfig, SnapContext, SnapGuide, SnapResult, SnapTargetKind, GRID_SIZE};
pub use store::{CommitOptions, FlipAxis, ReorderDirection, SelectionMode, Store, StoreEvent, SubscriptionId};
pub use tools::{ToolKind, ToolManager};
pub use transform::TransformSnapshot;
pub use viewport::{Viewport, ViewportPatch};
