//! # LayoutKit Designer
//!
//! Floor plan layout engine: areas with rectangle, circle and polygon
//! outlines placed on a 2D canvas, with storage units and facilities
//! positioned inside them.
//!
//! ## Core Components
//!
//! - **Model**: points, shapes, areas and placed entities
//! - **Geometry**: rotate, scale and flip transforms that keep an area's box
//!   and outline consistent
//! - **Polygon Editor**: draft polygon drawing and vertex editing
//! - **Resize**: eight-handle resize of rectangle areas
//! - **Renderer**: draw commands for areas and entities, plus a tiny-skia
//!   raster preview
//! - **Editor**: the controller tying pointer events, selection, zoom,
//!   undo/redo and events together
//!
//! ## Architecture
//!
//! ```text
//! LayoutEditor (pointer events, selection, zoom, modes)
//!   ├── Viewport (screen <-> document)
//!   ├── PolygonEditor (draft points)
//!   ├── DragSession (move / resize / vertex drag)
//!   ├── EntityStore (areas, storages, facilities)
//!   │     └── geometry (box/outline invariant)
//!   └── History (undo/redo)
//!
//! renderer -> DrawCommand -> raster (PNG)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layoutkit_designer::{EditorOptions, LayoutEditor, Point};
//!
//! let mut editor = LayoutEditor::new(EditorOptions::default());
//! editor.start_drawing()?;
//! for p in [(100.0, 100.0), (300.0, 120.0), (150.0, 260.0)] {
//!     editor.append_point(Point::new(p.0, p.1))?;
//! }
//! let id = editor.finish_drawing()?;
//! editor.rotate_selected(90.0)?;
//! ```

pub mod catalog;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod model;
pub mod polygon_editor;
pub mod raster;
pub mod renderer;
pub mod resize;
pub mod store;
pub mod templates;
pub mod viewport;

pub use catalog::{Catalog, Facility, Record, Repository, Shelf, StorageUnit};
pub use document::{LayoutDocument, LayoutMetadata, ViewState};
pub use editor::{EditorOptions, InteractionMode, LayoutEditor};
pub use geometry::{flip, polygon_from_absolute, rotate, scale, FlipAxis, PolygonOutline};
pub use history::{Change, History};
pub use interaction::{DragKind, DragSession, DragSnapshot};
pub use model::{
    Area, Bounds, EntityKind, FacilityPlacement, Footprint, Placeable, PlacedEntity, Point, Shape,
    ShapeType, StoragePlacement,
};
pub use polygon_editor::{PolygonEditor, PolygonEditorState};
pub use raster::{rasterize, save_png, RasterStyle};
pub use renderer::{render, render_entity, DrawCommand, RenderOptions};
pub use resize::{handles_for, resize_from_handle, HandleMarker, ResizeHandle, ResizeSession};
pub use store::EntityStore;
pub use templates::ShapeTemplate;
pub use viewport::Viewport;
