//! Engine-wide constants.
//!
//! Sizes are in layout units (pixels at zoom 1.0).

/// Smallest width/height a non-rectangle area box may take after a geometry operation.
pub const MIN_AREA_SIZE: f64 = 50.0;

/// Smallest width/height a box may take while dragging a resize handle.
pub const MIN_HANDLE_SIZE: f64 = 20.0;

/// Lower clamp for scale factors.
pub const MIN_SCALE_FACTOR: f64 = 0.1;

/// Upper clamp for scale factors.
pub const MAX_SCALE_FACTOR: f64 = 5.0;

/// Zoom range of the layout editor.
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom change applied per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Grid pitch used when grid snapping is enabled.
pub const GRID_SIZE: f64 = 10.0;

/// A polygon outline needs at least this many vertices.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Inset applied to one corner when flipping a square rectangle, so the flip is visible.
pub const FLIP_NOTCH_DEPTH: f64 = 20.0;

/// Screen-space size of resize handles and vertex markers.
pub const HANDLE_SIZE: f64 = 8.0;

/// Screen-space pick radius for handles and draft vertices.
pub const PICK_TOLERANCE: f64 = 6.0;

/// Default size of a newly created rectangle area.
pub const DEFAULT_AREA_WIDTH: f64 = 200.0;
pub const DEFAULT_AREA_HEIGHT: f64 = 150.0;

/// Default number of undo steps retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
