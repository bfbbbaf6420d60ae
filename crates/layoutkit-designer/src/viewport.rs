//! Viewport and coordinate mapping for the layout canvas.
//!
//! Converts between screen coordinates (pointer events, relative to the page)
//! and document coordinates (layout units). Both spaces have Y pointing down.
//!
//! ```text
//! doc_x    = (screen_x - origin_x) / zoom
//! screen_x = doc_x * zoom + origin_x
//! ```

use layoutkit_core::constants::{GRID_SIZE, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use crate::model::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    origin_x: f64,
    origin_y: f64,
    grid_size: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            grid_size: GRID_SIZE,
        }
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to `[0.2, 3.0]`. Returns the applied value.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    /// Screen position of the canvas' top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Sets the canvas origin (typically on layout or scroll).
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin_x = x;
        self.origin_y = y;
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Ignores non-positive pitches.
    pub fn set_grid_size(&mut self, size: f64) {
        if size > 0.0 {
            self.grid_size = size;
        }
    }

    /// Rounds a document point to the nearest grid intersection.
    pub fn snap(&self, p: Point) -> Point {
        Point::new(
            (p.x / self.grid_size).round() * self.grid_size,
            (p.y / self.grid_size).round() * self.grid_size,
        )
    }

    /// Converts a pointer position to document coordinates, snapping when requested.
    pub fn screen_to_document(&self, screen_x: f64, screen_y: f64, snap: bool) -> Point {
        let p = Point::new(
            (screen_x - self.origin_x) / self.zoom,
            (screen_y - self.origin_y) / self.zoom,
        );
        if snap {
            self.snap(p)
        } else {
            p
        }
    }

    pub fn document_to_screen(&self, p: &Point) -> Point {
        Point::new(
            p.x * self.zoom + self.origin_x,
            p.y * self.zoom + self.origin_y,
        )
    }

    /// Applies a wheel notch. Only zooms while the zoom modifier is held;
    /// returns whether the zoom changed.
    pub fn handle_wheel(&mut self, delta_y: f64, modifier: bool) -> bool {
        if !modifier || delta_y == 0.0 {
            return false;
        }
        let before = self.zoom;
        if delta_y < 0.0 {
            self.zoom_in();
        } else {
            self.zoom_out();
        }
        (self.zoom - before).abs() > f64::EPSILON
    }
}
