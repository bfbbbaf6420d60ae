//! # LayoutKit
//!
//! Editor engine for warehouse floor plans:
//! - Areas with rectangle, circle and polygon outlines
//! - Rotate, scale and flip transforms that keep an area's box on its outline
//! - Polygon drawing and vertex editing, eight-handle rectangle resize
//! - Storage units and facilities placed from a master-data catalog
//! - Draw command rendering and PNG previews
//!
//! ## Architecture
//!
//! LayoutKit is organized as a workspace with multiple crates:
//!
//! 1. **layoutkit-core** - Error types, engine constants, layout events
//! 2. **layoutkit-designer** - Shape model, geometry, editor controller, rendering
//! 3. **layoutkit-settings** - Configuration files
//! 4. **layoutkit** - This crate: re-exports, logging setup and the command line tool

pub mod cli;

pub use layoutkit_core::{
    constants, CatalogError, EditorError, Error, EventDispatcher, LayoutEvent, Result,
};

pub use layoutkit_designer::{
    flip, rasterize, render, rotate, save_png, scale, Area, Catalog, DrawCommand, EditorOptions,
    EntityKind, EntityStore, Facility, FlipAxis, Footprint, InteractionMode, LayoutDocument,
    LayoutEditor, Placeable, PlacedEntity, Point, PolygonEditor, RasterStyle, ResizeHandle, Shape,
    ShapeTemplate, ShapeType, Shelf, StorageUnit, Viewport,
};

pub use layoutkit_settings::{Config, EditorSettings, LogLevel, LoggingSettings, RenderSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Editor options from the `[editor]` settings section.
pub fn editor_options(settings: &EditorSettings) -> EditorOptions {
    EditorOptions {
        default_zoom: settings.default_zoom,
        grid_snap: settings.grid_snap,
        grid_size: settings.grid_size,
        vertex_handles: settings.show_vertex_handles,
        history_limit: settings.history_limit,
        new_area_width: settings.new_area_width,
        new_area_height: settings.new_area_height,
    }
}

/// Preview colors from the `[render]` settings section.
pub fn raster_style(settings: &RenderSettings) -> RasterStyle {
    RasterStyle {
        background: settings.background.clone(),
        selection_color: settings.selection_color.clone(),
        handle_color: settings.handle_color.clone(),
        marker_color: settings.marker_color.clone(),
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, falling back to the configured level
/// - Console output, or output appended to the configured log file
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    match &settings.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            let fmt_layer = fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .context("Failed to install the log subscriber")?;
        }
        None => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_level(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .context("Failed to install the log subscriber")?;
        }
    }

    Ok(())
}
