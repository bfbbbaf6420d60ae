//! Shape renderer
//!
//! Maps areas and placed entities to screen-space draw commands. Rendering is
//! a pure function of the entity, the zoom factor and the selection flag; the
//! host paints the commands (see [`crate::raster`] for the built-in painter).
//!
//! Features:
//! - Box, circle and path primitives scaled by zoom
//! - Optional vertex markers on polygon outlines
//! - Rectangle fallback with an "unknown shape" marker for anything malformed
//! - Selection highlight that never changes the geometry

use layoutkit_core::constants::HANDLE_SIZE;
use serde::Serialize;

use crate::model::{Area, Placeable, PlacedEntity, Point, ShapeType};

pub const STORAGE_FILL: &str = "#fff3e0";
pub const STORAGE_STROKE: &str = "#ef6c00";
pub const FACILITY_FILL: &str = "#eceff1";
pub const FACILITY_STROKE: &str = "#455a64";

/// One primitive in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    Box {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        fill: String,
        stroke: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: String,
        stroke: String,
    },
    Path {
        points: Vec<Point>,
        closed: bool,
        fill: Option<String>,
        stroke: String,
    },
    VertexHandle {
        center: Point,
        size: f64,
    },
    ResizeHandle {
        handle: String,
        center: Point,
        size: f64,
    },
    /// Drawn over the fallback box of a shape that could not be rendered as itself.
    UnknownShapeMarker {
        x: f64,
        y: f64,
        size: f64,
    },
    SelectionOutline {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Draw a marker on every polygon vertex.
    pub vertex_handles: bool,
}

fn scaled_points(area: &Area, zoom: f64) -> Vec<Point> {
    area.absolute_points()
        .iter()
        .map(|p| Point::new(p.x * zoom, p.y * zoom))
        .collect()
}

/// Whether a rectangle outline is still the axis-aligned corner list of its box.
fn is_box_outline(area: &Area) -> bool {
    let points = &area.shape.points;
    if points.is_empty() {
        return true;
    }
    points.len() == 4
        && points.iter().all(|p| {
            (p.x.abs() < 0.5 || (p.x - area.width).abs() < 0.5)
                && (p.y.abs() < 0.5 || (p.y - area.height).abs() < 0.5)
        })
}

fn box_command(area: &Area, zoom: f64) -> DrawCommand {
    DrawCommand::Box {
        x: area.x * zoom,
        y: area.y * zoom,
        width: area.width * zoom,
        height: area.height * zoom,
        corner_radius: area.shape.border_radius.unwrap_or(0.0) * zoom,
        fill: area.color.clone(),
        stroke: area.border_color.clone(),
    }
}

fn fallback(area: &Area, zoom: f64, commands: &mut Vec<DrawCommand>) {
    tracing::debug!(
        "area {}: rendering {} shape as rectangle fallback",
        area.id,
        area.shape.shape_type
    );
    commands.push(box_command(area, zoom));
    commands.push(DrawCommand::UnknownShapeMarker {
        x: area.x * zoom,
        y: area.y * zoom,
        size: HANDLE_SIZE * 2.0,
    });
}

/// Renders one area.
pub fn render(area: &Area, zoom: f64, selected: bool, options: RenderOptions) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    match area.shape.shape_type {
        ShapeType::Rectangle if is_box_outline(area) => commands.push(box_command(area, zoom)),
        ShapeType::Rectangle => commands.push(DrawCommand::Path {
            points: scaled_points(area, zoom),
            closed: true,
            fill: Some(area.color.clone()),
            stroke: area.border_color.clone(),
        }),
        ShapeType::Circle => {
            let radius = area
                .shape
                .radius
                .unwrap_or(area.width.min(area.height) / 2.0);
            let c = area.center();
            commands.push(DrawCommand::Circle {
                cx: c.x * zoom,
                cy: c.y * zoom,
                radius: radius * zoom,
                fill: area.color.clone(),
                stroke: area.border_color.clone(),
            });
        }
        ShapeType::Polygon if area.shape.points.len() >= 3 => {
            let points = scaled_points(area, zoom);
            let markers: Vec<DrawCommand> = if options.vertex_handles {
                points
                    .iter()
                    .map(|&center| DrawCommand::VertexHandle {
                        center,
                        size: HANDLE_SIZE,
                    })
                    .collect()
            } else {
                Vec::new()
            };
            commands.push(DrawCommand::Path {
                points,
                closed: true,
                fill: Some(area.color.clone()),
                stroke: area.border_color.clone(),
            });
            commands.extend(markers);
        }
        _ => fallback(area, zoom, &mut commands),
    }

    if selected {
        commands.push(selection_outline(area.x, area.y, area.width, area.height, zoom));
    }
    commands
}

fn selection_outline(x: f64, y: f64, width: f64, height: f64, zoom: f64) -> DrawCommand {
    DrawCommand::SelectionOutline {
        x: x * zoom,
        y: y * zoom,
        width: width * zoom,
        height: height * zoom,
    }
}

/// Renders any placed entity. Storages and facilities are plain boxes.
pub fn render_entity(
    entity: &PlacedEntity,
    zoom: f64,
    selected: bool,
    options: RenderOptions,
) -> Vec<DrawCommand> {
    let (fill, stroke) = match entity {
        PlacedEntity::Area(area) => return render(area, zoom, selected, options),
        PlacedEntity::Storage(_) => (STORAGE_FILL, STORAGE_STROKE),
        PlacedEntity::Facility(_) => (FACILITY_FILL, FACILITY_STROKE),
    };
    let f = entity.footprint();
    let mut commands = vec![DrawCommand::Box {
        x: f.x * zoom,
        y: f.y * zoom,
        width: f.width * zoom,
        height: f.height * zoom,
        corner_radius: 0.0,
        fill: fill.to_string(),
        stroke: stroke.to_string(),
    }];
    if selected {
        commands.push(selection_outline(f.x, f.y, f.width, f.height, zoom));
    }
    commands
}

/// Renders an in-progress draft (absolute document points) as an open path with vertex markers.
pub fn render_draft(points: &[Point], zoom: f64, stroke: &str) -> Vec<DrawCommand> {
    let scaled: Vec<Point> = points
        .iter()
        .map(|p| Point::new(p.x * zoom, p.y * zoom))
        .collect();
    let mut commands = Vec::with_capacity(scaled.len() + 1);
    if scaled.len() >= 2 {
        commands.push(DrawCommand::Path {
            points: scaled.clone(),
            closed: false,
            fill: None,
            stroke: stroke.to_string(),
        });
    }
    commands.extend(scaled.into_iter().map(|center| DrawCommand::VertexHandle {
        center,
        size: HANDLE_SIZE,
    }));
    commands
}

/// Resize handle markers for a selected rectangle area.
pub fn render_resize_handles(area: &Area, zoom: f64) -> Vec<DrawCommand> {
    crate::resize::handles_for(area, zoom)
        .map(|handles| {
            handles
                .iter()
                .map(|m| DrawCommand::ResizeHandle {
                    handle: m.handle.code().to_string(),
                    center: m.center,
                    size: HANDLE_SIZE,
                })
                .collect()
        })
        .unwrap_or_default()
}
