//! Raster preview of draw commands using tiny-skia.
//!
//! Used for thumbnails and the command-line `render` action. Commands are
//! painted in order; later commands draw over earlier ones.

use std::path::Path;

use anyhow::{Context, Result};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::model::Point;
use crate::renderer::DrawCommand;

/// Colors used for everything that does not carry its own.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterStyle {
    pub background: String,
    pub selection_color: String,
    pub handle_color: String,
    pub marker_color: String,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            background: "#fafafa".to_string(),
            selection_color: "#ff9800".to_string(),
            handle_color: "#1976d2".to_string(),
            marker_color: "#d32f2f".to_string(),
        }
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            let (r, g, b) = (it.next()??, it.next()??, it.next()??);
            Some(Color::from_rgba8(r, g, b, 255))
        }
        6 | 8 => {
            let r = channel(hex.get(0..2)?)?;
            let g = channel(hex.get(2..4)?)?;
            let b = channel(hex.get(4..6)?)?;
            let a = if hex.len() == 8 {
                channel(hex.get(6..8)?)?
            } else {
                255
            };
            Some(Color::from_rgba8(r, g, b, a))
        }
        _ => None,
    }
}

fn paint_for(color: &str, fallback: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(parse_hex_color(color).unwrap_or(fallback));
    paint.anti_alias = true;
    paint
}

fn polyline(points: &[Point], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    let r = r.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

fn centered_square(center: &Point, size: f64) -> Option<tiny_skia::Path> {
    let half = size / 2.0;
    Rect::from_xywh(
        (center.x - half) as f32,
        (center.y - half) as f32,
        size as f32,
        size as f32,
    )
    .map(PathBuilder::from_rect)
}

fn fill_and_stroke(
    pixmap: &mut Pixmap,
    path: &tiny_skia::Path,
    fill: Option<&str>,
    stroke: &str,
    stroke_width: f32,
) {
    if let Some(fill) = fill {
        let paint = paint_for(fill, Color::WHITE);
        pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    let paint = paint_for(stroke, Color::BLACK);
    let stroke = Stroke {
        width: stroke_width,
        ..Default::default()
    };
    pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
}

/// Paints `commands` into a new pixmap. Returns `None` for a zero-sized target.
pub fn rasterize(commands: &[DrawCommand], width: u32, height: u32, style: &RasterStyle) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(parse_hex_color(&style.background).unwrap_or(Color::WHITE));

    for command in commands {
        match command {
            DrawCommand::Box {
                x,
                y,
                width,
                height,
                corner_radius,
                fill,
                stroke,
            } => {
                if let Some(path) = rounded_rect(
                    *x as f32,
                    *y as f32,
                    *width as f32,
                    *height as f32,
                    *corner_radius as f32,
                ) {
                    fill_and_stroke(&mut pixmap, &path, Some(fill), stroke, 1.5);
                }
            }
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                fill,
                stroke,
            } => {
                if let Some(path) = PathBuilder::from_circle(*cx as f32, *cy as f32, *radius as f32) {
                    fill_and_stroke(&mut pixmap, &path, Some(fill), stroke, 1.5);
                }
            }
            DrawCommand::Path {
                points,
                closed,
                fill,
                stroke,
            } => {
                if let Some(path) = polyline(points, *closed) {
                    fill_and_stroke(&mut pixmap, &path, fill.as_deref(), stroke, 1.5);
                }
            }
            DrawCommand::VertexHandle { center, size }
            | DrawCommand::ResizeHandle { center, size, .. } => {
                if let Some(path) = centered_square(center, *size) {
                    fill_and_stroke(&mut pixmap, &path, Some("#ffffff"), &style.handle_color, 1.0);
                }
            }
            DrawCommand::UnknownShapeMarker { x, y, size } => {
                let (x, y, s) = (*x, *y, *size);
                let cross = [Point::new(x, y), Point::new(x + s, y + s)];
                let other = [Point::new(x + s, y), Point::new(x, y + s)];
                for line in [cross, other] {
                    if let Some(path) = polyline(&line, false) {
                        fill_and_stroke(&mut pixmap, &path, None, &style.marker_color, 2.0);
                    }
                }
            }
            DrawCommand::SelectionOutline {
                x,
                y,
                width,
                height,
            } => {
                if let Some(rect) = Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32) {
                    let path = PathBuilder::from_rect(rect);
                    fill_and_stroke(&mut pixmap, &path, None, &style.selection_color, 2.0);
                }
            }
        }
    }
    Some(pixmap)
}

/// Rasterizes and writes a PNG file.
pub fn save_png(
    commands: &[DrawCommand],
    width: u32,
    height: u32,
    style: &RasterStyle,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let pixmap = rasterize(commands, width, height, style)
        .with_context(|| format!("Cannot create a {}x{} image", width, height))?;
    pixmap
        .save_png(path)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    tracing::info!("Rendered {} commands to {}", commands.len(), path.display());
    Ok(())
}
