//! Geometry engine for area outlines.
//!
//! Stateless transforms over [`Area`] values. Each function reads its input
//! and returns a new area; the input is never modified and the returned
//! outline never aliases the input's point list.
//!
//! For every shape except rectangles, a transform re-fits the area box to the
//! transformed outline: the outline is normalized into `[0,width]x[0,height]`,
//! both sides are at least [`MIN_AREA_SIZE`], and the absolute center of the
//! area is kept in place. Rectangles keep their layout footprint when rotated;
//! only their outline turns.

use layoutkit_core::constants::{
    FLIP_NOTCH_DEPTH, MAX_SCALE_FACTOR, MIN_AREA_SIZE, MIN_POLYGON_POINTS, MIN_SCALE_FACTOR,
};
use layoutkit_core::EditorError;
use nalgebra::{Matrix2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::model::{Area, Bounds, Footprint, Point, Shape, ShapeType};

/// Axis to reflect across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left/right: `x' = width - x`.
    X,
    /// Mirror top/bottom: `y' = height - y`.
    Y,
}

impl std::str::FromStr for FlipAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "horizontal" => Ok(FlipAxis::X),
            "y" | "vertical" => Ok(FlipAxis::Y),
            other => Err(format!("unknown flip axis '{}'", other)),
        }
    }
}

/// A committed polygon: its document box and its normalized outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonOutline {
    pub footprint: Footprint,
    pub shape: Shape,
}

pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let rotation = Rotation2::new(angle_deg.to_radians());
    let c = Vector2::new(center.x, center.y);
    let v = rotation * (Vector2::new(p.x, p.y) - c) + c;
    Point::new(v.x, v.y)
}

fn local_center(area: &Area) -> Point {
    Point::new(area.width / 2.0, area.height / 2.0)
}

/// Rotates an area's outline by `angle_degrees` about its local center.
///
/// A non-finite angle leaves the area unchanged.
pub fn rotate(area: &Area, angle_degrees: f64) -> Area {
    if !angle_degrees.is_finite() {
        tracing::warn!(
            "ignoring non-finite rotation {} for area {}",
            angle_degrees,
            area.id
        );
        return area.clone();
    }
    let shape = area.effective_shape();
    let center = local_center(area);
    let rotated: Vec<Point> = shape
        .points
        .iter()
        .map(|p| rotate_point(*p, center, angle_degrees))
        .collect();

    tracing::debug!(
        "rotate area {} ({}) by {} degrees",
        area.id,
        shape.shape_type,
        angle_degrees
    );

    if shape.shape_type == ShapeType::Rectangle {
        let mut result = area.clone();
        result.shape = Shape {
            points: rotated
                .into_iter()
                .map(|p| Point::new(p.x.round(), p.y.round()))
                .collect(),
            ..shape
        };
        return result;
    }

    refit(area, shape, rotated)
}

/// Scales an area's outline about its local center. Factors are clamped to `[0.1, 5]`.
pub fn scale(area: &Area, scale_x: f64, scale_y: f64) -> Area {
    let sx = clamp_scale(scale_x);
    let sy = clamp_scale(scale_y);
    let shape = area.effective_shape();
    let c = Vector2::new(area.width / 2.0, area.height / 2.0);
    let m = Matrix2::from_diagonal(&Vector2::new(sx, sy));
    let scaled: Vec<Point> = shape
        .points
        .iter()
        .map(|p| {
            let v = m * (Vector2::new(p.x, p.y) - c) + c;
            Point::new(v.x, v.y)
        })
        .collect();

    tracing::debug!("scale area {} by ({}, {})", area.id, sx, sy);

    let shape = Shape {
        radius: shape.radius.map(|r| r * sx.min(sy)),
        ..shape
    };
    refit(area, shape, scaled)
}

fn clamp_scale(factor: f64) -> f64 {
    if factor.is_nan() {
        return 1.0;
    }
    factor.clamp(MIN_SCALE_FACTOR, MAX_SCALE_FACTOR)
}

/// Mirrors an area's outline across its local width or height axis.
///
/// The box is never changed.
///
/// An axis-aligned square rectangle is symmetric under reflection, so one
/// corner is notched inward by [`FLIP_NOTCH_DEPTH`] to make the flip visible.
/// Flipping a notched square again removes the notch, so `flip` stays an
/// involution.
pub fn flip(area: &Area, axis: FlipAxis) -> Area {
    let shape = area.effective_shape();
    let (w, h) = (area.width, area.height);
    // Other shapes mirror within their outline's extent so the outline stays
    // anchored at the box origin; this is `width - x` whenever it fills the box.
    let (span_x, span_y) = match Bounds::from_points(&shape.points) {
        Some(b) if shape.shape_type != ShapeType::Rectangle => {
            (b.min_x + b.max_x, b.min_y + b.max_y)
        }
        _ => (w, h),
    };
    let mut points: Vec<Point> = shape
        .points
        .iter()
        .map(|p| match axis {
            FlipAxis::X => Point::new(span_x - p.x, p.y),
            FlipAxis::Y => Point::new(p.x, span_y - p.y),
        })
        .collect();

    if shape.shape_type == ShapeType::Rectangle && (w - h).abs() < f64::EPSILON {
        toggle_flip_notch(&mut points, w, h);
    }

    tracing::debug!("flip area {} across {:?}", area.id, axis);

    let mut result = area.clone();
    result.shape = Shape { points, ..shape };
    result
}

const CORNER_TOLERANCE: f64 = 0.5;

fn box_corners(w: f64, h: f64) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
}

fn inset_corner(corner: &Point, w: f64, h: f64) -> Point {
    let dx = if corner.x < w / 2.0 {
        FLIP_NOTCH_DEPTH
    } else {
        -FLIP_NOTCH_DEPTH
    };
    let dy = if corner.y < h / 2.0 {
        FLIP_NOTCH_DEPTH
    } else {
        -FLIP_NOTCH_DEPTH
    };
    corner.offset(dx, dy)
}

fn near(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() <= CORNER_TOLERANCE && (a.y - b.y).abs() <= CORNER_TOLERANCE
}

/// Adds the notch to an unnotched axis-aligned square outline, or removes it
/// from a notched one. Any other outline (e.g. one rotated off-axis) is left alone.
fn toggle_flip_notch(points: &mut [Point], w: f64, h: f64) {
    if points.len() != 4 {
        return;
    }
    let corners = box_corners(w, h);
    let on_corner = |p: &Point| corners.iter().any(|c| near(p, c));
    let notched_corner = |p: &Point| {
        corners
            .iter()
            .find(|c| near(p, &inset_corner(c, w, h)))
            .copied()
    };

    let notched: Vec<(usize, Point)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| !on_corner(p))
        .filter_map(|(i, p)| notched_corner(p).map(|c| (i, c)))
        .collect();
    let off_corner = points.iter().filter(|p| !on_corner(p)).count();

    match (off_corner, notched.as_slice()) {
        (0, _) => points[0] = inset_corner(&points[0], w, h),
        (1, [(index, corner)]) => points[*index] = *corner,
        _ => {}
    }
}

/// `ceil` that ignores floating-point noise from the trigonometry, so a
/// 100-unit edge rotated by 180 degrees stays 100 wide.
fn ceil_tolerant(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < 1e-6 {
        nearest
    } else {
        value.ceil()
    }
}

/// Re-fits `area`'s box around `points` (local coordinates of the old box).
fn refit(area: &Area, shape: Shape, points: Vec<Point>) -> Area {
    let Some(bounds) = Bounds::from_points(&points) else {
        return area.clone();
    };

    let width = ceil_tolerant(bounds.width().max(MIN_AREA_SIZE));
    let height = ceil_tolerant(bounds.height().max(MIN_AREA_SIZE));
    let center = area.center();

    let mut result = area.clone();
    result.shape = Shape {
        points: points
            .iter()
            .map(|p| Point::new(p.x - bounds.min_x, p.y - bounds.min_y))
            .collect(),
        ..shape
    };
    result.width = width;
    result.height = height;
    result.x = (center.x - width / 2.0).round().max(0.0);
    result.y = (center.y - height / 2.0).round().max(0.0);

    tracing::debug!(
        "area {} refit to ({}, {}) {}x{}",
        area.id,
        result.x,
        result.y,
        result.width,
        result.height
    );
    result
}

/// Turns an absolute point list (a draft polygon or a template) into a box
/// and a normalized polygon outline.
pub fn polygon_from_absolute(points: &[Point]) -> Result<PolygonOutline, EditorError> {
    if points.len() < MIN_POLYGON_POINTS {
        return Err(EditorError::InsufficientPoints {
            required: MIN_POLYGON_POINTS,
            actual: points.len(),
        });
    }
    let bounds = Bounds::from_points(points).ok_or(EditorError::InsufficientPoints {
        required: MIN_POLYGON_POINTS,
        actual: 0,
    })?;

    let footprint = Footprint::new(
        bounds.min_x,
        bounds.min_y,
        bounds.width().max(MIN_AREA_SIZE),
        bounds.height().max(MIN_AREA_SIZE),
    );
    let normalized = points
        .iter()
        .map(|p| Point::new(p.x - bounds.min_x, p.y - bounds.min_y))
        .collect();

    Ok(PolygonOutline {
        footprint,
        shape: Shape::polygon(normalized),
    })
}

/// Whether a non-rectangle area's box is the minimal box of its outline
/// (within `tolerance`, honoring the minimum size). Rectangles always pass.
pub fn satisfies_bounds_invariant(area: &Area, tolerance: f64) -> bool {
    if area.shape_type() == ShapeType::Rectangle {
        return true;
    }
    let Some(bounds) = Bounds::from_points(&area.shape.points) else {
        return false;
    };
    bounds.min_x.abs() <= tolerance
        && bounds.min_y.abs() <= tolerance
        && (area.width - bounds.width().max(MIN_AREA_SIZE)).abs() <= tolerance
        && (area.height - bounds.height().max(MIN_AREA_SIZE)).abs() <= tolerance
        && area.width >= MIN_AREA_SIZE
        && area.height >= MIN_AREA_SIZE
}

/// Rebuilds the box of a non-rectangle area from its outline without moving
/// the outline in document space.
pub fn fit_box_to_outline(area: &Area) -> Area {
    let shape = area.effective_shape();
    let Some(bounds) = Bounds::from_points(&shape.points) else {
        return area.clone();
    };
    let mut result = area.clone();
    result.x = area.x + bounds.min_x;
    result.y = area.y + bounds.min_y;
    result.width = bounds.width().max(MIN_AREA_SIZE);
    result.height = bounds.height().max(MIN_AREA_SIZE);
    result.shape = Shape {
        points: shape
            .points
            .iter()
            .map(|p| Point::new(p.x - bounds.min_x, p.y - bounds.min_y))
            .collect(),
        ..shape
    };
    result
}
