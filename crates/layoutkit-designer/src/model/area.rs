use serde::{Deserialize, Serialize};

use super::{Footprint, Point, Shape, ShapeType};

fn default_color() -> String {
    "#e3f2fd".to_string()
}

fn default_border_color() -> String {
    "#1976d2".to_string()
}

fn default_active() -> bool {
    true
}

/// A floor area: an outline placed at an absolute document box.
///
/// `(x, y, width, height)` is the layout footprint used for placement,
/// hit-testing and resize anchoring. `shape.points` are relative to `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub shape: Shape,
}

impl Area {
    /// Creates a rectangle area.
    pub fn new(id: u64, name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_shape(id, name, x, y, width, height, Shape::rectangle(width, height))
    }

    pub fn with_shape(
        id: u64,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        shape: Shape,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            code: String::new(),
            x,
            y,
            width,
            height,
            color: default_color(),
            border_color: default_border_color(),
            description: String::new(),
            is_active: true,
            shape,
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type
    }

    pub fn is_polygon(&self) -> bool {
        self.shape.shape_type == ShapeType::Polygon
    }

    /// Only plain rectangles get resize handles.
    pub fn is_resizable(&self) -> bool {
        self.shape.shape_type == ShapeType::Rectangle
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.footprint().center()
    }

    /// Whether the box, the outline and the radii are all finite numbers.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite())
            && self
                .shape
                .points
                .iter()
                .all(|p| p.x.is_finite() && p.y.is_finite())
            && self.shape.radius.is_none_or(f64::is_finite)
            && self.shape.border_radius.is_none_or(f64::is_finite)
    }

    /// The shape to transform: the stored outline, or a full rectangle of the
    /// current box when the outline is missing.
    pub fn effective_shape(&self) -> Shape {
        if self.shape.points.is_empty() {
            tracing::warn!(
                "area {} has an empty {} outline, recovering a rectangle outline",
                self.id,
                self.shape.shape_type
            );
            Shape {
                points: Shape::rectangle(self.width, self.height).points,
                ..self.shape.clone()
            }
        } else {
            self.shape.clone()
        }
    }

    /// Outline vertices in document coordinates.
    pub fn absolute_points(&self) -> Vec<Point> {
        self.effective_shape()
            .points
            .iter()
            .map(|p| p.offset(self.x, self.y))
            .collect()
    }

    /// Applies a new box from a resize drag.
    ///
    /// The outline is stretched with the box so a rotated rectangle keeps its
    /// orientation.
    pub fn set_footprint(&mut self, footprint: Footprint) {
        let outline = self.effective_shape();
        let sx = if self.width.abs() > f64::EPSILON {
            footprint.width / self.width
        } else {
            1.0
        };
        let sy = if self.height.abs() > f64::EPSILON {
            footprint.height / self.height
        } else {
            1.0
        };
        self.shape.points = outline
            .points
            .iter()
            .map(|p| Point::new((p.x * sx).round(), (p.y * sy).round()))
            .collect();
        self.x = footprint.x;
        self.y = footprint.y;
        self.width = footprint.width;
        self.height = footprint.height;
    }

    /// Point-in-outline test in document coordinates.
    ///
    /// Polygons use ray casting on their vertices; every other shape uses its box.
    pub fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        if !self.footprint().contains(p, tolerance) {
            return false;
        }
        if !self.is_polygon() || self.shape.points.len() < 3 {
            return true;
        }

        let points = self.absolute_points();
        let mut inside = false;
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let (pi, pj) = (points[i], points[j]);
            if ((pi.y > p.y) != (pj.y > p.y))
                && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside || near_outline(&points, p, tolerance)
    }
}

fn near_outline(points: &[Point], p: &Point, tolerance: f64) -> bool {
    if tolerance <= 0.0 {
        return false;
    }
    points.iter().enumerate().any(|(i, a)| {
        let b = points[(i + 1) % points.len()];
        distance_to_segment(p, a, &b) <= tolerance
    })
}

fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}
