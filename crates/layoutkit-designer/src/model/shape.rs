use serde::{Deserialize, Serialize};

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Circle,
    Polygon,
    Ellipse,
    Custom,
    /// Any type string this engine does not know about.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Circle => "circle",
            ShapeType::Polygon => "polygon",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Custom => "custom",
            ShapeType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Outline of an area, in the area's local coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(rename = "type", default)]
    pub shape_type: ShapeType,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

impl Shape {
    /// Full rectangle outline `(0,0),(w,0),(w,h),(0,h)`.
    ///
    /// Also the recovery value for any area whose outline is missing.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(width, 0.0),
                Point::new(width, height),
                Point::new(0.0, height),
            ],
            radius: None,
            border_radius: None,
        }
    }

    pub fn circle(width: f64, height: f64) -> Self {
        Self {
            shape_type: ShapeType::Circle,
            radius: Some(width.min(height) / 2.0),
            ..Self::rectangle(width, height)
        }
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self {
            shape_type: ShapeType::Polygon,
            points,
            radius: None,
            border_radius: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
