//! Predefined polygon outlines.
//!
//! A template produces an absolute point list filling a requested box. The
//! list is committed like a finished drawing, so the resulting area obeys the
//! same box and minimum-size rules as a hand-drawn polygon.

use serde::{Deserialize, Serialize};

use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeTemplate {
    L,
    T,
    U,
    Cross,
}

impl ShapeTemplate {
    pub const ALL: [ShapeTemplate; 4] = [
        ShapeTemplate::L,
        ShapeTemplate::T,
        ShapeTemplate::U,
        ShapeTemplate::Cross,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeTemplate::L => "L",
            ShapeTemplate::T => "T",
            ShapeTemplate::U => "U",
            ShapeTemplate::Cross => "Cross",
        }
    }

    /// Outline in unit coordinates (`[0,1]x[0,1]`), clockwise from the top-left.
    fn unit_points(&self) -> &'static [(f64, f64)] {
        const A: f64 = 1.0 / 3.0;
        const B: f64 = 2.0 / 3.0;
        match self {
            ShapeTemplate::L => &[
                (0.0, 0.0),
                (A, 0.0),
                (A, B),
                (1.0, B),
                (1.0, 1.0),
                (0.0, 1.0),
            ],
            ShapeTemplate::T => &[
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, A),
                (B, A),
                (B, 1.0),
                (A, 1.0),
                (A, A),
                (0.0, A),
            ],
            ShapeTemplate::U => &[
                (0.0, 0.0),
                (A, 0.0),
                (A, B),
                (B, B),
                (B, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
            ],
            ShapeTemplate::Cross => &[
                (A, 0.0),
                (B, 0.0),
                (B, A),
                (1.0, A),
                (1.0, B),
                (B, B),
                (B, 1.0),
                (A, 1.0),
                (A, B),
                (0.0, B),
                (0.0, A),
                (A, A),
            ],
        }
    }

    /// Absolute outline filling the box `(x, y, width, height)`, rounded to whole units.
    pub fn points(&self, x: f64, y: f64, width: f64, height: f64) -> Vec<Point> {
        self.unit_points()
            .iter()
            .map(|&(u, v)| Point::new((x + u * width).round(), (y + v * height).round()))
            .collect()
    }
}

impl std::fmt::Display for ShapeTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ShapeTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeTemplate::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown template '{}' (expected L, T, U or Cross)", s))
    }
}
