//! Draft polygon construction and point editing.
//!
//! The editor holds an ordered list of absolute document points (the draft)
//! while it is drawing a new polygon or reshaping an existing one. Nothing is
//! written to an area until the draft is finished; cancelling discards it.

use layoutkit_core::constants::MIN_POLYGON_POINTS;
use layoutkit_core::EditorError;

use crate::geometry::{polygon_from_absolute, PolygonOutline};
use crate::model::{Area, Point};

/// State of the polygon editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonEditorState {
    #[default]
    Idle,
    /// Collecting points for a new area.
    Drawing,
    /// Reshaping the polygon area with this id.
    EditingPoints { area_id: u64 },
}

impl PolygonEditorState {
    pub fn name(&self) -> &'static str {
        match self {
            PolygonEditorState::Idle => "idle",
            PolygonEditorState::Drawing => "drawing",
            PolygonEditorState::EditingPoints { .. } => "editing points",
        }
    }
}

impl std::fmt::Display for PolygonEditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolygonEditor {
    state: PolygonEditorState,
    draft: Vec<Point>,
}

impl PolygonEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PolygonEditorState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PolygonEditorState::Idle
    }

    /// Draft points in document coordinates.
    pub fn draft(&self) -> &[Point] {
        &self.draft
    }

    fn require_idle(&self) -> Result<(), EditorError> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(EditorError::InteractionActive {
                active: self.state.to_string(),
            })
        }
    }

    fn wrong_mode(&self, expected: &str) -> EditorError {
        EditorError::InvalidMode {
            expected: expected.to_string(),
            actual: self.state.to_string(),
        }
    }

    fn editing_id(&self) -> Result<u64, EditorError> {
        match self.state {
            PolygonEditorState::EditingPoints { area_id } => Ok(area_id),
            _ => Err(self.wrong_mode("editing points")),
        }
    }

    pub fn start_drawing(&mut self) -> Result<(), EditorError> {
        self.require_idle()?;
        self.draft.clear();
        self.state = PolygonEditorState::Drawing;
        tracing::debug!("polygon drawing started");
        Ok(())
    }

    pub fn append_point(&mut self, point: Point) -> Result<(), EditorError> {
        if self.state != PolygonEditorState::Drawing {
            return Err(self.wrong_mode("drawing"));
        }
        self.draft.push(point);
        Ok(())
    }

    /// Converts the draft into a polygon outline and returns to idle.
    ///
    /// With fewer than three points the editor stays in drawing mode and the
    /// draft is kept.
    pub fn finish_drawing(&mut self) -> Result<PolygonOutline, EditorError> {
        if self.state != PolygonEditorState::Drawing {
            return Err(self.wrong_mode("drawing"));
        }
        let outline = polygon_from_absolute(&self.draft)?;
        self.reset();
        tracing::debug!("polygon drawing finished: {:?}", outline.footprint);
        Ok(outline)
    }

    pub fn cancel_drawing(&mut self) {
        if self.state == PolygonEditorState::Drawing {
            tracing::debug!("polygon drawing cancelled ({} points)", self.draft.len());
            self.reset();
        }
    }

    /// Loads a polygon area's outline as the draft, in document coordinates.
    pub fn start_editing(&mut self, area: &Area) -> Result<(), EditorError> {
        self.require_idle()?;
        if !area.is_polygon() {
            return Err(EditorError::NotAPolygon { id: area.id });
        }
        self.draft = area.absolute_points();
        self.state = PolygonEditorState::EditingPoints { area_id: area.id };
        tracing::debug!("editing {} points of area {}", self.draft.len(), area.id);
        Ok(())
    }

    /// Moves one draft point; the latest move wins.
    pub fn move_point(&mut self, index: usize, point: Point) -> Result<(), EditorError> {
        self.editing_id()?;
        let len = self.draft.len();
        let slot = self
            .draft
            .get_mut(index)
            .ok_or(EditorError::PointOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Removes one draft point. Refused when fewer than three points would remain.
    pub fn delete_point(&mut self, index: usize) -> Result<Point, EditorError> {
        self.editing_id()?;
        let len = self.draft.len();
        if index >= len {
            return Err(EditorError::PointOutOfRange { index, len });
        }
        if len <= MIN_POLYGON_POINTS {
            return Err(EditorError::InsufficientPoints {
                required: MIN_POLYGON_POINTS,
                actual: len - 1,
            });
        }
        Ok(self.draft.remove(index))
    }

    /// Returns the edited area id and its new outline.
    pub fn finish_editing(&mut self) -> Result<(u64, PolygonOutline), EditorError> {
        let area_id = self.editing_id()?;
        let outline = polygon_from_absolute(&self.draft)?;
        self.reset();
        tracing::debug!("point editing of area {} finished", area_id);
        Ok((area_id, outline))
    }

    pub fn cancel_editing(&mut self) {
        if let PolygonEditorState::EditingPoints { area_id } = self.state {
            tracing::debug!("point editing of area {} cancelled", area_id);
            self.reset();
        }
    }

    /// Leaves whichever mode is active, discarding the draft.
    pub fn cancel(&mut self) {
        self.cancel_drawing();
        self.cancel_editing();
    }

    /// Index of the draft point within `tolerance` of `position`, nearest first.
    pub fn point_at(&self, position: &Point, tolerance: f64) -> Option<usize> {
        self.draft
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance_to(position)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.state = PolygonEditorState::Idle;
    }
}

/// Writes a finished outline back onto an existing area, keeping its
/// identity and styling.
pub fn apply_outline(area: &Area, outline: PolygonOutline) -> Area {
    let mut result = area.clone();
    result.x = outline.footprint.x;
    result.y = outline.footprint.y;
    result.width = outline.footprint.width;
    result.height = outline.footprint.height;
    result.shape = outline.shape;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Shape, ShapeType};

    fn triangle_area() -> Area {
        Area::with_shape(
            4,
            "Dock",
            10.0,
            20.0,
            100.0,
            80.0,
            Shape::polygon(vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(50.0, 80.0),
            ]),
        )
    }

    #[test]
    fn test_finish_drawing_requires_three_points() {
        let mut editor = PolygonEditor::new();
        editor.start_drawing().unwrap();
        editor.append_point(Point::new(0.0, 0.0)).unwrap();
        editor.append_point(Point::new(10.0, 0.0)).unwrap();

        let err = editor.finish_drawing().unwrap_err();
        assert_eq!(
            err,
            EditorError::InsufficientPoints {
                required: 3,
                actual: 2
            }
        );
        assert_eq!(editor.state(), PolygonEditorState::Drawing);
        assert_eq!(editor.draft().len(), 2);

        editor.append_point(Point::new(0.0, 10.0)).unwrap();
        let outline = editor.finish_drawing().unwrap();
        assert_eq!(outline.shape.shape_type, ShapeType::Polygon);
        assert_eq!(outline.shape.points.len(), 3);
        assert_eq!(outline.footprint.width, 50.0);
        assert!(editor.is_idle());
        assert!(editor.draft().is_empty());
    }

    #[test]
    fn test_cannot_start_two_modes() {
        let mut editor = PolygonEditor::new();
        editor.start_drawing().unwrap();
        assert!(matches!(
            editor.start_editing(&triangle_area()),
            Err(EditorError::InteractionActive { .. })
        ));
        editor.cancel_drawing();
        assert!(editor.is_idle());
        editor.start_editing(&triangle_area()).unwrap();
    }

    #[test]
    fn test_start_editing_rejects_rectangles() {
        let mut editor = PolygonEditor::new();
        let area = Area::new(9, "Rect", 0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            editor.start_editing(&area),
            Err(EditorError::NotAPolygon { id: 9 })
        );
        assert!(editor.is_idle());
    }

    #[test]
    fn test_editing_loads_absolute_points() {
        let mut editor = PolygonEditor::new();
        editor.start_editing(&triangle_area()).unwrap();
        assert_eq!(editor.draft()[2], Point::new(60.0, 100.0));
        assert_eq!(editor.point_at(&Point::new(108.0, 21.0), 6.0), Some(1));
        assert_eq!(editor.point_at(&Point::new(300.0, 300.0), 6.0), None);
    }

    #[test]
    fn test_delete_point_refused_at_minimum() {
        let mut editor = PolygonEditor::new();
        editor.start_editing(&triangle_area()).unwrap();
        let before = editor.draft().to_vec();

        assert!(matches!(
            editor.delete_point(2),
            Err(EditorError::InsufficientPoints { .. })
        ));
        assert_eq!(editor.draft(), before.as_slice());
    }

    #[test]
    fn test_finish_editing_refits_area() {
        let area = triangle_area();
        let mut editor = PolygonEditor::new();
        editor.start_editing(&area).unwrap();
        editor.move_point(2, Point::new(60.0, 220.0)).unwrap();
        assert_eq!(
            editor.move_point(7, Point::new(0.0, 0.0)),
            Err(EditorError::PointOutOfRange { index: 7, len: 3 })
        );

        let (id, outline) = editor.finish_editing().unwrap();
        assert_eq!(id, 4);
        let updated = apply_outline(&area, outline);
        assert_eq!(updated.name, "Dock");
        assert_eq!((updated.x, updated.y), (10.0, 20.0));
        assert_eq!(updated.height, 200.0);
        assert_eq!(updated.shape.points[2], Point::new(50.0, 200.0));
    }

    #[test]
    fn test_cancel_editing_discards_draft() {
        let mut editor = PolygonEditor::new();
        editor.start_editing(&triangle_area()).unwrap();
        editor.move_point(0, Point::new(-50.0, -50.0)).unwrap();
        editor.cancel();
        assert!(editor.is_idle());
        assert!(editor.draft().is_empty());
    }
}
