use layoutkit_core::{EditorError, LayoutEvent};
use layoutkit_designer::editor::{EditorOptions, InteractionMode, LayoutEditor};
use layoutkit_designer::geometry::satisfies_bounds_invariant;
use layoutkit_designer::model::{Point, ShapeType};
use layoutkit_designer::renderer::DrawCommand;
use layoutkit_designer::templates::ShapeTemplate;

fn draw_triangle(editor: &mut LayoutEditor) -> u64 {
    editor.start_drawing().unwrap();
    for p in [(100.0, 100.0), (300.0, 100.0), (100.0, 250.0)] {
        editor.pointer_down(Point::new(p.0, p.1)).unwrap();
        editor.pointer_up(Point::new(p.0, p.1)).unwrap();
    }
    editor.finish_drawing().unwrap()
}

#[test]
fn test_draw_polygon_with_clicks() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = draw_triangle(&mut editor);

    let area = editor.store().area(id).unwrap();
    assert_eq!(area.shape_type(), ShapeType::Polygon);
    assert_eq!((area.x, area.y, area.width, area.height), (100.0, 100.0, 200.0, 150.0));
    assert_eq!(area.shape.points[2], Point::new(0.0, 150.0));
    assert_eq!(editor.selection(), Some(id));
    assert_eq!(editor.mode(), InteractionMode::Idle);
}

#[test]
fn test_finish_with_two_points_stays_drawing() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let mut rx = editor.events().subscribe();
    editor.start_drawing().unwrap();
    editor.append_point(Point::new(0.0, 0.0)).unwrap();
    editor.append_point(Point::new(50.0, 0.0)).unwrap();

    assert!(matches!(
        editor.finish_drawing(),
        Err(EditorError::InsufficientPoints { .. })
    ));
    assert_eq!(editor.mode(), InteractionMode::Drawing);
    assert!(editor.store().is_empty());

    let mut refused = false;
    while let Ok(event) = rx.try_recv() {
        if let LayoutEvent::ValidationFailed { message } = event {
            assert_eq!(message, "A polygon needs at least 3 points, got 2");
            refused = true;
        }
    }
    assert!(refused);

    editor.escape();
    assert_eq!(editor.mode(), InteractionMode::Idle);
    assert!(editor.polygon_editor().draft().is_empty());
}

#[test]
fn test_drawing_snaps_clicks_to_grid() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    editor.set_grid_snap(true);
    editor.start_drawing().unwrap();
    editor.pointer_down(Point::new(104.0, 96.0)).unwrap();
    assert_eq!(editor.polygon_editor().draft(), &[Point::new(100.0, 100.0)]);
}

#[test]
fn test_edit_points_by_dragging_vertex() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = draw_triangle(&mut editor);

    editor.double_click(Point::new(150.0, 150.0)).unwrap();
    assert_eq!(editor.mode(), InteractionMode::EditingPoints);

    // Grab the (100, 250) vertex and pull it down
    editor.pointer_down(Point::new(101.0, 249.0)).unwrap();
    assert_eq!(editor.mode(), InteractionMode::DraggingPoint);
    editor.pointer_move(Point::new(100.0, 300.0)).unwrap();
    editor.pointer_up(Point::new(100.0, 350.0)).unwrap();
    assert_eq!(editor.mode(), InteractionMode::EditingPoints);

    let updated = editor.finish_editing_points().unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.height, 250.0);
    assert!(satisfies_bounds_invariant(&updated, 1e-9));
    assert_eq!(editor.history().undo_label(), Some("Edit points"));
}

#[test]
fn test_cancel_point_editing_keeps_area() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = draw_triangle(&mut editor);
    let before = editor.store().area(id).cloned();

    editor.start_editing_points(id).unwrap();
    editor.move_point(0, Point::new(0.0, 0.0)).unwrap();
    editor.cancel_editing_points();

    assert_eq!(editor.store().area(id).cloned(), before);
    assert_eq!(editor.mode(), InteractionMode::Idle);
}

#[test]
fn test_escape_during_vertex_drag_restores_point() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = draw_triangle(&mut editor);
    editor.start_editing_points(id).unwrap();

    editor.pointer_down(Point::new(300.0, 100.0)).unwrap();
    editor.pointer_move(Point::new(400.0, 40.0)).unwrap();
    editor.escape();

    assert_eq!(editor.mode(), InteractionMode::EditingPoints);
    assert_eq!(editor.polygon_editor().draft()[1], Point::new(300.0, 100.0));
}

#[test]
fn test_double_click_vertex_refused_at_three_points() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = draw_triangle(&mut editor);
    editor.start_editing_points(id).unwrap();

    let result = editor.double_click(Point::new(300.0, 100.0));
    assert!(matches!(
        result,
        Err(EditorError::InsufficientPoints { .. })
    ));
    assert_eq!(editor.polygon_editor().draft().len(), 3);
}

#[test]
fn test_rectangles_cannot_enter_point_editing() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = editor.add_rectangle(0.0, 0.0);
    assert_eq!(
        editor.start_editing_points(id),
        Err(EditorError::NotAPolygon { id })
    );
    assert_eq!(editor.mode(), InteractionMode::Idle);
}

#[test]
fn test_editing_renders_draft_instead_of_area() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = draw_triangle(&mut editor);
    editor.start_editing_points(id).unwrap();

    let frame = editor.render_frame();
    let vertices = frame
        .iter()
        .filter(|c| matches!(c, DrawCommand::VertexHandle { .. }))
        .count();
    assert_eq!(vertices, 3);
    assert!(!frame
        .iter()
        .any(|c| matches!(c, DrawCommand::Path { closed: true, .. })));
}

#[test]
fn test_templates_commit_like_drawings() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    for template in ShapeTemplate::ALL {
        let id = editor
            .add_from_template(template, 10.0, 20.0, 300.0, 240.0)
            .unwrap();
        let area = editor.store().area(id).unwrap();
        assert_eq!(area.shape_type(), ShapeType::Polygon);
        assert_eq!((area.x, area.y, area.width, area.height), (10.0, 20.0, 300.0, 240.0));
        assert!(satisfies_bounds_invariant(area, 1e-9));
    }
    assert_eq!(editor.store().len(), 4);
}
