use layoutkit_core::{EditorError, LayoutEvent};
use layoutkit_designer::editor::{EditorOptions, InteractionMode, LayoutEditor};
use layoutkit_designer::model::{Area, Footprint, Point, Shape};
use layoutkit_designer::renderer::DrawCommand;

fn editor_with_rect() -> (LayoutEditor, u64) {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = editor.add_area(Area::new(0, "Zone", 100.0, 100.0, 100.0, 100.0));
    (editor, id)
}

#[test]
fn test_drag_moves_entity_and_records_history() {
    let (mut editor, id) = editor_with_rect();

    editor.pointer_down(Point::new(150.0, 150.0)).unwrap();
    assert_eq!(editor.selection(), Some(id));
    assert_eq!(editor.mode(), InteractionMode::Moving);

    editor.pointer_move(Point::new(170.0, 160.0)).unwrap();
    editor.pointer_up(Point::new(180.0, 170.0)).unwrap();

    let area = editor.store().area(id).unwrap();
    assert_eq!((area.x, area.y), (130.0, 120.0));
    assert_eq!(editor.mode(), InteractionMode::Idle);
    assert_eq!(editor.history().undo_label(), Some("Move"));
}

#[test]
fn test_drag_snaps_to_grid() {
    let (mut editor, id) = editor_with_rect();
    editor.set_grid_snap(true);

    editor.pointer_down(Point::new(150.0, 150.0)).unwrap();
    editor.pointer_up(Point::new(163.0, 147.0)).unwrap();

    let area = editor.store().area(id).unwrap();
    assert_eq!((area.x, area.y), (110.0, 100.0));
}

#[test]
fn test_resize_through_handle_at_zoom() {
    let (mut editor, id) = editor_with_rect();
    editor.set_zoom(2.0);
    editor.select(Some(id));

    // South-east handle sits at (200, 200) * zoom
    editor.pointer_down(Point::new(400.0, 400.0)).unwrap();
    assert_eq!(editor.mode(), InteractionMode::Resizing);
    editor.pointer_move(Point::new(460.0, 380.0)).unwrap();
    editor.pointer_up(Point::new(460.0, 380.0)).unwrap();

    let area = editor.store().area(id).unwrap();
    assert_eq!(area.footprint(), Footprint::new(100.0, 100.0, 130.0, 90.0));
    assert_eq!(area.shape.points[2], Point::new(130.0, 90.0));
}

#[test]
fn test_escape_restores_pre_drag_state() {
    let (mut editor, id) = editor_with_rect();
    let before = editor.store().area(id).cloned().unwrap();

    editor.pointer_down(Point::new(150.0, 150.0)).unwrap();
    editor.pointer_move(Point::new(400.0, 400.0)).unwrap();
    assert_ne!(editor.store().area(id), Some(&before));

    editor.escape();
    assert_eq!(editor.store().area(id), Some(&before));
    assert_eq!(editor.mode(), InteractionMode::Idle);
    assert_eq!(editor.history().undo_label(), Some("Add area"));
}

#[test]
fn test_pointer_leave_commits_and_releases() {
    let (mut editor, id) = editor_with_rect();

    editor.pointer_down(Point::new(150.0, 150.0)).unwrap();
    editor.pointer_move(Point::new(160.0, 150.0)).unwrap();
    editor.pointer_leave().unwrap();

    assert_eq!(editor.mode(), InteractionMode::Idle);
    assert_eq!(editor.store().area(id).map(|a| a.x), Some(110.0));
    // Further moves do nothing once the drag is released
    editor.pointer_move(Point::new(500.0, 500.0)).unwrap();
    assert_eq!(editor.store().area(id).map(|a| a.x), Some(110.0));
}

#[test]
fn test_second_interaction_is_refused() {
    let (mut editor, _) = editor_with_rect();
    editor.pointer_down(Point::new(150.0, 150.0)).unwrap();

    assert!(matches!(
        editor.start_drawing(),
        Err(EditorError::InteractionActive { .. })
    ));
    assert!(matches!(
        editor.pointer_down(Point::new(10.0, 10.0)),
        Err(EditorError::InteractionActive { .. })
    ));
    editor.pointer_up(Point::new(150.0, 150.0)).unwrap();
    editor.start_drawing().unwrap();
}

#[test]
fn test_no_handles_on_polygons() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = editor.add_area(Area::with_shape(
        0,
        "Tri",
        0.0,
        0.0,
        100.0,
        100.0,
        Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ]),
    ));
    editor.select(Some(id));
    let frame = editor.render_frame();
    assert!(!frame
        .iter()
        .any(|c| matches!(c, DrawCommand::ResizeHandle { .. })));

    // The corner where a handle would be starts a move, not a resize
    editor.pointer_down(Point::new(2.0, 2.0)).unwrap();
    assert_eq!(editor.mode(), InteractionMode::Moving);
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let (mut editor, id) = editor_with_rect();
    editor.select(Some(id));
    editor.pointer_down(Point::new(600.0, 600.0)).unwrap();
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.mode(), InteractionMode::Idle);
}

#[test]
fn test_wheel_zoom_with_modifier() {
    let (mut editor, _) = editor_with_rect();
    assert!(!editor.wheel(-1.0, false));
    for _ in 0..40 {
        editor.wheel(-1.0, true);
    }
    assert_eq!(editor.zoom(), 3.0);
}

#[test]
fn test_events_are_published() {
    let (mut editor, id) = editor_with_rect();
    let mut rx = editor.events().subscribe();

    editor.select(Some(id));
    editor.rotate_selected(90.0).unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        LayoutEvent::SelectionChanged { id: Some(id) }
    );
    assert_eq!(rx.try_recv().unwrap(), LayoutEvent::EntityUpdated { id });
}
