use layoutkit_core::EditorError;
use layoutkit_designer::geometry::{rotate, rotate_point, satisfies_bounds_invariant};
use layoutkit_designer::model::{Area, Footprint, Point, Shape};
use layoutkit_designer::polygon_editor::PolygonEditor;
use layoutkit_designer::resize::{resize_from_handle, ResizeHandle};

#[test]
fn test_rotated_rectangle_keeps_footprint() {
    let area = Area::new(1, "Racks", 50.0, 50.0, 200.0, 150.0);
    let rotated = rotate(&area, 90.0);

    assert_eq!(rotated.x, 50.0);
    assert_eq!(rotated.y, 50.0);
    assert_eq!(rotated.width, 200.0);
    assert_eq!(rotated.height, 150.0);

    let center = Point::new(100.0, 75.0);
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 150.0),
        Point::new(0.0, 150.0),
    ];
    for (got, corner) in rotated.shape.points.iter().zip(corners) {
        let expected = rotate_point(corner, center, 90.0);
        assert_eq!(*got, Point::new(expected.x.round(), expected.y.round()));
    }
}

#[test]
fn test_rotated_triangle_keeps_center() {
    let area = Area::with_shape(
        2,
        "Dock",
        10.0,
        10.0,
        100.0,
        100.0,
        Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ]),
    );
    let rotated = rotate(&area, 180.0);

    assert!((rotated.width - 100.0).abs() < 1e-6);
    assert!((rotated.height - 100.0).abs() < 1e-6);
    let center = rotated.center();
    assert!((center.x - 60.0).abs() <= 1.0);
    assert!((center.y - 60.0).abs() <= 1.0);
    assert!(satisfies_bounds_invariant(&rotated, 1.0));
}

#[test]
fn test_south_east_handle_drag() {
    let start = Footprint::new(0.0, 0.0, 100.0, 100.0);
    let result = resize_from_handle(start, ResizeHandle::SouthEast, Point::new(30.0, -10.0));
    assert_eq!(result.width, 130.0);
    assert_eq!(result.height, 90.0);
    assert_eq!(result.x, 0.0);
    assert_eq!(result.y, 0.0);
}

#[test]
fn test_deleting_below_three_points_is_refused() {
    let area = Area::with_shape(
        3,
        "Triangle",
        0.0,
        0.0,
        100.0,
        100.0,
        Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ]),
    );
    let mut editor = PolygonEditor::new();
    editor.start_editing(&area).unwrap();
    let draft = editor.draft().to_vec();

    let result = editor.delete_point(2);
    assert_eq!(
        result,
        Err(EditorError::InsufficientPoints {
            required: 3,
            actual: 2
        })
    );
    assert_eq!(editor.draft(), draft.as_slice());
}
