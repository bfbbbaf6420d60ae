use layoutkit_designer::editor::{EditorOptions, LayoutEditor};
use layoutkit_designer::model::{Area, Point, Shape, ShapeType};
use layoutkit_designer::raster::{rasterize, save_png, RasterStyle};
use layoutkit_designer::renderer::{render, DrawCommand, RenderOptions};

#[test]
fn test_frame_rasterizes_area_colors() {
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let mut area = Area::new(0, "Red zone", 10.0, 10.0, 60.0, 60.0);
    area.color = "#ff0000".to_string();
    editor.add_area(area);

    let pixmap = rasterize(&editor.render_frame(), 100, 100, &RasterStyle::default()).unwrap();
    let inside = pixmap.pixel(40, 40).unwrap();
    assert_eq!((inside.red(), inside.green(), inside.blue()), (255, 0, 0));
}

#[test]
fn test_unknown_shape_still_renders() {
    let mut area = Area::new(1, "Odd", 0.0, 0.0, 80.0, 80.0);
    area.shape = Shape {
        shape_type: ShapeType::Custom,
        points: vec![Point::new(0.0, 0.0)],
        radius: None,
        border_radius: None,
    };
    let commands = render(&area, 1.0, true, RenderOptions::default());
    assert!(commands
        .iter()
        .any(|c| matches!(c, DrawCommand::UnknownShapeMarker { .. })));
    assert!(rasterize(&commands, 100, 100, &RasterStyle::default()).is_some());
}

#[test]
fn test_png_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.png");
    let mut editor = LayoutEditor::new(EditorOptions::default());
    editor.add_rectangle(5.0, 5.0);

    save_png(&editor.render_frame(), 320, 240, &RasterStyle::default(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
