use layoutkit_designer::catalog::{Catalog, Facility, StorageUnit};
use layoutkit_designer::document::LayoutDocument;
use layoutkit_designer::editor::{EditorOptions, LayoutEditor};
use layoutkit_designer::geometry::satisfies_bounds_invariant;
use layoutkit_designer::model::{Area, EntityKind, Placeable, Point, Shape};
use layoutkit_designer::templates::ShapeTemplate;

#[test]
fn test_editor_session_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");

    let mut catalog = Catalog::new();
    let rack = catalog
        .storages
        .create(StorageUnit::new("S-01", "Pallet rack", 120.0, 40.0))
        .unwrap();
    let door = catalog
        .facilities
        .create(Facility::new("F-01", "Dock door", "door", 60.0, 10.0))
        .unwrap();

    let mut editor = LayoutEditor::new(EditorOptions::default());
    let zone = editor.add_rectangle(0.0, 0.0);
    let storage = editor.place_storage(&catalog, rack.id, 20.0, 20.0).unwrap();
    editor.place_facility(&catalog, door.id, 300.0, 0.0).unwrap();
    editor
        .add_from_template(ShapeTemplate::L, 400.0, 0.0, 200.0, 200.0)
        .unwrap();

    let mut doc = LayoutDocument::new("Site");
    doc.update_from_editor(&editor);
    doc.save_to_file(&path).unwrap();

    let loaded = LayoutDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded.areas.len(), 2);
    assert_eq!(loaded.storages.len(), 1);
    assert_eq!(loaded.facilities.len(), 1);
    assert_eq!(loaded.storages[0].area_id, Some(zone));
    assert_eq!(loaded.storages[0].width, 120.0);

    let reopened = loaded.open(EditorOptions::default());
    let entity = reopened.store().get(storage).unwrap();
    assert_eq!(entity.kind(), EntityKind::Storage);
    assert_eq!(entity.name(), "Pallet rack");
}

#[test]
fn test_unknown_catalog_record_is_an_error() {
    let catalog = Catalog::new();
    let mut editor = LayoutEditor::new(EditorOptions::default());
    let err = editor.place_storage(&catalog, 7, 0.0, 0.0).unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(err.to_string(), "storage 7 not found");
}

#[test]
fn test_loading_repairs_inconsistent_area_boxes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");

    let mut doc = LayoutDocument::new("Broken");
    let mut area = Area::with_shape(
        1,
        "Skewed",
        10.0,
        10.0,
        500.0,
        500.0,
        Shape::polygon(vec![
            Point::new(20.0, 20.0),
            Point::new(120.0, 20.0),
            Point::new(20.0, 120.0),
        ]),
    );
    area.description = "box does not match outline".to_string();
    doc.areas.push(area);
    doc.save_to_file(&path).unwrap();

    let loaded = LayoutDocument::load_from_file(&path).unwrap();
    let store = loaded.to_store();
    let repaired = store.area(1).unwrap();
    assert!(satisfies_bounds_invariant(repaired, 1e-9));
    assert_eq!((repaired.x, repaired.y), (30.0, 30.0));
    assert_eq!(repaired.width, 100.0);
}

#[test]
fn test_missing_shape_fields_load_with_defaults() {
    let json = r##"{
        "metadata": {
            "id": "7f1c1b2a-8d7e-4a53-9b4e-3c1f2a5d6e7f",
            "name": "Minimal",
            "created": "2024-05-01T08:00:00Z",
            "modified": "2024-05-01T08:00:00Z"
        },
        "areas": [
            {"id": 1, "name": "Bare", "x": 0, "y": 0, "width": 80, "height": 60}
        ]
    }"##;
    let doc: LayoutDocument = serde_json::from_str(json).unwrap();
    let area = &doc.areas[0];
    assert_eq!(area.color, "#e3f2fd");
    assert!(area.is_active);
    assert!(area.shape.points.is_empty());
    assert_eq!(area.absolute_points().len(), 4);
    assert_eq!(doc.view.zoom, 1.0);
}

#[test]
fn test_non_finite_rotation_keeps_document_loadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");

    let mut editor = LayoutEditor::new(EditorOptions::default());
    let id = editor
        .add_from_template(ShapeTemplate::T, 40.0, 40.0, 240.0, 180.0)
        .unwrap();
    let before = editor.store().area(id).cloned().unwrap();

    let rotated = editor.rotate_selected(f64::NAN).unwrap().unwrap();
    assert_eq!(rotated, before);
    assert_eq!(editor.history().undo_label(), Some("Add polygon"));

    let mut doc = LayoutDocument::new("Site");
    doc.update_from_editor(&editor);
    doc.save_to_file(&path).unwrap();

    let loaded = LayoutDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded.areas, vec![before]);
}
