use layoutkit_designer::geometry::{
    flip, polygon_from_absolute, rotate, satisfies_bounds_invariant, scale, FlipAxis,
};
use layoutkit_designer::model::{Area, Bounds, Footprint, Point, Shape, ShapeType};
use layoutkit_designer::resize::{resize_from_handle, ResizeHandle};
use proptest::prelude::*;

fn polygon_area(points: Vec<(i32, i32)>, x: i32, y: i32) -> Area {
    let absolute: Vec<Point> = points
        .into_iter()
        .map(|(px, py)| Point::new(f64::from(px), f64::from(py)))
        .collect();
    let outline = polygon_from_absolute(&absolute).unwrap();
    let f = outline.footprint;
    Area::with_shape(
        1,
        "Generated",
        f64::from(x),
        f64::from(y),
        f.width,
        f.height,
        outline.shape,
    )
}

fn polygon_strategy() -> impl Strategy<Value = Area> {
    (
        prop::collection::vec((0i32..400, 0i32..400), 3..8),
        0i32..500,
        0i32..500,
    )
        .prop_map(|(points, x, y)| polygon_area(points, x, y))
}

/// Polygons, circles and custom outlines.
fn shaped_area_strategy() -> impl Strategy<Value = Area> {
    prop_oneof![
        polygon_strategy(),
        (50i32..400, 50i32..400, 0i32..500, 0i32..500).prop_map(|(w, h, x, y)| {
            let (w, h) = (f64::from(w), f64::from(h));
            Area::with_shape(1, "Round", f64::from(x), f64::from(y), w, h, Shape::circle(w, h))
        }),
        polygon_strategy().prop_map(|mut area| {
            area.shape.shape_type = ShapeType::Custom;
            area
        }),
    ]
}

/// Box starts at the outline's minimum and spans it, with the 50 unit floor.
fn box_fits_outline(area: &Area) -> bool {
    let Some(b) = Bounds::from_points(&area.shape.points) else {
        return false;
    };
    b.min_x.abs() <= 1.0
        && b.min_y.abs() <= 1.0
        && (area.width - b.width().max(50.0)).abs() <= 1.0
        && (area.height - b.height().max(50.0)).abs() <= 1.0
}

fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

fn sorted(points: &[Point]) -> Vec<(i64, i64)> {
    let mut keys: Vec<(i64, i64)> = points
        .iter()
        .map(|p| ((p.x * 1000.0).round() as i64, (p.y * 1000.0).round() as i64))
        .collect();
    keys.sort_unstable();
    keys
}

proptest! {
    #[test]
    fn transforms_keep_box_for_every_shape(
        area in shaped_area_strategy(),
        angle in -360.0f64..360.0,
        sx in -1.0f64..10.0,
        sy in -1.0f64..10.0
    ) {
        for result in [rotate(&area, angle), scale(&area, sx, sy), scale(&rotate(&area, angle), sx, sy)] {
            prop_assert_eq!(result.shape.shape_type, area.shape.shape_type);
            prop_assert!(satisfies_bounds_invariant(&result, 1.0));
            prop_assert!(box_fits_outline(&result));
            prop_assert!(result.width >= 50.0 && result.height >= 50.0);
        }
    }

    #[test]
    fn rotated_rectangle_scales_into_fitted_box(
        w in 20i32..400,
        h in 20i32..400,
        angle in -360.0f64..360.0,
        sx in -1.0f64..10.0,
        sy in -1.0f64..10.0
    ) {
        let rect = Area::new(1, "R", 100.0, 100.0, f64::from(w), f64::from(h));
        let rotated = rotate(&rect, angle);
        prop_assert_eq!(rotated.footprint(), rect.footprint());

        let scaled = scale(&rotated, sx, sy);
        prop_assert_eq!(scaled.shape.shape_type, ShapeType::Rectangle);
        prop_assert!(box_fits_outline(&scaled));
        prop_assert!(scaled.width >= 50.0 && scaled.height >= 50.0);
    }

    #[test]
    fn rotate_keeps_box_on_outline(area in polygon_strategy(), angle in -360.0f64..360.0) {
        let rotated = rotate(&area, angle);
        prop_assert!(satisfies_bounds_invariant(&rotated, 1.0));
        prop_assert!(rotated.width >= 50.0 && rotated.height >= 50.0);
        prop_assert!(rotated.x >= 0.0 && rotated.y >= 0.0);
    }

    #[test]
    fn scale_keeps_box_on_outline(
        area in polygon_strategy(),
        sx in -1.0f64..10.0,
        sy in -1.0f64..10.0
    ) {
        let scaled = scale(&area, sx, sy);
        prop_assert!(satisfies_bounds_invariant(&scaled, 1.0));
        prop_assert!(scaled.width >= 50.0 && scaled.height >= 50.0);
    }

    #[test]
    fn flip_is_an_involution(area in polygon_strategy(), vertical in any::<bool>()) {
        let axis = if vertical { FlipAxis::Y } else { FlipAxis::X };
        let once = flip(&area, axis);
        prop_assert!(satisfies_bounds_invariant(&once, 1.0));
        let twice = flip(&once, axis);
        prop_assert_eq!(sorted(&twice.shape.points), sorted(&area.shape.points));
        prop_assert_eq!(twice.footprint(), area.footprint());
    }

    #[test]
    fn flip_of_rectangles_is_an_involution(
        w in 20i32..400,
        h in 20i32..400,
        vertical in any::<bool>()
    ) {
        let area = Area::new(1, "R", 0.0, 0.0, f64::from(w), f64::from(h));
        let axis = if vertical { FlipAxis::Y } else { FlipAxis::X };
        let twice = flip(&flip(&area, axis), axis);
        prop_assert_eq!(twice.shape.points, area.shape.points);
    }

    #[test]
    fn rotations_compose(area in polygon_strategy(), a in -180.0f64..180.0, b in -180.0f64..180.0) {
        let stepwise = rotate(&rotate(&area, a), b);
        let direct = rotate(&area, a + b);
        prop_assert!((stepwise.width - direct.width).abs() <= 1.0);
        prop_assert!((stepwise.height - direct.height).abs() <= 1.0);
    }

    #[test]
    fn scale_factors_are_clamped(area in polygon_strategy()) {
        prop_assert_eq!(scale(&area, 100.0, 100.0), scale(&area, 5.0, 5.0));
        prop_assert_eq!(scale(&area, 0.0, 0.0), scale(&area, 0.1, 0.1));
    }

    #[test]
    fn transforms_leave_input_untouched(area in polygon_strategy(), angle in 0.0f64..360.0) {
        let copy = area.clone();
        let _ = rotate(&area, angle);
        let _ = scale(&area, 2.0, 0.5);
        let _ = flip(&area, FlipAxis::X);
        prop_assert_eq!(area, copy);
    }

    #[test]
    fn resize_never_goes_below_minimum(
        handle in handle_strategy(),
        dx in -1000.0f64..1000.0,
        dy in -1000.0f64..1000.0
    ) {
        let start = Footprint::new(100.0, 100.0, 120.0, 80.0);
        let f = resize_from_handle(start, handle, Point::new(dx, dy));
        prop_assert!(f.width >= 20.0 && f.height >= 20.0);
    }

    #[test]
    fn resize_keeps_opposite_edges(dx in -1000.0f64..1000.0, dy in -1000.0f64..1000.0) {
        let start = Footprint::new(100.0, 100.0, 120.0, 80.0);
        let f = resize_from_handle(start, ResizeHandle::NorthWest, Point::new(dx, dy));
        prop_assert!((f.x + f.width - 220.0).abs() < 1e-9);
        prop_assert!((f.y + f.height - 180.0).abs() < 1e-9);
    }
}

#[test]
fn test_generated_polygons_start_valid() {
    let area = polygon_area(vec![(0, 0), (10, 0), (0, 10)], 5, 5);
    let b = Bounds::from_points(&area.shape.points).unwrap();
    assert_eq!(b.width(), 10.0);
    assert_eq!(area.width, 50.0);
    assert!(satisfies_bounds_invariant(&area, 1e-9));
}
