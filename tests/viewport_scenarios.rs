use rstest::rstest;
use slipmap::core::projection::{project, unproject};
use slipmap::prelude::*;

/// Geometry checks against the pure viewport, without the interaction layer
#[cfg(test)]
mod viewport_scenarios {
    use super::*;

    fn tehran_viewport() -> Viewport {
        Viewport::new(GeoPoint::new(51.4043, 35.7219), 8.0, Point::new(800.0, 600.0))
    }

    #[rstest]
    #[case(0.0)]
    #[case(3.0)]
    #[case(7.5)]
    #[case(13.0)]
    #[case(20.0)]
    fn test_round_trip_across_the_globe(#[case] zoom: f64) {
        let mut lat = -84.9;
        while lat < 85.0 {
            let mut lng = -179.5;
            while lng < 180.0 {
                let point = GeoPoint::new(lng, lat);
                let back = unproject(&project(&point, zoom), zoom);
                assert!(
                    back.max_abs_diff(&point) < 1e-6,
                    "{point:?} came back as {back:?} at zoom {zoom}"
                );
                lng += 17.3;
            }
            lat += 9.7;
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(8.0)]
    #[case(19.25)]
    fn test_projection_is_monotonic(#[case] zoom: f64) {
        let mut previous = project(&GeoPoint::new(-180.0, 0.0), zoom);
        for step in 1..=360 {
            let next = project(&GeoPoint::new(-180.0 + f64::from(step), 0.0), zoom);
            assert!(next.x > previous.x);
            previous = next;
        }

        let mut previous = project(&GeoPoint::new(0.0, -85.0), zoom);
        for step in 1..=170 {
            let next = project(&GeoPoint::new(0.0, -85.0 + f64::from(step)), zoom);
            assert!(next.y < previous.y);
            previous = next;
        }
    }

    #[rstest]
    #[case(ViewportTransform::new(0.0, 0.0, 0.0))]
    #[case(ViewportTransform::new(-5000.0, 1234.0, 8.0))]
    #[case(ViewportTransform::new(1e9, -1e9, 19.5))]
    fn test_zero_sized_screen_shows_nothing(#[case] transform: ViewportTransform) {
        let viewport = Viewport::from_transform(transform, Point::new(0.0, 0.0));
        assert!(viewport.visible_tiles().is_empty());
        assert!(viewport.tile_placements().is_empty());
    }

    #[rstest]
    #[case(Point::new(0.0, 0.0), 12.0)]
    #[case(Point::new(400.0, 300.0), 3.5)]
    #[case(Point::new(799.0, 12.0), 8.75)]
    #[case(Point::new(150.0, 590.0), 16.0)]
    fn test_zoom_keeps_cursor_anchored(#[case] cursor: Point, #[case] zoom: f64) {
        let mut viewport = tehran_viewport();
        let before = viewport.screen_to_geo(&cursor);

        viewport.zoom_at(cursor, zoom);

        assert_eq!(viewport.zoom(), zoom);
        assert!(viewport.screen_to_geo(&cursor).max_abs_diff(&before) < 1e-6);
    }

    #[test]
    fn test_tehran_grid_covers_screen() {
        let viewport = tehran_viewport();
        let tiles = viewport.visible_tiles();
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|tile| tile.z == 8 && tile.x <= 255 && tile.y <= 255));

        // Rectangular: every (x, y) between the extremes is present exactly once
        let min_x = tiles.iter().map(|t| t.x).min().unwrap();
        let max_x = tiles.iter().map(|t| t.x).max().unwrap();
        let min_y = tiles.iter().map(|t| t.y).min().unwrap();
        let max_y = tiles.iter().map(|t| t.y).max().unwrap();
        assert_eq!(
            tiles.len() as u32,
            (max_x - min_x + 1) * (max_y - min_y + 1)
        );

        let covered = viewport
            .tile_placements()
            .iter()
            .fold(None::<Bounds>, |acc, placement| {
                Some(match acc {
                    None => placement.bounds,
                    Some(bounds) => Bounds::new(
                        Point::new(
                            bounds.min.x.min(placement.bounds.min.x),
                            bounds.min.y.min(placement.bounds.min.y),
                        ),
                        Point::new(
                            bounds.max.x.max(placement.bounds.max.x),
                            bounds.max.y.max(placement.bounds.max.y),
                        ),
                    ),
                })
            })
            .unwrap();
        assert!(covered.contains_bounds(&Bounds::new(
            Point::new(0.0, 0.0),
            Point::new(800.0, 600.0)
        )));
    }

    #[test]
    fn test_pan_is_additive() {
        let mut viewport =
            Viewport::from_transform(ViewportTransform::new(0.0, 0.0, 8.0), Point::new(800.0, 600.0));
        viewport.pan(100.0, 50.0);
        assert_eq!(viewport.transform(), ViewportTransform::new(100.0, 50.0, 8.0));
    }

    #[test]
    fn test_tiles_never_leave_the_world() {
        let mut viewport = Viewport::new(GeoPoint::new(179.9, 85.0), 3.0, Point::new(1920.0, 1080.0));
        for tile in viewport.visible_tiles() {
            assert!(tile.is_valid(), "{tile} is outside the z3 grid");
        }

        viewport.pan(1e7, 0.0);
        assert!(viewport.visible_tiles().is_empty());
    }

    #[test]
    fn test_fractional_zoom_scales_lower_level() {
        let viewport = Viewport::new(GeoPoint::new(0.0, 0.0), 4.5, Point::new(512.0, 512.0));
        assert_eq!(viewport.tile_zoom(), 4);
        assert!((viewport.tile_scale() - 2_f64.sqrt()).abs() < 1e-12);

        let placements = viewport.tile_placements();
        assert!(placements
            .iter()
            .all(|p| (p.bounds.width() - 256.0 * 2_f64.sqrt()).abs() < 1e-9));
    }
}
