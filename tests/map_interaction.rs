use slipmap::prelude::*;
use std::sync::{Arc, Mutex};

/// Integration tests driving the map the way a host would: gestures in,
/// frames ticked, notifications and tiles out
#[cfg(test)]
mod map_interaction {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn tehran_map() -> Map {
        MapBuilder::new()
            .with_center_and_zoom(GeoPoint::new(51.4043, 35.7219), 8.0)
            .with_size(800.0, 600.0)
            .build()
            .unwrap()
    }

    fn collect(map: &mut Map, kind: EventKind) -> Arc<Mutex<Vec<MapEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        map.on(kind, move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    fn run_frames(map: &mut Map, max_frames: usize) -> usize {
        for frame in 1..=max_frames {
            if !map.update(FRAME_MS) {
                return frame;
            }
        }
        max_frames
    }

    /// A drag that starts mid-animation must pick up exactly where the
    /// animation was, then follow the raw deltas.
    #[test]
    fn test_drag_over_animation_has_no_discontinuity() {
        let mut map = tehran_map();
        map.set_center(GeoPoint::new(60.0, 30.0));
        run_frames(&mut map, 6);
        assert!(map.is_animating());

        let before_drag = map.transform();
        map.handle_input(InputEvent::DragStart {
            position: Point::new(400.0, 300.0),
        });
        assert_eq!(map.transform(), before_drag);
        assert_eq!(map.interaction_state(), InteractionState::Dragging);

        map.handle_input(InputEvent::Drag {
            delta: Point::new(12.0, -4.0),
        });
        let after = map.transform();
        assert_eq!(after.pan_x, before_drag.pan_x + 12.0);
        assert_eq!(after.pan_y, before_drag.pan_y - 4.0);

        // Frames during the drag must not move the camera
        map.update(FRAME_MS);
        assert_eq!(map.transform(), after);

        map.handle_input(InputEvent::DragEnd);
        assert_eq!(map.interaction_state(), InteractionState::Idle);
        assert_eq!(map.transform(), after);
    }

    /// Two-way binding: a host that echoes every `CenterChanged` back through
    /// `set_center` must not disturb the map.
    #[test]
    fn test_echoed_center_is_stable() {
        let mut map = tehran_map();
        let centers = collect(&mut map, EventKind::CenterChanged);

        map.handle_input(InputEvent::DragStart {
            position: Point::new(0.0, 0.0),
        });
        for _ in 0..10 {
            map.handle_input(InputEvent::Drag {
                delta: Point::new(-7.0, 3.0),
            });
        }
        map.handle_input(InputEvent::DragEnd);

        let transform = map.transform();
        let echoed = match centers.lock().unwrap().last() {
            Some(MapEvent::CenterChanged { center, .. }) => *center,
            other => panic!("expected a center notification, got {other:?}"),
        };
        map.set_center(echoed);
        run_frames(&mut map, 10);

        assert!(!map.is_animating());
        assert!(map.transform().pan().distance_to(&transform.pan()) < 1e-6);
        assert_eq!(centers.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_wheel_zoom_converges_on_cursor() {
        let mut map = tehran_map();
        let cursor = Point::new(620.0, 140.0);
        let pinned = map.viewport().screen_to_geo(&cursor);

        for _ in 0..3 {
            map.handle_input(InputEvent::Wheel {
                delta: -20.0,
                position: cursor,
            });
            map.update(FRAME_MS);
        }
        let frames = run_frames(&mut map, 600);
        assert!(frames < 600);

        assert!((map.zoom() - 9.0).abs() < 1e-12);
        assert!(map.viewport().screen_to_geo(&cursor).max_abs_diff(&pinned) < 1e-6);
        assert!(map.visible_tiles().iter().all(|tile| tile.z == 9));
    }

    #[test]
    fn test_resize_recenters_and_refreshes_tiles() {
        let mut map = MapBuilder::new()
            .with_center_and_zoom(GeoPoint::new(-0.1276, 51.5072), 10.0)
            .build()
            .unwrap();
        assert!(map.visible_tiles().is_empty());

        map.handle_input(InputEvent::Resize {
            size: Point::new(1024.0, 768.0),
        });
        assert!(map
            .center()
            .max_abs_diff(&GeoPoint::new(-0.1276, 51.5072))
            < 1e-9);
        assert!(!map.visible_tiles().is_empty());

        map.handle_input(InputEvent::Resize {
            size: Point::new(0.0, 768.0),
        });
        assert!(map.visible_tiles().is_empty());
    }

    #[test]
    fn test_options_from_json_drive_the_map() {
        let options = MapOptions::from_json(
            r#"{
                "min_zoom": 4,
                "max_zoom": 9,
                "animation": "instant",
                "interaction": { "zoom_on_wheel": false }
            }"#,
        )
        .unwrap();

        let mut map = MapBuilder::new()
            .with_center_and_zoom(GeoPoint::new(13.405, 52.52), 6.0)
            .with_size(640.0, 480.0)
            .with_options(options)
            .build()
            .unwrap();

        map.handle_input(InputEvent::Wheel {
            delta: -600.0,
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(map.zoom(), 6.0);

        map.handle_input(InputEvent::DoubleClick {
            position: Point::new(320.0, 240.0),
        });
        assert!(!map.is_animating());
        assert_eq!(map.zoom(), 7.0);

        map.set_zoom(40.0);
        assert_eq!(map.zoom(), 9.0);
    }

    #[test]
    fn test_listener_removal() {
        let mut map = tehran_map();
        let views = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&views);
        let id = map.on(EventKind::ViewChanged, move |_| {
            *counter.lock().unwrap() += 1;
        });

        map.pan(5.0, 5.0);
        assert!(map.off(id));
        map.pan(5.0, 5.0);

        assert_eq!(*views.lock().unwrap(), 1);
    }

    #[test]
    fn test_tile_keys_and_urls() {
        let source = UrlTemplateSource::new("https://{s}.tiles.test/{z}/{x}/{y}.png", &["a", "b"])
            .unwrap();
        let mut map = tehran_map();
        map.set_tile_source(Box::new(source));

        let urls = map.tile_urls();
        assert_eq!(urls.len(), 15);
        for (coord, url) in urls {
            assert!(url.ends_with(&format!("/{}.png", coord.key())));
            assert_eq!(coord.key(), format!("{}/{}/{}", coord.z, coord.x, coord.y));
        }
    }
}
