//! Map builder for fluent API configuration
//!
//! Collects the initial view, options and tile source, validates them and
//! produces a ready [`Map`].

use crate::{
    animation::SpringConfig,
    core::{
        config::{AnimationProfile, InteractionOptions, MapOptions},
        geo::{GeoPoint, Point},
        map::Map,
        viewport::Viewport,
    },
    tiles::source::{OpenStreetMapSource, TileSource},
    MapError, Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    center: GeoPoint,
    zoom: f64,
    /// Screen size; may stay zero until the host lays the view out
    size: Point,
    options: MapOptions,
    tile_source: Option<Box<dyn TileSource>>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            center: GeoPoint::default(),
            zoom: 0.0,
            size: Point::new(0.0, 0.0),
            options: MapOptions::default(),
            tile_source: None,
        }
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: GeoPoint, zoom: f64) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    /// Set the initial screen size in pixels
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Point::new(width, height);
        self
    }

    /// Set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.options.min_zoom = min_zoom;
        self.options.max_zoom = max_zoom;
        self
    }

    /// Replace all map options at once
    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_interaction(mut self, interaction: InteractionOptions) -> Self {
        self.options.interaction = interaction;
        self
    }

    pub fn with_animation(mut self, profile: AnimationProfile) -> Self {
        self.options.animation = profile;
        self
    }

    /// Shorthand for [`AnimationProfile::Custom`]
    pub fn with_spring(self, config: SpringConfig) -> Self {
        self.with_animation(AnimationProfile::Custom(config))
    }

    /// Turn off spring smoothing; every change applies immediately
    pub fn without_animation(self) -> Self {
        self.with_animation(AnimationProfile::Instant)
    }

    /// Set the tile source; defaults to OpenStreetMap
    pub fn with_tile_source(mut self, source: Box<dyn TileSource>) -> Self {
        self.tile_source = Some(source);
        self
    }

    /// Build the map with the configured options
    pub fn build(self) -> Result<Map> {
        self.options.validate()?;

        if !(self.center.lng.is_finite() && self.center.lat.is_finite()) {
            return Err(MapError::InvalidCoordinates(format!(
                "center must be finite, got {:?}",
                self.center
            )));
        }
        if !self.zoom.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "zoom must be finite, got {}",
                self.zoom
            )));
        }
        if !(self.size.is_finite() && self.size.x >= 0.0 && self.size.y >= 0.0) {
            return Err(MapError::InvalidCoordinates(format!(
                "size must be non-negative, got {}x{}",
                self.size.x, self.size.y
            )));
        }

        let mut viewport = Viewport::new(self.center, self.zoom, self.size);
        viewport.set_zoom_limits(self.options.min_zoom, self.options.max_zoom);
        // Limits may extend past the defaults; re-apply the zoom, then re-center
        viewport.set_zoom(self.zoom);
        viewport.set_center(self.center);

        let tile_source = self
            .tile_source
            .unwrap_or_else(|| Box::new(OpenStreetMapSource::new()));

        Ok(Map::with_options(viewport, self.options, tile_source))
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::source::UrlTemplateSource;

    #[test]
    fn test_builder_defaults() {
        let map = MapBuilder::new()
            .with_center_and_zoom(GeoPoint::new(51.4043, 35.7219), 8.0)
            .with_size(800.0, 600.0)
            .build()
            .unwrap();

        assert_eq!(map.zoom(), 8.0);
        assert!(map.center().max_abs_diff(&GeoPoint::new(51.4043, 35.7219)) < 1e-9);
        assert_eq!(map.visible_tiles().len(), 15);
    }

    #[test]
    fn test_builder_clamps_initial_zoom() {
        let map = MapBuilder::new()
            .with_center_and_zoom(GeoPoint::new(2.35, 48.85), 19.0)
            .with_size(400.0, 400.0)
            .with_zoom_limits(2.0, 14.0)
            .build()
            .unwrap();

        assert_eq!(map.zoom(), 14.0);
        assert!(map.center().max_abs_diff(&GeoPoint::new(2.35, 48.85)) < 1e-9);
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert!(matches!(
            MapBuilder::new().with_zoom_limits(10.0, 2.0).build(),
            Err(MapError::InvalidZoomRange { .. })
        ));
        assert!(matches!(
            MapBuilder::new()
                .with_center_and_zoom(GeoPoint::new(f64::NAN, 0.0), 3.0)
                .build(),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            MapBuilder::new().with_size(-1.0, 10.0).build(),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            MapBuilder::new()
                .with_spring(SpringConfig::new(-1.0, 10.0))
                .build(),
            Err(MapError::InvalidSpring(_))
        ));
        assert!(matches!(
            MapBuilder::new()
                .with_spring(SpringConfig::new(5.0e6, 26.0))
                .build(),
            Err(MapError::InvalidSpring(_))
        ));
        assert!(matches!(
            MapBuilder::new().with_zoom_limits(f64::NAN, 10.0).build(),
            Err(MapError::InvalidZoomRange { .. })
        ));
    }

    #[test]
    fn test_builder_tile_source_and_instant_profile() {
        let source =
            UrlTemplateSource::new("https://tiles.example.com/{z}/{x}/{y}.png", &[]).unwrap();
        let mut map = MapBuilder::new()
            .with_center_and_zoom(GeoPoint::new(0.0, 0.0), 2.0)
            .with_size(256.0, 256.0)
            .with_tile_source(Box::new(source))
            .without_animation()
            .build()
            .unwrap();

        assert!(map
            .tile_urls()
            .iter()
            .all(|(_, url)| url.starts_with("https://tiles.example.com/2/")));

        map.set_center(GeoPoint::new(20.0, 10.0));
        assert!(!map.is_animating());
    }
}
