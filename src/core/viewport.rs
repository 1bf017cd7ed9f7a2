use crate::core::{
    bounds::Bounds,
    constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, MAX_TILE_ZOOM, TILE_SIZE},
    geo::{GeoBounds, GeoPoint, Point, TileCoord},
    projection,
};
use crate::tiles::range::{TilePlacement, TileRange};
use serde::{Deserialize, Serialize};

/// Camera state over the infinite Mercator plane.
///
/// `pan_x`/`pan_y` translate plane pixels (at the continuous `zoom`) to screen
/// pixels: `screen = plane + pan`, so the screen origin shows plane point
/// `(-pan_x, -pan_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl ViewportTransform {
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64) -> Self {
        Self { pan_x, pan_y, zoom }
    }

    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    pub fn is_finite(&self) -> bool {
        self.pan_x.is_finite() && self.pan_y.is_finite() && self.zoom.is_finite()
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_MIN_ZOOM)
    }
}

/// Owns the camera transform, the screen size and the zoom limits, and
/// answers which tiles are visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    transform: ViewportTransform,
    /// Screen size in pixels; zero until the host has laid the view out
    size: Point,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// Creates a viewport showing `center` in the middle of a `size` screen
    pub fn new(center: GeoPoint, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            transform: ViewportTransform::new(0.0, 0.0, zoom),
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        };
        viewport.transform.zoom = viewport.clamp_zoom(zoom);
        viewport.set_center(center);
        viewport
    }

    /// Creates a viewport from a raw transform; zoom is still clamped
    pub fn from_transform(transform: ViewportTransform, size: Point) -> Self {
        let mut viewport = Self {
            transform,
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        };
        viewport.transform.zoom = viewport.clamp_zoom(transform.zoom);
        viewport
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Whether the host has given the screen a usable area yet
    pub fn is_laid_out(&self) -> bool {
        self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom limits and re-clamps the current zoom around the screen center.
    /// Reversed limits are swapped; non-finite limits are ignored.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        if !(min_zoom.is_finite() && max_zoom.is_finite()) {
            log::debug!("ignoring non-finite zoom limits {min_zoom}..{max_zoom}");
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        let zoom = self.transform.zoom;
        if zoom != self.clamp_zoom(zoom) {
            self.zoom_at(self.screen_center(), zoom);
        }
    }

    /// Middle of the screen rectangle
    pub fn screen_center(&self) -> Point {
        self.size.multiply(0.5)
    }

    /// Geographic point under the screen center
    pub fn center(&self) -> GeoPoint {
        self.screen_to_geo(&self.screen_center())
    }

    /// Re-pans so that `center` projects to the middle of the screen.
    /// Latitude is clamped into the Mercator band; zoom is unchanged.
    pub fn set_center(&mut self, center: GeoPoint) {
        let pan = self.pan_for_center(&center);
        self.transform.pan_x = pan.x;
        self.transform.pan_y = pan.y;
    }

    /// Updates the screen size, keeping the same geographic point centered
    pub fn set_size(&mut self, size: Point) {
        let center = self.center();
        self.size = size;
        if center.lng.is_finite() && center.lat.is_finite() {
            self.set_center(center);
        }
    }

    pub fn on_screen_resize(&mut self, width: f64, height: f64) {
        self.set_size(Point::new(width, height));
    }

    /// Adds a screen-pixel delta to the pan offset
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.transform.pan_x += dx;
        self.transform.pan_y += dy;
    }

    /// Zooms so that the plane point under `screen_point` stays under it.
    /// `new_zoom` is clamped to the limits first; non-finite requests are ignored.
    pub fn zoom_at(&mut self, screen_point: Point, new_zoom: f64) {
        if !new_zoom.is_finite() {
            return;
        }
        let new_zoom = self.clamp_zoom(new_zoom);
        let factor = 2_f64.powf(new_zoom - self.transform.zoom);

        let plane = self.screen_to_plane(&screen_point);
        let pan = screen_point.subtract(&plane.multiply(factor));

        self.transform = ViewportTransform::new(pan.x, pan.y, new_zoom);
    }

    /// Zooms around the screen center
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_at(self.screen_center(), zoom);
    }

    /// Overwrites the transform (zoom clamped); used by animations
    pub fn set_transform(&mut self, transform: ViewportTransform) {
        self.transform = ViewportTransform::new(
            transform.pan_x,
            transform.pan_y,
            self.clamp_zoom(transform.zoom),
        );
    }

    /// Pan offset that would center `center` at the current zoom
    pub fn pan_for_center(&self, center: &GeoPoint) -> Point {
        let plane = projection::project(&center.clamped(), self.transform.zoom);
        self.screen_center().subtract(&plane)
    }

    /// Screen pixel to plane pixel at the current (continuous) zoom
    pub fn screen_to_plane(&self, point: &Point) -> Point {
        point.subtract(&self.transform.pan())
    }

    pub fn plane_to_screen(&self, point: &Point) -> Point {
        point.add(&self.transform.pan())
    }

    pub fn screen_to_geo(&self, point: &Point) -> GeoPoint {
        projection::unproject(&self.screen_to_plane(point), self.transform.zoom)
    }

    pub fn geo_to_screen(&self, point: &GeoPoint) -> Point {
        self.plane_to_screen(&projection::project(point, self.transform.zoom))
    }

    /// Integer zoom at which tiles are fetched
    pub fn tile_zoom(&self) -> u8 {
        self.transform
            .zoom
            .floor()
            .clamp(0.0, f64::from(MAX_TILE_ZOOM)) as u8
    }

    /// CSS-style scale applied to the `tile_zoom` layer to render the fractional zoom
    pub fn tile_scale(&self) -> f64 {
        2_f64.powf(self.transform.zoom - f64::from(self.tile_zoom()))
    }

    /// The screen rectangle expressed in plane pixels at `tile_zoom`
    pub fn tiled_pixel_bounds(&self) -> Bounds {
        let pan = self.transform.pan();
        let min = Point::new(0.0, 0.0).subtract(&pan);
        let max = self.size.subtract(&pan);
        Bounds::new(min, max).scale(1.0 / self.tile_scale())
    }

    /// Tile indices covering the screen, or `None` when nothing is visible
    pub fn tile_range(&self) -> Option<TileRange> {
        if !self.is_laid_out() || !self.transform.is_finite() {
            return None;
        }
        TileRange::covering(&self.tiled_pixel_bounds(), self.tile_zoom())
    }

    /// Every tile needed to cover the screen, row-major. Empty when the
    /// screen has no area or the view lies outside the world.
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        self.tile_range()
            .map(|range| range.iter().collect())
            .unwrap_or_default()
    }

    /// Screen rectangle of each visible tile for the renderer
    pub fn tile_placements(&self) -> Vec<TilePlacement> {
        let scale = self.tile_scale();
        let side = TILE_SIZE * scale;
        self.visible_tiles()
            .into_iter()
            .map(|coord| {
                let origin = self.plane_to_screen(&Point::new(
                    f64::from(coord.x) * side,
                    f64::from(coord.y) * side,
                ));
                TilePlacement {
                    coord,
                    bounds: Bounds::from_origin_and_size(origin, side, side),
                }
            })
            .collect()
    }

    /// Geographic extent of the screen
    pub fn bounds(&self) -> GeoBounds {
        let nw = self.screen_to_geo(&Point::new(0.0, 0.0));
        let se = self.screen_to_geo(&self.size);
        GeoBounds::from_edges(nw.lng, se.lat, se.lng, nw.lat)
    }

    /// Centers on `bounds` at the largest integer zoom (within limits) at which
    /// they fit inside the screen minus `padding` on every side.
    pub fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64) {
        let available = Point::new(
            self.size.x - 2.0 * padding,
            self.size.y - 2.0 * padding,
        );
        let north_west = bounds.north_west().clamped();
        let south_east = bounds.south_east().clamped();

        let mut best_zoom = self.min_zoom;
        let mut zoom = self.min_zoom.ceil();
        while zoom <= self.max_zoom {
            let nw = projection::project(&north_west, zoom);
            let se = projection::project(&south_east, zoom);
            if (se.x - nw.x).abs() <= available.x && (se.y - nw.y).abs() <= available.y {
                best_zoom = zoom;
                zoom += 1.0;
            } else {
                break;
            }
        }

        let nw = projection::project(&north_west, best_zoom);
        let se = projection::project(&south_east, best_zoom);
        let middle = projection::unproject(&nw.add(&se).multiply(0.5), best_zoom);

        self.transform.zoom = self.clamp_zoom(best_zoom);
        self.set_center(middle);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GeoPoint::default(), DEFAULT_MIN_ZOOM, Point::new(0.0, 0.0))
    }
}
