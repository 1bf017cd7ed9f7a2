use crate::core::constants::{MAX_LATITUDE, MAX_LONGITUDE, MAX_TILE_ZOOM, TILE_SIZE};
use crate::core::projection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location on the Earth's surface in the WGS84 datum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a new point from longitude and latitude (x before y)
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Validates that the coordinates are finite and within geographic ranges
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && self.lat > -90.0
            && self.lat < 90.0
            && self.lng >= -MAX_LONGITUDE
            && self.lng <= MAX_LONGITUDE
    }

    /// Clamps latitude to valid Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Returns a copy clamped into the projectable band
    pub fn clamped(&self) -> Self {
        Self::new(
            self.lng.clamp(-MAX_LONGITUDE, MAX_LONGITUDE),
            Self::clamp_lat(self.lat),
        )
    }

    /// Largest per-axis difference in degrees
    pub fn max_abs_diff(&self, other: &GeoPoint) -> f64 {
        (self.lng - other.lng).abs().max((self.lat - other.lat).abs())
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A point in screen or projected plane pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Geographic rectangle, used for the visible area and `fit_bounds`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    pub fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from west, south, east, north edges
    pub fn from_edges(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::new(GeoPoint::new(west, south), GeoPoint::new(east, north))
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lng + self.north_east.lng) / 2.0,
            (self.south_west.lat + self.north_east.lat) / 2.0,
        )
    }

    pub fn north_west(&self) -> GeoPoint {
        GeoPoint::new(self.south_west.lng, self.north_east.lat)
    }

    pub fn south_east(&self) -> GeoPoint {
        GeoPoint::new(self.north_east.lng, self.south_west.lat)
    }
}

/// One raster image in the tile pyramid: column `x`, row `y` at integer zoom `z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along each axis at zoom `z`
    pub fn tiles_per_axis(z: u8) -> u64 {
        1u64 << z.min(MAX_TILE_ZOOM)
    }

    /// The tile containing `point` at zoom `z`; latitude is clamped first
    pub fn from_geo(point: &GeoPoint, z: u8) -> Self {
        let z = z.min(MAX_TILE_ZOOM);
        let plane = projection::project(&point.clamped(), f64::from(z));
        let max_index = (Self::tiles_per_axis(z) - 1) as f64;
        let x = (plane.x / TILE_SIZE).floor().clamp(0.0, max_index);
        let y = (plane.y / TILE_SIZE).floor().clamp(0.0, max_index);
        Self::new(x as u32, y as u32, z)
    }

    /// Geographic position of the tile's north-west corner
    pub fn north_west(&self) -> GeoPoint {
        projection::unproject(
            &Point::new(f64::from(self.x) * TILE_SIZE, f64::from(self.y) * TILE_SIZE),
            f64::from(self.z),
        )
    }

    /// Geographic extent of the tile
    pub fn bounds(&self) -> GeoBounds {
        let nw = self.north_west();
        let se = projection::unproject(
            &Point::new(
                (f64::from(self.x) + 1.0) * TILE_SIZE,
                (f64::from(self.y) + 1.0) * TILE_SIZE,
            ),
            f64::from(self.z),
        );
        GeoBounds::from_edges(nw.lng, se.lat, se.lng, nw.lat)
    }

    /// Checks that both indices lie inside `[0, 2^z - 1]`
    pub fn is_valid(&self) -> bool {
        let n = Self::tiles_per_axis(self.z);
        self.z <= MAX_TILE_ZOOM && u64::from(self.x) < n && u64::from(self.y) < n
    }

    /// Path key used by tile servers: `{z}/{x}/{y}`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}
