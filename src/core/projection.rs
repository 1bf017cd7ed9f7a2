//! Spherical Web Mercator (EPSG:3857) between geographic coordinates and
//! the pixel plane of the tile pyramid.
//!
//! At zoom `z` the world is a square of `TILE_SIZE * 2^z` pixels with the
//! origin at the north-west corner. Zoom may be fractional. Neither function
//! validates its input: latitudes at the poles project to `±inf`, which tile
//! enumeration later discards.

use crate::core::constants::TILE_SIZE;
use crate::core::geo::{GeoPoint, Point};
use std::f64::consts::PI;

/// Side length of the projected world in pixels at `zoom`
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2_f64.powf(zoom)
}

/// Projects a geographic point to plane pixels at `zoom`
pub fn project(point: &GeoPoint, zoom: f64) -> Point {
    let scale = world_size(zoom);
    let sin_lat = point.lat.to_radians().sin();

    let x = scale * (0.5 + point.lng / 360.0);
    let y = scale * (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI));

    Point::new(x, y)
}

/// Exact inverse of [`project`]
pub fn unproject(point: &Point, zoom: f64) -> GeoPoint {
    let scale = world_size(zoom);

    let lng = (point.x / scale - 0.5) * 360.0;
    let lat = (PI * (1.0 - 2.0 * point.y / scale)).sinh().atan().to_degrees();

    GeoPoint::new(lng, lat)
}
