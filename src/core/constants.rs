//! Engine-wide constants for the slippy-map tile pyramid.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Square tile size in pixels, fixed for the lifetime of the process.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude bound of the Web Mercator square (atan(sinh(π)) in degrees).
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Longitude bound of the projected world.
pub const MAX_LONGITUDE: f64 = 180.0;

pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 20.0;

/// Highest zoom the tile pyramid can address with `u32` tile indices.
pub const MAX_TILE_ZOOM: u8 = 31;

/// Spring settles once the remaining displacement is below this many pixels.
pub const PAN_REST_DELTA: f64 = 0.5;

/// Pan rest velocity in pixels per second (0.01 px/ms).
pub const PAN_REST_VELOCITY: f64 = 10.0;

/// Zoom springs settle within this many zoom levels of the target.
pub const ZOOM_REST_DELTA: f64 = 0.001;

/// Zoom rest velocity in zoom levels per second.
pub const ZOOM_REST_VELOCITY: f64 = 0.02;

/// Frame deltas longer than this (ms) are truncated so a stalled tab
/// does not make the spring jump.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

/// Pixels of wheel travel per zoom level (Leaflet's `wheelPxPerZoomLevel`).
pub const WHEEL_PX_PER_ZOOM_LEVEL: f64 = 60.0;
