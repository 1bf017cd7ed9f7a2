use crate::core::{bounds::Bounds, constants::TILE_SIZE, geo::TileCoord};
use serde::{Deserialize, Serialize};

/// Inclusive rectangle of tile indices at a single zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRange {
    pub z: u8,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl TileRange {
    /// Smallest range whose tiles cover `plane_bounds` (pixels at integer zoom `z`),
    /// clipped to the world. Returns `None` when nothing of the world is covered.
    pub fn covering(plane_bounds: &Bounds, z: u8) -> Option<Self> {
        if plane_bounds.is_empty() {
            return None;
        }

        let last = (TileCoord::tiles_per_axis(z) - 1) as f64;

        // Half-open pixel span [min, max) maps to tiles floor(min)..ceil(max)-1
        let min_x = (plane_bounds.min.x / TILE_SIZE).floor().max(0.0);
        let min_y = (plane_bounds.min.y / TILE_SIZE).floor().max(0.0);
        let max_x = ((plane_bounds.max.x / TILE_SIZE).ceil() - 1.0).min(last);
        let max_y = ((plane_bounds.max.y / TILE_SIZE).ceil() - 1.0).min(last);

        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some(Self {
            z,
            min_x: min_x as u32,
            min_y: min_y as u32,
            max_x: max_x as u32,
            max_y: max_y as u32,
        })
    }

    /// Columns in the range; zero when `min_x > max_x`
    pub fn width(&self) -> u32 {
        if self.min_x > self.max_x {
            0
        } else {
            self.max_x - self.min_x + 1
        }
    }

    /// Rows in the range; zero when `min_y > max_y`
    pub fn height(&self) -> u32 {
        if self.min_y > self.max_y {
            0
        } else {
            self.max_y - self.min_y + 1
        }
    }

    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// True when either axis is inverted
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        coord.z == self.z
            && (self.min_x..=self.max_x).contains(&coord.x)
            && (self.min_y..=self.max_y).contains(&coord.y)
    }

    /// Row-major iteration over every tile in the range
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| TileCoord::new(x, y, self.z)))
    }

    /// Pixel footprint of the range at its own zoom level
    pub fn plane_bounds(&self) -> Bounds {
        Bounds::from_coords(
            f64::from(self.min_x) * TILE_SIZE,
            f64::from(self.min_y) * TILE_SIZE,
            (f64::from(self.max_x) + 1.0) * TILE_SIZE,
            (f64::from(self.max_y) + 1.0) * TILE_SIZE,
        )
    }
}

/// Where a tile image is drawn on screen for the current transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub coord: TileCoord,
    /// Screen-space rectangle; its side is `TILE_SIZE * 2^(zoom - z)`
    pub bounds: Bounds,
}
