//! # slipmap
//!
//! A headless slippy-map camera: Web-Mercator projection, a pan/zoom
//! viewport, spring-smoothed transitions and visible-tile enumeration.
//!
//! The crate never renders or fetches anything. A host feeds it screen size
//! and gestures, calls [`Map::update`] once per frame, and draws the tiles
//! reported by [`Map::tile_placements`].
//!
//! ```
//! use slipmap::prelude::*;
//!
//! let mut map = MapBuilder::new()
//!     .with_center_and_zoom(GeoPoint::new(51.4043, 35.7219), 8.0)
//!     .with_size(800.0, 600.0)
//!     .build()?;
//!
//! map.set_center(GeoPoint::new(52.0, 36.0));
//! while map.update(16.0) {}
//!
//! for tile in map.visible_tiles() {
//!     println!("{}", tile.key());
//! }
//! # Ok::<(), slipmap::MapError>(())
//! ```

pub mod animation;
pub mod core;
pub mod input;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::Bounds,
    builder::MapBuilder,
    config::{AnimationProfile, InteractionOptions, MapOptions},
    geo::{GeoBounds, GeoPoint, Point, TileCoord},
    map::{InteractionState, Map},
    viewport::{Viewport, ViewportTransform},
};

pub use animation::{FrameClock, Spring, SpringConfig, Transition, TransitionKind};

pub use input::{
    events::{EventKind, InputEvent, MapEvent},
    handler::{EventManager, InputHandler, ListenerId},
};

pub use tiles::{OpenStreetMapSource, TilePlacement, TileRange, TileSource, UrlTemplateSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom range: min {min} > max {max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("Invalid spring configuration: {0}")]
    InvalidSpring(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Invalid tile URL template: {0}")]
    InvalidTemplate(String),
}

/// Error type alias for convenience
pub type Error = MapError;
