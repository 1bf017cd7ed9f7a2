//! Prelude module for common slipmap types and traits
//!
//! `use slipmap::prelude::*;` brings in everything a host needs to drive a map.

pub use crate::core::{
    bounds::Bounds,
    builder::MapBuilder,
    config::{AnimationProfile, InteractionOptions, MapOptions},
    geo::{GeoBounds, GeoPoint, Point, TileCoord},
    map::{InteractionState, Map},
    projection::{project, unproject},
    viewport::{Viewport, ViewportTransform},
};

pub use crate::animation::{FrameClock, SpringConfig};

pub use crate::input::{
    events::{EventKind, InputEvent, MapEvent},
    handler::ListenerId,
};

pub use crate::tiles::{
    OpenStreetMapSource, TilePlacement, TileRange, TileSource, UrlTemplateSource,
};

pub use crate::{MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
