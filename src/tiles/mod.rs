//! Tile addressing: which tiles cover the view and where to fetch them.

pub mod range;
pub mod source;

pub use range::{TilePlacement, TileRange};
pub use source::{OpenStreetMapSource, TileSource, UrlTemplateSource};
