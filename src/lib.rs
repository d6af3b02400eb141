//! Photomosaic compositor that rebuilds a photograph out of small tile images
//!
//! Tiles are normalized to a fixed square size and indexed by their mean
//! color. Every sample of the downscaled source is then replaced by the tile
//! whose color is nearest in RGB space, with lookups memoized per color.

#![forbid(unsafe_code)]

/// Nearest-color matching, memoization and mosaic composition
pub mod algorithm;
/// Color math, tile indexing and tile library loading
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Source grids and tile buffers
pub mod spatial;

pub use io::error::{MosaicError, Result};
