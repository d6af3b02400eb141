//! Spatial data structures for the source and tile images
//!
//! This module contains:
//! - The working-resolution source grid and its two-step bounding policy
//! - Normalized square tile buffers

/// Source grid sampling and working-resolution bounding
pub mod grid;
/// Normalized tile buffers
pub mod tiles;

pub use grid::SourceImage;
pub use tiles::Tile;
