//! Color analysis and tile library indexing

/// RGB colors, distances and representative colors
pub mod color;
/// Color-keyed tile index
pub mod index;
/// Tile loading and normalization
pub mod library;
