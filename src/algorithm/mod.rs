/// End-to-end mosaic build pipeline and its configuration
pub mod builder;
/// Memoization cache for color lookups
pub mod cache;
/// Tile placement into the output buffer
pub mod compositor;
/// Nearest-color tile search
pub mod matcher;
