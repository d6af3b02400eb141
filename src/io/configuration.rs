//! Mosaic constants and runtime configuration defaults

// Tile geometry
/// Side length in pixels of every normalized tile
pub const DEFAULT_PART_SIZE: u32 = 5;

// Safety limit to prevent excessive memory allocation
/// Largest accepted tile side length
pub const MAX_PART_SIZE: u32 = 256;

/// Longest side, in samples, of the working source image
pub const MAX_WORKING_DIMENSION: u32 = 300;

// Added before truncating the derived side of a proportional resize
/// Rounding bias for proportional resizing
pub const PROPORTIONAL_ROUNDING_BIAS: f64 = 0.7;

/// Number of independently locked shards in the match cache
pub const CACHE_SHARD_COUNT: usize = 16;

// Default locations
/// Directory scanned recursively for tile images
pub const DEFAULT_TILE_DIRECTORY: &str = "./img";
/// Source photograph to rebuild
pub const DEFAULT_SOURCE_PATH: &str = "img/img-1.jpg";
/// Destination of the finished mosaic
pub const DEFAULT_OUTPUT_PATH: &str = "res.png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
