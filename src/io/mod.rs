//! File, terminal and configuration concerns around the mosaic core

/// Command-line parsing and the single-build runner
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, tile discovery and mosaic persistence
pub mod image;
/// Diagnostic log setup
pub mod logging;
/// Stage progress bars
pub mod progress;
