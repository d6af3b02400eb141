//! Command-line interface for building a single photomosaic

use crate::algorithm::builder::{MosaicBuilder, MosaicConfig};
use crate::io::configuration::{
    DEFAULT_OUTPUT_PATH, DEFAULT_PART_SIZE, DEFAULT_SOURCE_PATH, DEFAULT_TILE_DIRECTORY,
    MAX_WORKING_DIMENSION,
};
use crate::io::error::Result;
use crate::io::image::FileSink;
use crate::io::logging::Verbosity;
use crate::io::progress::ProgressManager;
use clap::{Parser, ValueEnum};
use image::imageops::FilterType;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Resampling filter used when normalizing tiles and bounding the source
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResampleFilter {
    /// Nearest neighbor
    Nearest,
    /// Linear
    Triangle,
    /// Cubic
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Gaussian => Self::Gaussian,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild a photograph out of color-matched tile images"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Source photograph to rebuild
    #[arg(short, long, default_value = DEFAULT_SOURCE_PATH)]
    pub source: PathBuf,

    /// Directory searched recursively for tile images
    #[arg(short, long, default_value = DEFAULT_TILE_DIRECTORY)]
    pub tiles: PathBuf,

    /// Output image path; the extension selects the format
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Side length in pixels of every tile in the mosaic
    #[arg(short, long, default_value_t = DEFAULT_PART_SIZE)]
    pub part_size: u32,

    /// Longest side of the source after downscaling, in tiles
    #[arg(short, long, default_value_t = MAX_WORKING_DIMENSION)]
    pub max_dimension: u32,

    /// Resampling filter for tiles and source
    #[arg(short, long, value_enum, default_value_t = ResampleFilter::Lanczos3)]
    pub filter: ResampleFilter,

    /// Run on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Suppress progress and informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Include debug diagnostics such as cache statistics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Mosaic parameters selected on the command line
    pub fn config(&self) -> MosaicConfig {
        MosaicConfig {
            part_size: self.part_size,
            max_dimension: self.max_dimension,
            filter: self.filter.into(),
            parallel: !self.sequential,
        }
    }

    /// Diagnostic verbosity selected on the command line
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one mosaic build as configured on the command line
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the mosaic and write it to the output path
    ///
    /// A failed build is logged at error level before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage of the build fails
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        let builder = MosaicBuilder::new(&self.cli.tiles, self.cli.config()).with_progress(progress);
        let mut sink = FileSink::new(&self.cli.output);
        let result = builder.build(&self.cli.source, &mut sink);

        builder.progress().finish();
        let mosaic = result.inspect_err(|error| {
            error!(%error, elapsed = ?start_time.elapsed(), "mosaic build failed");
        })?;

        info!(
            output = %sink.path().display(),
            width = mosaic.width(),
            height = mosaic.height(),
            elapsed = ?start_time.elapsed(),
            "mosaic written"
        );
        Ok(())
    }
}
