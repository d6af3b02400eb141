use crate::algorithm::compositor::MosaicCompositor;
use crate::algorithm::matcher::ColorMatcher;
use crate::analysis::index::TileIndex;
use crate::analysis::library::TileLibrary;
use crate::io::configuration::{DEFAULT_PART_SIZE, MAX_WORKING_DIMENSION};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{MosaicSink, collect_tile_paths, load_source};
use crate::io::progress::{ProgressManager, Stage};
use crate::spatial::grid::SourceImage;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use tracing::info;

/// Mosaic parameters shared by every stage of a build
#[derive(Clone, Copy, Debug)]
pub struct MosaicConfig {
    /// Side length in pixels of each tile in the output
    pub part_size: u32,
    /// Longest side of the working source grid
    pub max_dimension: u32,
    /// Resampling filter for tiles and the source
    pub filter: FilterType,
    /// Whether tile loading and composition run on the thread pool
    pub parallel: bool,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            part_size: DEFAULT_PART_SIZE,
            max_dimension: MAX_WORKING_DIMENSION,
            filter: FilterType::Lanczos3,
            parallel: true,
        }
    }
}

impl MosaicConfig {
    /// Check parameters before any work starts
    ///
    /// # Errors
    ///
    /// Returns an error if the part size or working dimension is unusable
    pub fn validate(&self) -> Result<()> {
        TileLibrary::new(self.part_size)?;
        if self.max_dimension == 0 {
            return Err(invalid_parameter(
                "max_dimension",
                &self.max_dimension,
                &"must be positive",
            ));
        }
        Ok(())
    }

    /// Tile library configured for this build
    ///
    /// # Errors
    ///
    /// Returns an error if the part size is invalid
    pub fn library(&self) -> Result<TileLibrary> {
        Ok(TileLibrary::new(self.part_size)?
            .with_filter(self.filter)
            .with_parallelism(self.parallel))
    }

    /// Compositor configured for this build
    ///
    /// # Errors
    ///
    /// Returns an error if the part size is invalid
    pub fn compositor(&self) -> Result<MosaicCompositor> {
        Ok(MosaicCompositor::new(self.part_size)?.with_parallelism(self.parallel))
    }
}

/// Runs a complete mosaic build: tiles, source, composition, persistence
pub struct MosaicBuilder {
    tile_directory: PathBuf,
    config: MosaicConfig,
    progress: ProgressManager,
}

impl MosaicBuilder {
    /// Create a builder reading tiles from `tile_directory`
    pub fn new(tile_directory: impl Into<PathBuf>, config: MosaicConfig) -> Self {
        Self {
            tile_directory: tile_directory.into(),
            config,
            progress: ProgressManager::hidden(),
        }
    }

    /// Report stage progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Active configuration
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Progress display used for each stage
    pub const fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// Directory scanned for tiles
    pub fn tile_directory(&self) -> &Path {
        &self.tile_directory
    }

    /// Load every tile under the tile directory into an index
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked or no tile decodes
    pub fn load_tiles(&self) -> Result<TileIndex> {
        let library = self.config.library()?;

        info!(directory = %self.tile_directory.display(), "collecting tile paths");
        let paths = collect_tile_paths(&self.tile_directory)?;

        let bar = self.progress.start_stage(Stage::LoadTiles, paths.len());
        let index = library.build_with_progress(&paths, &bar);
        self.progress.finish_stage(&bar, Stage::LoadTiles);
        index
    }

    /// Compose a mosaic of an already decoded source image
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or composition fails
    pub fn compose(&self, source: DynamicImage, index: &TileIndex) -> Result<RgbImage> {
        self.config.validate()?;
        let working = SourceImage::bounded(source, self.config.max_dimension, self.config.filter)?;
        let matcher = ColorMatcher::new(index)?;

        let bar = self.progress.start_stage(Stage::Compose, working.height());
        let mosaic = self
            .config
            .compositor()?
            .compose_with_progress(&working, &matcher, &bar);
        self.progress.finish_stage(&bar, Stage::Compose);
        mosaic
    }

    /// Build the mosaic for `source_path` and hand it to `sink`
    ///
    /// The source is decoded before any tile is loaded, so an unreadable
    /// source fails fast.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any stage
    pub fn build(&self, source_path: &Path, sink: &mut dyn MosaicSink) -> Result<RgbImage> {
        self.config.validate()?;

        info!(path = %source_path.display(), "opening source image");
        let source = load_source(source_path)?;

        let index = self.load_tiles()?;
        let mosaic = self.compose(source, &index)?;

        info!(
            width = mosaic.width(),
            height = mosaic.height(),
            "saving mosaic"
        );
        sink.persist(&mosaic)?;

        info!("done");
        Ok(mosaic)
    }
}
