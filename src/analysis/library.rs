//! Tile library loading and color indexing
//!
//! Every candidate file is decoded, resized to the configured square part
//! size and reduced to its mean color. Tiles that fail to decode are logged
//! and skipped; the build only fails when nothing survives.

use crate::analysis::index::TileIndex;
use crate::io::configuration::MAX_PART_SIZE;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::decode_image;
use crate::spatial::tiles::Tile;
use image::DynamicImage;
use image::imageops::FilterType;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads and normalizes tile images into a [`TileIndex`]
#[derive(Clone, Copy, Debug)]
pub struct TileLibrary {
    part_size: u32,
    filter: FilterType,
    parallel: bool,
}

impl TileLibrary {
    /// Create a library producing `part_size` x `part_size` tiles
    ///
    /// # Errors
    ///
    /// Returns an error if `part_size` is zero or exceeds [`MAX_PART_SIZE`]
    pub fn new(part_size: u32) -> Result<Self> {
        if part_size == 0 || part_size > MAX_PART_SIZE {
            return Err(invalid_parameter(
                "part_size",
                &part_size,
                &format!("must be between 1 and {MAX_PART_SIZE}"),
            ));
        }
        Ok(Self {
            part_size,
            filter: FilterType::Lanczos3,
            parallel: true,
        })
    }

    /// Use a different resampling filter for tile normalization
    #[must_use]
    pub const fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Enable or disable parallel tile decoding
    #[must_use]
    pub const fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Side length of produced tiles
    pub const fn part_size(&self) -> u32 {
        self.part_size
    }

    /// Resize a decoded image into a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the resized image is unusable as a tile
    pub fn normalize(&self, image: &DynamicImage) -> Result<Tile> {
        let resized = image.resize_exact(self.part_size, self.part_size, self.filter);
        Tile::from_pixels(resized.to_rgb8())
    }

    /// Decode and normalize a single tile file
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::TileDecode`] if the file cannot be decoded
    pub fn load_tile(&self, path: &Path) -> Result<Tile> {
        let image = decode_image(path).map_err(|source| MosaicError::TileDecode {
            path: path.to_path_buf(),
            source,
        })?;
        self.normalize(&image)
    }

    /// Build an index from tile files
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if no file decodes
    pub fn build(&self, paths: &[PathBuf]) -> Result<TileIndex> {
        self.build_with_progress(paths, &ProgressBar::hidden())
    }

    /// Build an index from tile files, advancing `progress` once per file
    ///
    /// Files are decoded concurrently when parallelism is enabled, but merged
    /// into the index in the order of `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if no file decodes
    pub fn build_with_progress(
        &self,
        paths: &[PathBuf],
        progress: &ProgressBar,
    ) -> Result<TileIndex> {
        info!(candidates = paths.len(), part_size = self.part_size, "loading tiles");

        let load = |path: &PathBuf| {
            let tile = self.load_tile(path);
            progress.inc(1);
            tile
        };
        let loaded: Vec<Result<Tile>> = if self.parallel {
            paths.par_iter().map(load).collect()
        } else {
            paths.iter().map(load).collect()
        };

        Self::collect_index(loaded, paths.len())
    }

    /// Build an index from already decoded images
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if `images` is empty
    pub fn build_from_images<I>(&self, images: I) -> Result<TileIndex>
    where
        I: IntoIterator<Item = DynamicImage>,
    {
        let loaded: Vec<Result<Tile>> = images
            .into_iter()
            .map(|image| self.normalize(&image))
            .collect();
        let attempted = loaded.len();
        Self::collect_index(loaded, attempted)
    }

    fn collect_index(loaded: Vec<Result<Tile>>, attempted: usize) -> Result<TileIndex> {
        let mut index = TileIndex::new();
        let mut skipped = 0usize;

        for result in loaded {
            match result {
                Ok(tile) => {
                    let color = tile.color();
                    if index.insert(tile).is_some() {
                        debug!(?color, "tile replaced an earlier tile with the same color");
                    }
                }
                Err(error) => {
                    skipped += 1;
                    warn!(%error, "skipping tile");
                }
            }
        }

        if index.is_empty() {
            return Err(MosaicError::EmptyLibrary { attempted });
        }

        info!(colors = index.len(), skipped, "tile library ready");
        Ok(index)
    }
}
