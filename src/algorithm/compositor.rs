//! Mosaic composition from a working-resolution source grid
//!
//! Every source sample is replaced by a `part_size` x `part_size` tile. Each
//! source row owns one horizontal strip of the output buffer, so rows can be
//! composed concurrently without synchronizing writes.

use crate::algorithm::matcher::ColorMatcher;
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::grid::SourceImage;
use crate::spatial::tiles::Tile;
use image::RgbImage;
use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

const CHANNELS: usize = 3;

/// Expands a source grid into a full-resolution mosaic
#[derive(Clone, Copy, Debug)]
pub struct MosaicCompositor {
    part_size: u32,
    parallel: bool,
}

impl MosaicCompositor {
    /// Create a compositor placing `part_size` x `part_size` tiles
    ///
    /// # Errors
    ///
    /// Returns an error if `part_size` is zero
    pub fn new(part_size: u32) -> Result<Self> {
        if part_size == 0 {
            return Err(invalid_parameter("part_size", &part_size, &"must be positive"));
        }
        Ok(Self {
            part_size,
            parallel: true,
        })
    }

    /// Enable or disable parallel row composition
    #[must_use]
    pub const fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Side length of placed tiles
    pub const fn part_size(&self) -> u32 {
        self.part_size
    }

    /// Output dimensions for a source of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the mosaic would not fit in `u32` dimensions
    pub fn output_dimensions(&self, source: &SourceImage) -> Result<(u32, u32)> {
        let scale = |samples: usize, axis: &'static str| {
            u32::try_from(samples)
                .ok()
                .and_then(|samples| samples.checked_mul(self.part_size))
                .ok_or_else(|| {
                    invalid_parameter(axis, &samples, &"mosaic would exceed the maximum image size")
                })
        };
        Ok((
            scale(source.width(), "source_width")?,
            scale(source.height(), "source_height")?,
        ))
    }

    /// Bytes in the raw RGB buffer of a mosaic `out_width` pixels wide
    /// covering `rows` source rows
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not fit in `usize`
    pub fn buffer_len(&self, out_width: u32, rows: usize) -> Result<usize> {
        self.strip_len(out_width)?
            .checked_mul(rows)
            .ok_or_else(|| {
                invalid_parameter("source_height", &rows, &"mosaic buffer would overflow memory")
            })
    }

    // Bytes in the output strip owned by one source row
    fn strip_len(&self, out_width: u32) -> Result<usize> {
        (out_width as usize)
            .checked_mul(self.part_size as usize)
            .and_then(|len| len.checked_mul(CHANNELS))
            .ok_or_else(|| {
                invalid_parameter("out_width", &out_width, &"mosaic buffer would overflow memory")
            })
    }

    /// Compose the mosaic for `source`
    ///
    /// # Errors
    ///
    /// Returns an error if a tile does not match the part size or the output
    /// buffer cannot be allocated with the required dimensions
    pub fn compose(&self, source: &SourceImage, matcher: &ColorMatcher<'_>) -> Result<RgbImage> {
        self.compose_with_progress(source, matcher, &ProgressBar::hidden())
    }

    /// Compose the mosaic, advancing `progress` once per source row
    ///
    /// # Errors
    ///
    /// Returns an error if a tile does not match the part size or the output
    /// buffer cannot be allocated with the required dimensions
    pub fn compose_with_progress(
        &self,
        source: &SourceImage,
        matcher: &ColorMatcher<'_>,
        progress: &ProgressBar,
    ) -> Result<RgbImage> {
        let (out_width, out_height) = self.output_dimensions(source)?;
        info!(
            source_width = source.width(),
            source_height = source.height(),
            out_width,
            out_height,
            "composing mosaic"
        );

        let strip_len = self.strip_len(out_width)?;
        let mut buffer = vec![0u8; self.buffer_len(out_width, source.height())?];

        if strip_len > 0 {
            let fill = |(y, strip): (usize, &mut [u8])| {
                let result = self.fill_strip(source, matcher, y, strip);
                progress.inc(1);
                result
            };
            if self.parallel {
                buffer
                    .par_chunks_mut(strip_len)
                    .enumerate()
                    .try_for_each(fill)?;
            } else {
                buffer.chunks_mut(strip_len).enumerate().try_for_each(fill)?;
            }
        }

        debug!(stats = ?matcher.cache_stats(), "match cache");
        RgbImage::from_raw(out_width, out_height, buffer).ok_or_else(|| {
            computation_error("mosaic composition", &"output buffer size mismatch")
        })
    }

    // Writes source row `y` into its strip of `part` output rows
    fn fill_strip(
        &self,
        source: &SourceImage,
        matcher: &ColorMatcher<'_>,
        y: usize,
        strip: &mut [u8],
    ) -> Result<()> {
        let row = source
            .row(y)
            .ok_or_else(|| computation_error("mosaic composition", &format!("missing row {y}")))?;
        let row_stride = source.width() * self.part_size as usize * CHANNELS;

        for (x, &color) in row.iter().enumerate() {
            let tile = matcher.nearest(color)?;
            self.blit(tile, x, row_stride, strip)?;
        }
        Ok(())
    }

    // Copies every tile row verbatim into the block starting at column x * part
    fn blit(&self, tile: &Tile, x: usize, row_stride: usize, strip: &mut [u8]) -> Result<()> {
        if tile.size() != self.part_size {
            return Err(computation_error(
                "mosaic composition",
                &format!(
                    "tile is {}px but the part size is {}px",
                    tile.size(),
                    self.part_size
                ),
            ));
        }

        let tile_stride = self.part_size as usize * CHANNELS;
        let offset = x * tile_stride;
        for ty in 0..self.part_size {
            let start = ty as usize * row_stride + offset;
            let target = strip.get_mut(start..start + tile_stride);
            match (tile.row(ty), target) {
                (Some(source_row), Some(target)) => target.copy_from_slice(source_row),
                _ => {
                    return Err(computation_error(
                        "mosaic composition",
                        &format!("tile block at column {x} is out of bounds"),
                    ));
                }
            }
        }
        Ok(())
    }
}
