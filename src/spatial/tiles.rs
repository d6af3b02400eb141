//! Normalized tile images and their representative colors

use crate::analysis::color::{Color, representative_color};
use crate::io::error::{Result, computation_error};
use image::RgbImage;

/// An immutable square tile with its representative color
///
/// The color is always computed from the stored pixels, so it reflects
/// the normalized image rather than whatever the tile was decoded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pixels: RgbImage,
    color: Color,
}

impl Tile {
    /// Wrap a square pixel buffer as a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is empty or not square
    pub fn from_pixels(pixels: RgbImage) -> Result<Self> {
        if pixels.width() != pixels.height() {
            return Err(computation_error(
                "tile normalization",
                &format!(
                    "tile must be square, got {}x{}",
                    pixels.width(),
                    pixels.height()
                ),
            ));
        }
        let color = representative_color(&pixels)
            .ok_or_else(|| computation_error("tile normalization", &"tile has no pixels"))?;
        Ok(Self { pixels, color })
    }

    /// Build a tile of a single color, mostly useful for synthetic libraries
    pub fn solid(color: Color, size: u32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(size, size, color.to_rgb()),
            color,
        }
    }

    /// Side length in pixels
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    /// Mean color of the tile pixels
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Tile pixel buffer
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// One row of packed RGB bytes, top row first
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let stride = self.pixels.width() as usize * 3;
        let start = y as usize * stride;
        self.pixels.as_raw().get(start..start + stride)
    }
}
