//! Working-resolution source grid
//!
//! The source photograph is bounded to a maximum working size before the
//! mosaic is expanded. Width and height are capped in two separate resize
//! passes, each triggered by the *original* dimensions: width first, then
//! height. When both sides exceed the cap this does not equal a single
//! proportional resize.

use crate::analysis::color::Color;
use crate::io::configuration::PROPORTIONAL_ROUNDING_BIAS;
use crate::io::error::{Result, computation_error, invalid_parameter};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use ndarray::{Array2, ArrayView1};

/// Read-only grid of source colors, stored as (rows, cols)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    samples: Array2<Color>,
}

impl SourceImage {
    /// Sample every pixel of an RGB image
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel buffer does not match its dimensions
    pub fn from_rgb(image: &RgbImage) -> Result<Self> {
        let shape = (image.height() as usize, image.width() as usize);
        let colors: Vec<Color> = image.pixels().map(|&pixel| Color::from(pixel)).collect();
        let samples = Array2::from_shape_vec(shape, colors)
            .map_err(|e| computation_error("source sampling", &e))?;
        Ok(Self { samples })
    }

    /// Bound an image to the working resolution and sample it
    ///
    /// # Errors
    ///
    /// Returns an error if `max_dimension` is zero
    pub fn bounded(image: DynamicImage, max_dimension: u32, filter: FilterType) -> Result<Self> {
        let working = bound_working_resolution(image, max_dimension, filter)?;
        Self::from_rgb(&working.to_rgb8())
    }

    /// Width in samples
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    /// Height in samples
    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    /// Color at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.samples.get((y, x)).copied()
    }

    /// One row of colors, left to right
    pub fn row(&self, y: usize) -> Option<ArrayView1<'_, Color>> {
        (y < self.height()).then(|| self.samples.row(y))
    }

    /// Iterator over every sample in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Color> {
        self.samples.iter().copied()
    }
}

/// Derived side length keeping the aspect ratio when `side` becomes `target`
fn proportional(other: u32, side: u32, target: u32) -> u32 {
    if side == 0 {
        return other;
    }
    let scaled = f64::from(other) * f64::from(target) / f64::from(side);
    ((scaled + PROPORTIONAL_ROUNDING_BIAS) as u32).max(1)
}

/// Dimensions produced by [`bound_working_resolution`] for a given input
///
/// # Errors
///
/// Returns an error if `max_dimension` is zero
pub fn bounded_dimensions(width: u32, height: u32, max_dimension: u32) -> Result<(u32, u32)> {
    if max_dimension == 0 {
        return Err(invalid_parameter(
            "max_dimension",
            &max_dimension,
            &"must be positive",
        ));
    }

    let (mut current_width, mut current_height) = (width, height);
    if width > max_dimension {
        current_height = proportional(current_height, current_width, max_dimension);
        current_width = max_dimension;
    }
    if height > max_dimension {
        current_width = proportional(current_width, current_height, max_dimension);
        current_height = max_dimension;
    }
    Ok((current_width, current_height))
}

/// Cap width, then height, of an image against `max_dimension`
///
/// Each pass is decided by the original size and resizes the output of the
/// previous pass, so a source over the cap on both axes is resized twice.
///
/// # Errors
///
/// Returns an error if `max_dimension` is zero
pub fn bound_working_resolution(
    image: DynamicImage,
    max_dimension: u32,
    filter: FilterType,
) -> Result<DynamicImage> {
    // Validates max_dimension before any resampling work
    bounded_dimensions(image.width(), image.height(), max_dimension)?;

    let (original_width, original_height) = (image.width(), image.height());
    let mut working = image;

    if original_width > max_dimension {
        let height = proportional(working.height(), working.width(), max_dimension);
        working = working.resize_exact(max_dimension, height, filter);
    }
    if original_height > max_dimension {
        let width = proportional(working.width(), working.height(), max_dimension);
        working = working.resize_exact(width, max_dimension, filter);
    }
    Ok(working)
}
