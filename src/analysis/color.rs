//! RGB colors used as index keys and as points in color space

use image::{Rgb, RgbImage};

/// An exact 8-bit RGB triple
///
/// Equality and hashing are exact, so two colors collide in a map only when
/// every channel matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red intensity
    pub r: u8,
    /// Green intensity
    pub g: u8,
    /// Blue intensity
    pub b: u8,
}

impl Color {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space
    ///
    /// Orders candidates exactly like the true distance, without a square root.
    pub fn squared_distance(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db).unsigned_abs()
    }

    /// Euclidean distance in RGB space
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.squared_distance(other)).sqrt()
    }

    /// Channels as an `image` pixel
    pub const fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Per-channel arithmetic mean of every pixel, truncated toward zero
///
/// Returns `None` for an image without pixels.
pub fn representative_color(image: &RgbImage) -> Option<Color> {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return None;
    }

    let mut totals = [0u64; 3];
    for pixel in image.pixels() {
        for (total, &channel) in totals.iter_mut().zip(pixel.0.iter()) {
            *total += u64::from(channel);
        }
    }

    // A mean of u8 samples always fits in u8
    let [r, g, b] = totals.map(|total| (total / pixel_count) as u8);
    Some(Color::new(r, g, b))
}
