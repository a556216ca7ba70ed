//! Image - an immutable grid of colors
//!
//! Pixels are stored row-major. Constructors validate their input eagerly:
//! ragged rows, a width that does not divide a flat buffer, and empty
//! images are rejected before any pixel is converted.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::multiset::ColorMultiset;

/// An immutable, non-empty grid of pixel colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Image {
    /// Create an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either dimension is zero, the
    /// pixel count is not `width * height`, or that product overflows.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "image dimensions must be nonzero, got {width}x{height}"
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::InvalidArgument(format!("{width}x{height} image is too large"))
        })?;
        if pixels.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "{width}x{height} image needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image from rows of colors.
    pub fn from_colors(rows: Vec<Vec<Color>>) -> Result<Self> {
        let width = check_rows(rows.iter().map(Vec::len))?;
        let height = rows.len();
        Self::from_pixels(width, height, rows.into_iter().flatten().collect())
    }

    /// Create an image from rows of packed `0xRRGGBB` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRows`] if the rows differ in length.
    pub fn from_rgb_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let width = check_rows(rows.iter().map(|r| r.as_ref().len()))?;
        let pixels = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().map(|&rgb| Color::from_rgb_int(rgb)))
            .collect();
        Self::from_pixels(width, rows.len(), pixels)
    }

    /// Create an image from a flat buffer of packed `0xRRGGBB` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WidthMismatch`] if `width` is zero or does not
    /// divide the buffer length.
    pub fn from_rgb(rgb: &[u32], width: usize) -> Result<Self> {
        if width == 0 || !rgb.len().is_multiple_of(width) {
            return Err(Error::WidthMismatch {
                width,
                len: rgb.len(),
            });
        }
        let pixels = rgb.iter().map(|&p| Color::from_rgb_int(p)).collect();
        Self::from_pixels(width, rgb.len() / width, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.pixels.len()
    }

    /// Color at `(x, y)`, or `None` outside the image.
    pub fn color(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Color at a row-major pixel index, or `None` past the end.
    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The color population of this image, one occurrence per pixel.
    pub fn colors(&self) -> ColorMultiset {
        self.pixels.iter().copied().collect()
    }
}

/// Validate that all rows share one nonzero length and return it.
fn check_rows(mut lengths: impl Iterator<Item = usize>) -> Result<usize> {
    let width = lengths
        .next()
        .ok_or_else(|| Error::InvalidArgument("image has no rows".to_string()))?;
    for (i, len) in lengths.enumerate() {
        if len != width {
            return Err(Error::RaggedRows {
                row: i + 1,
                expected: width,
                actual: len,
            });
        }
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_rows() {
        let image = Image::from_rgb_rows(&[vec![0xff0000u32, 0x00ff00], vec![0x0000ff, 0x000000]])
            .unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.color(0, 0), Some(Color::RED));
        assert_eq!(image.color(1, 0), Some(Color::GREEN));
        assert_eq!(image.color(0, 1), Some(Color::BLUE));
        assert_eq!(image.color_at(3), Some(Color::BLACK));
        assert_eq!(image.color(2, 0), None);
    }

    #[test]
    fn test_ragged_rows() {
        let err = Image::from_rgb_rows(&[vec![0u32; 3], vec![0u32; 3], vec![0u32; 2]])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedRows {
                row: 2,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_from_rgb_flat() {
        let image = Image::from_rgb(&[0xffffff; 6], 3).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));

        assert!(matches!(
            Image::from_rgb(&[0; 7], 3),
            Err(Error::WidthMismatch { width: 3, len: 7 })
        ));
        assert!(Image::from_rgb(&[0; 4], 0).is_err());
        assert!(Image::from_rgb(&[], 4).is_err());
    }

    #[test]
    fn test_colors_population() {
        let image = Image::from_rgb(&[0xff0000, 0xff0000, 0x0000ff, 0xff0000], 2).unwrap();
        let colors = image.colors();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors.count(&Color::RED), 3);
        assert_eq!(colors.count(&Color::BLUE), 1);
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let err = Image::from_pixels(usize::MAX, 2, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = Image::from_pixels(2, usize::MAX / 2 + 1, vec![Color::BLACK; 4]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Image::from_colors(Vec::new()).is_err());
        assert!(Image::from_colors(vec![Vec::new()]).is_err());
    }
}
