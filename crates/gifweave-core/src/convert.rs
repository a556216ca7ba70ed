//! Conversions from `image` crate buffers
//!
//! Enabled by the `image` feature. Alpha is discarded; GIF frames written
//! by this crate are always opaque.

use crate::color::Color;
use crate::error::Result;
use crate::image::Image;
use ::image::{DynamicImage, RgbImage, RgbaImage};

impl Image {
    /// Convert an 8-bit RGB buffer.
    pub fn from_rgb_image(img: &RgbImage) -> Result<Self> {
        let pixels = img
            .pixels()
            .map(|p| Color::from_rgb8(p.0[0], p.0[1], p.0[2]))
            .collect();
        Self::from_pixels(img.width() as usize, img.height() as usize, pixels)
    }

    /// Convert an 8-bit RGBA buffer, dropping alpha.
    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self> {
        let pixels = img
            .pixels()
            .map(|p| Color::from_rgb8(p.0[0], p.0[1], p.0[2]))
            .collect();
        Self::from_pixels(img.width() as usize, img.height() as usize, pixels)
    }

    /// Convert any decoded image through its 8-bit RGB form.
    pub fn from_dynamic_image(img: &DynamicImage) -> Result<Self> {
        Self::from_rgb_image(&img.to_rgb8())
    }
}

impl TryFrom<&RgbImage> for Image {
    type Error = crate::error::Error;

    fn try_from(img: &RgbImage) -> Result<Self> {
        Self::from_rgb_image(img)
    }
}
