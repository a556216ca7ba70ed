//! Dithering
//!
//! Maps an image onto a fixed palette. Every output pixel is a palette
//! color and the output has the input's dimensions.
//!
//! - Floyd-Steinberg error diffusion ([`FloydSteinbergDitherer`])
//! - Independent nearest color ([`NearestColorDitherer`])

use crate::{ColorError, ColorResult};
use gifweave_core::{Color, Image};

/// Map an image onto a palette.
pub trait Ditherer {
    /// Produce a copy of `image` that uses only colors from `palette`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::EmptyPalette`] if `palette` has no colors.
    fn dither(&self, image: &Image, palette: &[Color]) -> ColorResult<Image>;
}

/// Dithering strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DitherMethod {
    #[default]
    FloydSteinberg,
    NearestColor,
}

impl Ditherer for DitherMethod {
    fn dither(&self, image: &Image, palette: &[Color]) -> ColorResult<Image> {
        match self {
            DitherMethod::FloydSteinberg => FloydSteinbergDitherer.dither(image, palette),
            DitherMethod::NearestColor => NearestColorDitherer.dither(image, palette),
        }
    }
}

// =============================================================================
// Floyd-Steinberg
// =============================================================================

/// Error diffusion kernel as `(dx, dy, weight)`:
///
/// ```text
///        X   7
///    3   5   1
/// ```
const FLOYD_STEINBERG: [(isize, isize, f64); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Floyd-Steinberg error diffusion ditherer
///
/// Pixels are visited in row-major order. Each one is replaced by its
/// nearest palette color and the signed error is spread over the unvisited
/// neighbors in [`FLOYD_STEINBERG`]. Neighbors outside the image are
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinbergDitherer;

impl Ditherer for FloydSteinbergDitherer {
    fn dither(&self, image: &Image, palette: &[Color]) -> ColorResult<Image> {
        if palette.is_empty() {
            return Err(ColorError::EmptyPalette);
        }

        let width = image.width();
        let height = image.height();
        // Pixels with diffused error accumulated so far
        let mut working = image.pixels().to_vec();
        let mut output = Vec::with_capacity(working.len());

        for y in 0..height {
            for x in 0..width {
                let original = working[y * width + x];
                let chosen = nearest(&original, palette)?;
                output.push(chosen);

                let error = original - chosen;
                for &(dx, dy, weight) in &FLOYD_STEINBERG {
                    let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let neighbor = &mut working[ny * width + nx];
                    *neighbor = *neighbor + error * weight;
                }
            }
        }

        Ok(Image::from_pixels(width, height, output)?)
    }
}

// =============================================================================
// Nearest color
// =============================================================================

/// Replaces every pixel by its nearest palette color, independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestColorDitherer;

impl Ditherer for NearestColorDitherer {
    fn dither(&self, image: &Image, palette: &[Color]) -> ColorResult<Image> {
        if palette.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        let pixels = image
            .pixels()
            .iter()
            .map(|c| nearest(c, palette))
            .collect::<ColorResult<Vec<_>>>()?;
        Ok(Image::from_pixels(image.width(), image.height(), pixels)?)
    }
}

fn nearest(color: &Color, palette: &[Color]) -> ColorResult<Color> {
    color.nearest_in(palette).ok_or(ColorError::EmptyPalette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(v: f64) -> Color {
        Color::new(v, v, v)
    }

    fn row(values: &[f64]) -> Image {
        Image::from_colors(vec![values.iter().map(|&v| grey(v)).collect()]).unwrap()
    }

    #[test]
    fn test_nearest_color() {
        let image = row(&[0.1, 0.4, 0.6, 0.9]);
        let out = NearestColorDitherer
            .dither(&image, &[Color::BLACK, Color::WHITE])
            .unwrap();
        assert_eq!(
            out.pixels(),
            &[Color::BLACK, Color::BLACK, Color::WHITE, Color::WHITE]
        );
    }

    #[test]
    fn test_floyd_steinberg_diffuses_right() {
        // 0.4 -> black, carrying 7/16 * 0.4 = 0.175 onto the 0.4 to its right
        let image = row(&[0.4, 0.4, 0.4]);
        let out = FloydSteinbergDitherer
            .dither(&image, &[Color::BLACK, Color::WHITE])
            .unwrap();
        assert_eq!(out.pixels(), &[Color::BLACK, Color::WHITE, Color::BLACK]);
    }

    #[test]
    fn test_floyd_steinberg_mid_grey_checkerboard() {
        // Ties go to the first palette entry, so the first pixel is black
        let image = Image::from_pixels(4, 4, vec![grey(0.5); 16]).unwrap();
        let out = FloydSteinbergDitherer
            .dither(&image, &[Color::BLACK, Color::WHITE])
            .unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let expected = if (x + y) % 2 == 0 {
                    Color::BLACK
                } else {
                    Color::WHITE
                };
                assert_eq!(out.color(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_error_does_not_wrap_rows() {
        // Wrapping would carry 7/16 of the right edge error onto the start of
        // row 1 and push it past the midpoint.
        let image = Image::from_colors(vec![
            vec![grey(0.0), grey(0.45)],
            vec![grey(0.3), grey(0.0)],
        ])
        .unwrap();
        let out = FloydSteinbergDitherer
            .dither(&image, &[Color::BLACK, Color::WHITE])
            .unwrap();
        assert!(out.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_output_uses_only_palette() {
        let image = row(&[0.0, 0.2, 0.33, 0.5, 0.7, 0.99, 1.0]);
        let palette = [grey(0.0), grey(0.5), grey(1.0)];
        for method in [DitherMethod::FloydSteinberg, DitherMethod::NearestColor] {
            let out = method.dither(&image, &palette).unwrap();
            assert_eq!((out.width(), out.height()), (7, 1));
            assert!(out.pixels().iter().all(|c| palette.contains(c)));
        }
    }

    #[test]
    fn test_empty_palette_rejected() {
        let image = row(&[0.5]);
        for method in [DitherMethod::FloydSteinberg, DitherMethod::NearestColor] {
            assert!(matches!(
                method.dither(&image, &[]),
                Err(ColorError::EmptyPalette)
            ));
        }
    }
}
