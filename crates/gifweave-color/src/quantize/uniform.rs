//! Uniform grid quantization
//!
//! Splits the RGB cube into an evenly spaced grid and emits one color per
//! grid point, ignoring the population entirely.

use super::{ColorQuantizer, check_max_colors};
use crate::ColorResult;
use gifweave_core::{Color, ColorMultiset};

/// Uniform grid quantizer
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformQuantizer;

impl UniformQuantizer {
    /// Segments per axis as `(red, green, blue)` for a palette of at most
    /// `max_colors` entries.
    ///
    /// Every axis gets the integer cube root; leftover room goes to one
    /// extra green segment, then one extra red segment.
    pub fn segments(max_colors: usize) -> (usize, usize, usize) {
        let base = integer_cbrt(max_colors);
        let (mut red, mut green, blue) = (base, base, base);
        if red * (green + 1) * blue <= max_colors {
            green += 1;
        }
        if (red + 1) * green * blue <= max_colors {
            red += 1;
        }
        (red, green, blue)
    }
}

impl ColorQuantizer for UniformQuantizer {
    fn quantize(&self, _population: &ColorMultiset, max_colors: usize) -> ColorResult<Vec<Color>> {
        check_max_colors(max_colors)?;

        let (red, green, blue) = Self::segments(max_colors);
        let mut colors = Vec::with_capacity(red * green * blue);
        for r in 0..red {
            for g in 0..green {
                for b in 0..blue {
                    colors.push(Color::new(
                        grid_coordinate(r, red),
                        grid_coordinate(g, green),
                        grid_coordinate(b, blue),
                    ));
                }
            }
        }
        Ok(colors)
    }
}

/// Position of segment `i` of `n` on `[0, 1]`; a lone segment sits in the middle.
fn grid_coordinate(i: usize, n: usize) -> f64 {
    if n < 2 {
        0.5
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Largest `c` with `c^3 <= n`.
fn integer_cbrt(n: usize) -> usize {
    let mut c = (n as f64).cbrt() as usize;
    while (c + 1).pow(3) <= n {
        c += 1;
    }
    while c > 0 && c.pow(3) > n {
        c -= 1;
    }
    c
}
