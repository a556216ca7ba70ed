//! ColorTable - bidirectional map between colors and palette indices
//!
//! A color table assigns the dense indices `0..len` to a set of colors,
//! in the order the colors are first seen. The GIF format can only express
//! tables whose size is a power of two of at least 2 (the size field is
//! stored as `n` with `2^(n + 1)` entries), so the table also knows its
//! padded size and the matching size field.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::image::Image;
use std::collections::HashMap;

/// Smallest table size the GIF format can express
pub const MIN_PADDED_SIZE: usize = 2;

/// Round `len` up to the padded size the GIF format can express.
///
/// Sizes become the next power of two, with 0 and 1 both padded to 2.
pub fn padded_size(len: usize) -> usize {
    len.next_power_of_two().max(MIN_PADDED_SIZE)
}

/// The "size of color table" field for a table with `padded_len` entries.
///
/// This is the smallest `n` such that `2^(n + 1) >= padded_len`.
pub fn size_field(padded_len: usize) -> u8 {
    let mut field = 0u8;
    while (1usize << (field + 1)) < padded_len {
        field += 1;
    }
    field
}

/// A frame's color table.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: Vec<Color>,
    indices: HashMap<Color, usize>,
}

impl ColorTable {
    /// Build a table from a set of colors. Duplicates keep their first index.
    pub fn from_colors<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        let mut table = Self::default();
        for color in colors {
            if !table.indices.contains_key(&color) {
                table.indices.insert(color, table.colors.len());
                table.colors.push(color);
            }
        }
        table
    }

    /// Number of distinct colors in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Padded size, see [`padded_size`].
    pub fn padded_len(&self) -> usize {
        padded_size(self.len())
    }

    /// The image descriptor's color table size field.
    pub fn size_field(&self) -> u8 {
        size_field(self.padded_len())
    }

    /// Colors in index order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Index of `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColorNotFound`] if the color is not in the table.
    pub fn index_of(&self, color: &Color) -> Result<usize> {
        self.indices
            .get(color)
            .copied()
            .ok_or(Error::ColorNotFound(*color))
    }

    /// Color stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the last color.
    pub fn color_of(&self, index: usize) -> Result<Color> {
        self.colors
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.colors.len(),
            })
    }

    /// Palette index of every pixel of `image`, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColorNotFound`] for the first pixel whose color the
    /// table does not hold.
    pub fn indices_for(&self, image: &Image) -> Result<Vec<usize>> {
        image.pixels().iter().map(|c| self.index_of(c)).collect()
    }

    /// The table as packed RGB triples, zero-filled up to the padded size.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let padded = self.padded_len();
        let mut bytes = Vec::with_capacity(padded * 3);
        for color in &self.colors {
            let (r, g, b) = color.to_rgb8();
            bytes.extend_from_slice(&[r, g, b]);
        }
        bytes.resize(padded * 3, 0);
        bytes
    }
}
