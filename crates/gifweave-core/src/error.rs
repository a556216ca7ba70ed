//! Error types for gifweave-core
//!
//! Two families of failure exist. Malformed caller input (ragged pixel
//! rows, a width that does not divide a flat buffer, a bad component index)
//! is reported as an invalid argument. Asking a color table for a color or
//! index it does not hold is a lookup failure; inside the encoding pipeline
//! that can only mean a quantizer or ditherer broke its contract, so callers
//! should treat it as a defect rather than something to recover from.

use crate::color::Color;
use thiserror::Error;

/// gifweave core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Generic invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Rows of a two-dimensional pixel array differ in length
    #[error("row {row} has {actual} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A flat pixel buffer cannot be split into rows of the given width
    #[error("width {width} does not divide the pixel count {len}")]
    WidthMismatch { width: usize, len: usize },

    /// Color component index outside 0..=2
    #[error("unexpected color component index: {0}")]
    ComponentIndex(usize),

    /// Color absent from a color table
    #[error("color not present in color table: {0:?}")]
    ColorNotFound(Color),

    /// Index outside a color table
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl Error {
    /// Whether this error is a failed color table lookup.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Error::ColorNotFound(_) | Error::IndexOutOfBounds { .. }
        )
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
