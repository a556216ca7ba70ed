//! I/O error types
//!
//! One error type covers everything that can go wrong while writing a GIF:
//! failures of the underlying writer, malformed caller input, and errors
//! bubbled up from the core and color crates.

use thiserror::Error;

/// Error type for GIF writing operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error from the underlying writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed caller input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A frame placed partly outside the logical screen
    #[error(
        "{width}x{height} frame at ({left}, {top}) does not fit in the \
         {screen_width}x{screen_height} screen"
    )]
    FrameOutOfBounds {
        left: u16,
        top: u16,
        width: usize,
        height: usize,
        screen_width: u16,
        screen_height: u16,
    },

    /// An error from the core library (e.g. a failed color table lookup)
    #[error("core error: {0}")]
    Core(#[from] gifweave_core::Error),

    /// An error from quantization or dithering
    #[error("color error: {0}")]
    Color(#[from] gifweave_color::ColorError),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
