//! Error types for gifweave-color

use thiserror::Error;

/// Errors that can occur during quantization and dithering
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] gifweave_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Dithering onto a palette with no colors
    #[error("cannot dither onto an empty palette")]
    EmptyPalette,
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
