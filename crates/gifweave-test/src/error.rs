//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to decode encoder output with a reference decoder
    #[error("reference decode failed: {message}")]
    Decode { message: String },

    /// Failed to write an output file
    #[error("failed to write '{path}': {message}")]
    Write { path: String, message: String },

    /// Building a synthetic image failed
    #[error("failed to build test image: {0}")]
    Image(#[from] gifweave_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
