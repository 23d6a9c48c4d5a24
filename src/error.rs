//! Error types for trueno-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-raster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Degenerate geometric input (negative radius, zero-length segment,
    /// polygon with fewer than three vertices, ...).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Unrecognized line algorithm name.
    #[error("unknown line algorithm '{0}' (expected one of dda, bresenham, midpoint, wu, gupta-sproull)")]
    UnknownAlgorithm(String),

    /// Invalid dimensions for framebuffer or viewport.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Data values that cannot be charted (negative, NaN, zero total).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Scale domain error (e.g., a viewport whose min equals its max).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidGeometry`].
    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry(message.into())
    }
}
