//! # Lithophane Errors
//!
//! Error types for height field construction, mesh generation and export.
//!
//! ## Error Policy
//!
//! - Invalid dimensions fail fast, nothing is clamped or repaired
//! - Sample values are not validated (garbage in, garbage out)

use thiserror::Error;

/// Errors that can occur while preparing or building a lithophane.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LithophaneError {
    /// Grid too small, or a thickness/size/layer height out of range.
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    /// Sample buffer length does not match `width * height`.
    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Pixel buffer does not match the declared image size.
    #[error("Invalid image: {message}")]
    InvalidImage { message: String },

    /// Export format name not recognised.
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Mesh cannot be written in the requested format.
    #[error("Export failed: {0}")]
    Export(String),

    /// Settings document could not be decoded.
    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl LithophaneError {
    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    /// Creates an invalid image error.
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }
}

/// Result type alias for lithophane operations.
pub type LithophaneResult<T> = Result<T, LithophaneError>;
