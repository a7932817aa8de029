//! Error types for mobius.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MobiusError`].
pub type Result<T> = std::result::Result<T, MobiusError>;

/// Errors that can occur while building, measuring, or exporting a strip.
#[derive(Error, Debug)]
pub enum MobiusError {
    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// Adaptive quadrature did not reach the requested tolerance.
    #[error(
        "numerical integration failed to converge after {subdivisions} subdivisions \
         (estimate {value}, error estimate {error:e})"
    )]
    IntegrationFailed {
        /// Best estimate of the integral when the budget ran out.
        value: f64,
        /// Absolute error estimate of that value.
        error: f64,
        /// Number of interval subdivisions performed.
        subdivisions: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error saving a mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Rendering or image encoding failed.
    #[error("render failed: {0}")]
    Render(String),
}

impl MobiusError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MobiusError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Returns `true` for [`MobiusError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, MobiusError::InvalidParameter { .. })
    }

    /// Returns `true` for [`MobiusError::IntegrationFailed`].
    pub fn is_integration_failure(&self) -> bool {
        matches!(self, MobiusError::IntegrationFailed { .. })
    }
}

impl From<image::ImageError> for MobiusError {
    fn from(e: image::ImageError) -> Self {
        MobiusError::Render(e.to_string())
    }
}
