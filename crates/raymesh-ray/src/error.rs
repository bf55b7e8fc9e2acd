//! Error types for ray construction.

use raymesh_math::MathError;
use thiserror::Error;

/// Errors that can occur while building or clipping rays.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RayError {
    /// Direction vector has no length.
    #[error("degenerate direction: {0}")]
    Degenerate(#[from] MathError),

    /// Origin and destination coincide for one pair of a batch.
    #[error("degenerate ray at batch index {index}: {source}")]
    DegenerateInBatch {
        /// Index of the offending origin/destination pair.
        index: usize,
        /// Underlying math error.
        source: MathError,
    },

    /// Origin and destination batches differ in length.
    #[error("got {origins} origins but {destinations} destinations")]
    LengthMismatch {
        /// Number of origins.
        origins: usize,
        /// Number of destinations.
        destinations: usize,
    },

    /// Clipping bound is not a positive finite number.
    #[error("bound must be positive and finite, got {0}")]
    InvalidBound(f64),

    /// Invalid ray settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for ray operations.
pub type Result<T> = std::result::Result<T, RayError>;
