//! Error type for building mosaics.
//!
//! [`MosaicError`] is returned before any processing starts: a build either
//! produces a complete mosaic or fails with one of these variants.

use std::fmt;

/// Reasons a mosaic build can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum MosaicError {
    /// Grid width is zero, negative, fractional or not finite.
    InvalidDimension {
        /// The rejected width as supplied by the caller
        width: f64,
    },
    /// The source image has no pixels.
    EmptySource {
        /// Source width in pixels
        width: u32,
        /// Source height in pixels
        height: u32,
    },
    /// The pixel buffer does not hold `width * height` entries.
    BufferMismatch {
        /// `width * height` of the declared source
        expected: usize,
        /// Length of the buffer actually passed
        actual: usize,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MosaicError::InvalidDimension { width } => {
                write!(
                    f,
                    "invalid grid width {}: must be a whole number of at least 1",
                    width
                )
            }
            MosaicError::EmptySource { width, height } => {
                write!(f, "source image is empty ({}x{})", width, height)
            }
            MosaicError::BufferMismatch { expected, actual } => {
                write!(
                    f,
                    "pixel buffer holds {} pixels, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {}
