//! Public API for the brick-mosaic crate.
//!
//! This module provides the high-level API: [`MosaicBuilder`] and the
//! [`MosaicError`] it returns.

mod builder;
mod error;

pub use builder::{MosaicBuilder, DEFAULT_GRID_WIDTH};
pub use error::MosaicError;
