//! Palette types and utilities
//!
//! This module provides the ordered brick color palette, nearest-color
//! matching, and error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteColor};
