//! brick-mosaic: turn photos into brick mosaics
//!
//! This library converts raster pixels into a grid of brick colors drawn
//! from a fixed palette, and counts how many bricks of each color the grid
//! needs.
//!
//! # Quick Start
//!
//! The [`MosaicBuilder`] is the primary entry point:
//!
//! ```
//! use brick_mosaic::{MosaicBuilder, Palette, Rgb};
//!
//! let builder = MosaicBuilder::new(Palette::builtin()).width(4);
//! let pixels = vec![Rgb::new(200, 30, 10); 8 * 6];
//!
//! let conversion = builder.build(&pixels, 8, 6).unwrap();
//! assert_eq!(conversion.mosaic().width(), 4);
//! assert_eq!(conversion.mosaic().height(), 3);
//! assert_eq!(conversion.parts()[0].color.name(), "Rood");
//! assert_eq!(conversion.parts()[0].count, 12);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source pixels (row-major Rgb)
//!     |
//!     v
//! downsample()            area-averaging box filter to width x derived height
//!     |
//!     v
//! Palette::nearest_index  squared RGB distance, first declared wins ties
//!     |                   (applied per cell, row-major)
//!     v
//! Mosaic + Vec<PartsEntry>
//! ```
//!
//! Matching is deliberately plain Euclidean distance in RGB: brick palettes
//! are small and physical, and the same rule must give the same mosaic on
//! every run.
//!
//! # Palettes
//!
//! [`Palette::builtin()`] is the standard 17-color palette. Custom palettes
//! are built with [`Palette::new`] or [`Palette::from_hex`] and are immutable
//! once constructed.

pub mod api;
pub mod color;
pub mod mosaic;
pub mod palette;
pub mod preprocess;


pub use api::{MosaicBuilder, MosaicError, DEFAULT_GRID_WIDTH};
pub use color::Rgb;
pub use mosaic::{count_parts, Conversion, Mosaic, PartsEntry};
pub use palette::{Palette, PaletteColor, PaletteError, ParseColorError};
pub use preprocess::{derived_height, downsample, validate_grid_width, RgbGrid};
