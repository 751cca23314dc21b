//! MosaicBuilder -- the primary entry point for the crate.
//!
//! [`MosaicBuilder`] runs the whole conversion: downsample the source, match
//! each cell to the palette, and count the parts.

use std::sync::Arc;

use super::MosaicError;
use crate::color::Rgb;
use crate::mosaic::{Conversion, Mosaic, Tally};
use crate::palette::Palette;
use crate::preprocess::downsample;

/// Default number of bricks across.
pub const DEFAULT_GRID_WIDTH: u32 = 48;

/// High-level mosaic builder.
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`build()`](Self::build) takes `&self`, so one builder can convert any
///   number of images
///
/// # Example
///
/// ```
/// use brick_mosaic::{MosaicBuilder, Palette, Rgb};
///
/// let builder = MosaicBuilder::new(Palette::builtin()).width(2);
///
/// let pixels = [Rgb::new(255, 0, 0), Rgb::new(0, 0, 0)];
/// let conversion = builder.build(&pixels, 2, 1).unwrap();
///
/// assert_eq!(conversion.mosaic().cell(0, 0).hex(), "#C91A09");
/// assert_eq!(conversion.mosaic().cell(1, 0).hex(), "#000000");
/// assert_eq!(conversion.parts().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MosaicBuilder {
    palette: Arc<Palette>,
    width: u32,
}

impl MosaicBuilder {
    /// Create a builder for the given palette with the default grid width.
    pub fn new(palette: impl Into<Arc<Palette>>) -> Self {
        Self {
            palette: palette.into(),
            width: DEFAULT_GRID_WIDTH,
        }
    }

    /// Set the grid width in bricks. Validated by [`build()`](Self::build).
    #[inline]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// The palette cells are matched against.
    #[inline]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Grid width the next build will use.
    #[inline]
    pub fn grid_width(&self) -> u32 {
        self.width
    }

    /// Convert `pixels` (row-major, `source_width * source_height`) into a
    /// mosaic and its parts list.
    ///
    /// Cells are matched in row-major order and counted as they go; the parts
    /// list is sorted by descending count with ties in first-seen order.
    /// Building the same input twice gives identical results.
    ///
    /// # Errors
    ///
    /// Fails before any processing with [`MosaicError::InvalidDimension`]
    /// for a zero width, [`MosaicError::EmptySource`] for an empty image and
    /// [`MosaicError::BufferMismatch`] for a short or long buffer.
    pub fn build(
        &self,
        pixels: &[Rgb],
        source_width: u32,
        source_height: u32,
    ) -> Result<Conversion, MosaicError> {
        let grid = downsample(pixels, source_width, source_height, self.width)?;

        let mut tally = Tally::new(self.palette.len());
        let cells: Vec<usize> = grid
            .pixels
            .iter()
            .map(|&rgb| {
                let idx = self.palette.nearest_index(rgb);
                tally.add(idx);
                idx
            })
            .collect();

        let parts = tally.into_entries(&self.palette);
        let mosaic = Mosaic::from_parts(cells, grid.width, grid.height, self.palette.clone());

        Ok(Conversion::new(mosaic, parts))
    }
}
