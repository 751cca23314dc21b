//! Downsampling of source images to the brick grid.
//!
//! The source is reduced to exactly `target_width` cells across, with the
//! height derived from the source aspect ratio:
//!
//! ```text
//! height = max(1, round(target_width * source_height / source_width))
//! ```
//!
//! Reduction uses an area-averaging box filter, so fine detail blends into
//! the cell color instead of aliasing as it would with point sampling.
//!
//! # Example
//!
//! ```
//! use brick_mosaic::{downsample, Rgb};
//!
//! let pixels = vec![Rgb::new(255, 0, 0); 40 * 20];
//! let grid = downsample(&pixels, 40, 20, 10).unwrap();
//!
//! assert_eq!(grid.width, 10);
//! assert_eq!(grid.height, 5);
//! assert_eq!(grid.pixels.len(), 50);
//! ```

mod resize;

use crate::api::MosaicError;
use crate::color::Rgb;

/// A grid of downsampled cell colors, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbGrid {
    /// Cells across
    pub width: u32,
    /// Cells down
    pub height: u32,
    /// `width * height` colors in row-major order
    pub pixels: Vec<Rgb>,
}

impl RgbGrid {
    /// Color of the cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Grid height for a source of `source_width x source_height` reduced to
/// `target_width` cells across. Never less than 1.
///
/// ```
/// use brick_mosaic::derived_height;
///
/// assert_eq!(derived_height(4000, 3000, 48), 36);
/// assert_eq!(derived_height(1000, 1, 12), 1);
/// ```
pub fn derived_height(source_width: u32, source_height: u32, target_width: u32) -> u32 {
    let height =
        (target_width as f64 * source_height as f64 / source_width as f64).round();
    height.max(1.0) as u32
}

/// Check a grid width that arrived as an arbitrary number.
///
/// Accepts finite whole numbers of at least 1 that fit in a `u32`.
///
/// # Errors
///
/// Returns [`MosaicError::InvalidDimension`] otherwise.
pub fn validate_grid_width(width: f64) -> Result<u32, MosaicError> {
    if width.is_finite() && width >= 1.0 && width.fract() == 0.0 && width <= u32::MAX as f64 {
        Ok(width as u32)
    } else {
        Err(MosaicError::InvalidDimension { width })
    }
}

/// Reduce `pixels` (row-major, `source_width * source_height`) to a grid
/// `target_width` cells across.
///
/// # Errors
///
/// - [`MosaicError::InvalidDimension`] if `target_width` is 0
/// - [`MosaicError::EmptySource`] if the source has no pixels
/// - [`MosaicError::BufferMismatch`] if `pixels` has the wrong length
pub fn downsample(
    pixels: &[Rgb],
    source_width: u32,
    source_height: u32,
    target_width: u32,
) -> Result<RgbGrid, MosaicError> {
    if target_width == 0 {
        return Err(MosaicError::InvalidDimension { width: 0.0 });
    }
    if source_width == 0 || source_height == 0 {
        return Err(MosaicError::EmptySource {
            width: source_width,
            height: source_height,
        });
    }
    let expected = source_width as usize * source_height as usize;
    if pixels.len() != expected {
        return Err(MosaicError::BufferMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let height = derived_height(source_width, source_height, target_width);
    let pixels = resize::resize_area(pixels, source_width, source_height, target_width, height);

    Ok(RgbGrid {
        width: target_width,
        height,
        pixels,
    })
}
