//! Output types of the conversion pipeline.
//!
//! - [`Mosaic`]: the grid of palette assignments
//! - [`PartsEntry`]: per-color brick counts, sorted by count
//! - [`Conversion`]: both of the above, always produced together

mod mosaic;
mod parts;

pub use mosaic::Mosaic;
pub use parts::{count_parts, PartsEntry};

pub(crate) use parts::Tally;

/// A mosaic together with the parts list computed from it.
///
/// The two are built in the same pass and never updated separately, so the
/// counts always add up to `mosaic.cell_count()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    mosaic: Mosaic,
    parts: Vec<PartsEntry>,
}

impl Conversion {
    pub(crate) fn new(mosaic: Mosaic, parts: Vec<PartsEntry>) -> Self {
        debug_assert_eq!(
            parts.iter().map(|p| p.count).sum::<usize>(),
            mosaic.cell_count()
        );
        Self { mosaic, parts }
    }

    #[inline]
    pub fn mosaic(&self) -> &Mosaic {
        &self.mosaic
    }

    /// Parts sorted by descending count, ties in first-seen order.
    #[inline]
    pub fn parts(&self) -> &[PartsEntry] {
        &self.parts
    }

    /// Total bricks needed.
    pub fn total_bricks(&self) -> usize {
        self.mosaic.cell_count()
    }

    pub fn into_parts(self) -> (Mosaic, Vec<PartsEntry>) {
        (self.mosaic, self.parts)
    }
}
