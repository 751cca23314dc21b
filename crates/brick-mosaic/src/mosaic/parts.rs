//! Parts list: how many bricks of each color a mosaic needs.

use crate::palette::{Palette, PaletteColor};

/// Brick count for one color of a mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsEntry {
    /// Index of the color in the mosaic's palette
    pub index: usize,
    /// The color itself
    pub color: PaletteColor,
    /// Number of cells with this color, always at least 1
    pub count: usize,
}

/// Frequency table keyed by palette index that remembers first-seen order.
///
/// Counts live in a dense array (palettes are small); `order` records each
/// index the first time it is counted so ties can be broken by encounter
/// order rather than by palette or alphabetical order.
#[derive(Debug, Clone)]
pub(crate) struct Tally {
    counts: Vec<usize>,
    order: Vec<usize>,
}

impl Tally {
    pub(crate) fn new(palette_len: usize) -> Self {
        Self {
            counts: vec![0; palette_len],
            order: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, idx: usize) {
        if self.counts[idx] == 0 {
            self.order.push(idx);
        }
        self.counts[idx] += 1;
    }

    /// Entries sorted by descending count; equal counts keep first-seen order.
    pub(crate) fn into_entries(self, palette: &Palette) -> Vec<PartsEntry> {
        let mut entries: Vec<PartsEntry> = self
            .order
            .iter()
            .map(|&idx| PartsEntry {
                index: idx,
                color: palette.color(idx).clone(),
                count: self.counts[idx],
            })
            .collect();
        // sort_by is stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Count the bricks in a sequence of palette indices (row-major order).
pub fn count_parts(indices: &[usize], palette: &Palette) -> Vec<PartsEntry> {
    let mut tally = Tally::new(palette.len());
    for &idx in indices {
        tally.add(idx);
    }
    tally.into_entries(palette)
}
