//! The mosaic grid: one palette entry per cell.

use std::sync::Arc;

use crate::palette::{Palette, PaletteColor};

/// A grid of brick color assignments derived from one source image.
///
/// Cells are stored as palette indices in row-major order, together with the
/// shared [`Palette`] they index into, so every cell resolves to one of the
/// palette's entries.
///
/// # Example
///
/// ```
/// use brick_mosaic::{Mosaic, Palette};
///
/// let palette = Palette::builtin();
/// let mosaic = Mosaic::new(vec![0, 13], 2, 1, palette).unwrap();
///
/// assert_eq!(mosaic.cell(0, 0).name(), "Rood");
/// assert_eq!(mosaic.cell(1, 0).name(), "Zwart");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    cells: Vec<usize>,
    width: u32,
    height: u32,
    palette: Arc<Palette>,
}

impl Mosaic {
    /// Create a mosaic from palette indices.
    ///
    /// Returns `None` if either dimension is zero, if `cells` does not hold
    /// `width * height` entries, or if any index is outside the palette.
    pub fn new(cells: Vec<usize>, width: u32, height: u32, palette: Arc<Palette>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if cells.len() != width as usize * height as usize {
            return None;
        }
        if cells.iter().any(|&idx| idx >= palette.len()) {
            return None;
        }
        Some(Self {
            cells,
            width,
            height,
            palette,
        })
    }

    /// Construct without validation. Callers guarantee the invariants of [`Mosaic::new`].
    pub(crate) fn from_parts(
        cells: Vec<usize>,
        width: u32,
        height: u32,
        palette: Arc<Palette>,
    ) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        debug_assert!(cells.iter().all(|&idx| idx < palette.len()));
        Self {
            cells,
            width,
            height,
            palette,
        }
    }

    /// Cells across.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cells down.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The palette the cells index into.
    #[inline]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.cells
    }

    /// Palette index of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn index_at(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.cells[(y * self.width + x) as usize]
    }

    /// Color of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> &PaletteColor {
        self.palette.color(self.index_at(x, y))
    }

    /// Iterate rows top to bottom; each row yields its colors left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &PaletteColor> + '_> + '_ {
        self.cells
            .chunks(self.width as usize)
            .map(move |row| row.iter().map(move |&idx| self.palette.color(idx)))
    }

    /// Iterate all cells with their coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &PaletteColor)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &idx)| {
            let i = i as u32;
            (i % width, i / width, self.palette.color(idx))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_shape() {
        let palette = Palette::builtin();
        assert!(Mosaic::new(vec![0; 6], 3, 2, palette.clone()).is_some());
        assert!(Mosaic::new(vec![0; 5], 3, 2, palette.clone()).is_none());
        assert!(Mosaic::new(Vec::new(), 0, 0, palette.clone()).is_none());
    }

    #[test]
    fn test_new_rejects_foreign_index() {
        let palette = Palette::builtin();
        let out_of_range = palette.len();
        assert!(Mosaic::new(vec![0, out_of_range], 2, 1, palette).is_none());
    }

    #[test]
    fn test_rows_and_cells_are_row_major() {
        let palette = Palette::builtin();
        let mosaic = Mosaic::new(vec![0, 1, 2, 3, 4, 5], 3, 2, palette.clone()).unwrap();

        let rows: Vec<Vec<&str>> = mosaic
            .rows()
            .map(|row| row.map(|c| c.name()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["Rood", "Donkerrood", "Oranje"],
                vec!["Geel", "Limoen", "Groen"]
            ]
        );

        let coords: Vec<(u32, u32)> = mosaic.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(mosaic.cell(2, 1).name(), "Groen");
        assert_eq!(mosaic.index_at(1, 1), 4);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_cell_out_of_bounds_panics() {
        let mosaic = Mosaic::new(vec![0], 1, 1, Palette::builtin()).unwrap();
        let _ = mosaic.cell(1, 0);
    }
}
