//! Palette of brick colors and nearest-color matching.
//!
//! A [`Palette`] is an ordered, validated list of [`PaletteColor`] entries.
//! Order matters: when two entries are equally close to a pixel the one
//! declared first is chosen, which keeps mosaics reproducible.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use super::error::{PaletteError, ParseColorError};
use crate::color::Rgb;

/// One brick color: a display name plus its catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteColor {
    name: String,
    hex: String,
    catalog_id: u32,
    catalog_name: String,
    rgb: Rgb,
}

impl PaletteColor {
    /// Create an entry from an already decoded color.
    pub fn new(
        name: impl Into<String>,
        rgb: Rgb,
        catalog_id: u32,
        catalog_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hex: rgb.to_hex(),
            catalog_id,
            catalog_name: catalog_name.into(),
            rgb,
        }
    }

    /// Create an entry from a hex color string (`#RRGGBB` or `#RGB`).
    ///
    /// ```
    /// use brick_mosaic::PaletteColor;
    ///
    /// let red = PaletteColor::parse("Rood", "#c91a09", 5, "Red").unwrap();
    /// assert_eq!(red.hex(), "#C91A09");
    /// ```
    pub fn parse(
        name: impl Into<String>,
        hex: &str,
        catalog_id: u32,
        catalog_name: impl Into<String>,
    ) -> Result<Self, ParseColorError> {
        let rgb: Rgb = hex.parse()?;
        Ok(Self::new(name, rgb, catalog_id, catalog_name))
    }

    /// Display label, unique within a palette.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized uppercase `#RRGGBB` string.
    #[inline]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Numeric color id in the parts catalog.
    #[inline]
    pub fn catalog_id(&self) -> u32 {
        self.catalog_id
    }

    /// Color name as the parts catalog spells it.
    #[inline]
    pub fn catalog_name(&self) -> &str {
        &self.catalog_name
    }

    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

/// Built-in brick palette: (display name, color, catalog id, catalog name).
const BRICK_COLORS: [(&str, Rgb, u32, &str); 17] = [
    ("Rood", Rgb::new(0xC9, 0x1A, 0x09), 5, "Red"),
    ("Donkerrood", Rgb::new(0x9E, 0x0B, 0x0F), 59, "Dark Red"),
    ("Oranje", Rgb::new(0xF0, 0x8E, 0x2B), 167, "Reddish Orange"),
    ("Geel", Rgb::new(0xF2, 0xCD, 0x37), 3, "Yellow"),
    ("Limoen", Rgb::new(0xC5, 0xE8, 0x6C), 35, "Light Lime"),
    ("Groen", Rgb::new(0x06, 0x7D, 0x3E), 1109, "Bright Green"),
    ("Donkergroen", Rgb::new(0x1F, 0x6F, 0x3D), 22598, "Dark Green"),
    ("Lichtblauw", Rgb::new(0x9A, 0xD0, 0xEC), 1147, "Bright Light Blue"),
    ("Blauw", Rgb::new(0x00, 0x55, 0xBF), 4, "Blue"),
    ("Donkerblauw", Rgb::new(0x0A, 0x3B, 0x7B), 109, "Dark Royal Blue"),
    ("Paars", Rgb::new(0x6A, 0x1B, 0x9A), 43, "Violet"),
    ("Roze", Rgb::new(0xFF, 0x8D, 0xAA), 9187, "Bright Pink"),
    ("Bruin", Rgb::new(0x6B, 0x4C, 0x3B), 8019, "Brown"),
    ("Zwart", Rgb::new(0x00, 0x00, 0x00), 11, "Black"),
    ("Donkergrijs", Rgb::new(0x6D, 0x6E, 0x70), 10, "Dark Gray"),
    ("Lichtgrijs", Rgb::new(0x9E, 0xA3, 0xA8), 49, "Light Gray"),
    ("Wit", Rgb::new(0xFF, 0xFF, 0xFF), 1, "White"),
];

/// An ordered, immutable set of brick colors.
///
/// Constructed once (from the built-in table or from configuration) and then
/// shared read-only. There is no way to add, remove or reorder entries after
/// construction.
///
/// # Example
///
/// ```
/// use brick_mosaic::{Palette, PaletteColor, Rgb};
///
/// let palette = Palette::new(vec![
///     PaletteColor::new("Zwart", Rgb::new(0, 0, 0), 11, "Black"),
///     PaletteColor::new("Wit", Rgb::new(255, 255, 255), 1, "White"),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.nearest(Rgb::new(30, 30, 30)).name(), "Zwart");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Palette {
    /// Create a palette from an ordered list of colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateName`] if two entries share a name
    pub fn new(colors: Vec<PaletteColor>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(color.name.as_str()) {
                return Err(PaletteError::DuplicateName {
                    index,
                    name: color.name.clone(),
                });
            }
        }

        Ok(Self { colors })
    }

    /// Create a palette from `(name, hex, catalog_id, catalog_name)` tuples.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first entry whose hex
    /// string does not parse, otherwise the same errors as [`Palette::new`].
    pub fn from_hex<'a, I>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, u32, &'a str)>,
    {
        let colors = entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, hex, catalog_id, catalog_name))| {
                PaletteColor::parse(name, hex, catalog_id, catalog_name)
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// The built-in 17-color brick palette.
    ///
    /// Initialized on first use and shared for the life of the process.
    pub fn builtin() -> Arc<Palette> {
        static BUILTIN: OnceLock<Arc<Palette>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let colors = BRICK_COLORS
                    .iter()
                    .map(|&(name, rgb, id, catalog_name)| {
                        PaletteColor::new(name, rgb, id, catalog_name)
                    })
                    .collect();
                Arc::new(Palette { colors })
            })
            .clone()
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the entry at `idx`, if any.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&PaletteColor> {
        self.colors.get(idx)
    }

    /// Get the entry at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`. Indices produced by
    /// [`nearest_index`](Self::nearest_index) are always in range.
    #[inline]
    pub fn color(&self, idx: usize) -> &PaletteColor {
        &self.colors[idx]
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteColor> {
        self.colors.iter()
    }

    /// All entries in declaration order.
    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// Index of the entry with the given display name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.colors.iter().position(|c| c.name == name)
    }

    /// Index of the palette entry closest to `rgb`.
    ///
    /// Uses squared Euclidean distance in RGB. The scan keeps the first
    /// minimum it meets (strict `<`), so on an exact tie the entry declared
    /// earlier wins.
    #[inline]
    pub fn nearest_index(&self, rgb: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, color) in self.colors.iter().enumerate() {
            let dist = rgb.distance_squared(color.rgb);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    /// The palette entry closest to `rgb`. See [`nearest_index`](Self::nearest_index).
    #[inline]
    pub fn nearest(&self, rgb: Rgb) -> &PaletteColor {
        &self.colors[self.nearest_index(rgb)]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteColor;
    type IntoIter = std::slice::Iter<'a, PaletteColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bw_palette() -> Palette {
        Palette::new(vec![
            PaletteColor::new("Zwart", Rgb::new(0, 0, 0), 11, "Black"),
            PaletteColor::new("Wit", Rgb::new(255, 255, 255), 1, "White"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = Palette::new(vec![
            PaletteColor::new("Rood", Rgb::new(201, 26, 9), 5, "Red"),
            PaletteColor::new("Rood", Rgb::new(158, 11, 15), 59, "Dark Red"),
        ]);
        assert!(matches!(
            result,
            Err(PaletteError::DuplicateName { index: 1, .. })
        ));
    }

    #[test]
    fn test_from_hex_reports_bad_entry() {
        let result = Palette::from_hex([
            ("Zwart", "#000000", 11, "Black"),
            ("Kapot", "#12345", 0, "Broken"),
        ]);
        assert!(matches!(
            result,
            Err(PaletteError::ParseColor { index: 1, .. })
        ));
    }

    #[test]
    fn test_from_hex_normalizes() {
        let palette = Palette::from_hex([("Wit", "fff", 1, "White")]).unwrap();
        assert_eq!(palette.color(0).hex(), "#FFFFFF");
        assert_eq!(palette.color(0).rgb(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_builtin_palette() {
        let palette = Palette::builtin();
        assert_eq!(palette.len(), 17);
        assert_eq!(palette.color(0).name(), "Rood");
        assert_eq!(palette.color(0).hex(), "#C91A09");
        assert_eq!(palette.color(0).catalog_id(), 5);
        assert_eq!(palette.color(16).catalog_name(), "White");

        // Construction through the validating path must accept it too
        assert!(Palette::new(palette.colors().to_vec()).is_ok());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = Palette::builtin();
        let b = Palette::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = Palette::builtin();
        for (i, color) in palette.iter().enumerate() {
            assert_eq!(palette.nearest_index(color.rgb()), i, "{}", color.name());
        }
    }

    #[test]
    fn test_nearest_red_and_black() {
        let palette = Palette::builtin();
        assert_eq!(palette.nearest(Rgb::new(255, 0, 0)).hex(), "#C91A09");
        assert_eq!(palette.nearest(Rgb::new(0, 0, 0)).hex(), "#000000");
    }

    #[test]
    fn test_nearest_tie_goes_to_first_declared() {
        let palette = bw_palette();
        let tied = Palette::new(vec![
            PaletteColor::new("A", Rgb::new(0, 0, 0), 1, "A"),
            PaletteColor::new("B", Rgb::new(2, 0, 0), 2, "B"),
        ])
        .unwrap();
        for _ in 0..10 {
            assert_eq!(tied.nearest(Rgb::new(1, 0, 0)).name(), "A");
        }

        let reversed = Palette::new(vec![
            PaletteColor::new("B", Rgb::new(2, 0, 0), 2, "B"),
            PaletteColor::new("A", Rgb::new(0, 0, 0), 1, "A"),
        ])
        .unwrap();
        assert_eq!(reversed.nearest(Rgb::new(1, 0, 0)).name(), "B");

        assert_eq!(palette.nearest(Rgb::new(100, 100, 100)).name(), "Zwart");
        assert_eq!(palette.nearest(Rgb::new(200, 200, 200)).name(), "Wit");
    }

    #[test]
    fn test_position() {
        let palette = bw_palette();
        assert_eq!(palette.position("Wit"), Some(1));
        assert_eq!(palette.position("Rood"), None);
    }
}
