use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Catalog part a mosaic is built from.
///
/// Only used as a label in exports; the geometry of every part is one stud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum CatalogPart {
    /// 1x1 round plate
    #[default]
    #[serde(rename = "4073")]
    RoundPlate,
    /// 1x1 tile
    #[serde(rename = "3070b")]
    Tile,
    /// 1x1 plate (newer mould)
    #[serde(rename = "35381")]
    Plate,
}

impl CatalogPart {
    pub const ALL: [CatalogPart; 3] = [CatalogPart::RoundPlate, CatalogPart::Tile, CatalogPart::Plate];

    /// Catalog part number.
    pub fn id(self) -> &'static str {
        match self {
            CatalogPart::RoundPlate => "4073",
            CatalogPart::Tile => "3070b",
            CatalogPart::Plate => "35381",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CatalogPart::RoundPlate => "1x1 round plate",
            CatalogPart::Tile => "1x1 tile",
            CatalogPart::Plate => "1x1 plate",
        }
    }

    /// XML layout the catalog backend uses for this part.
    pub fn layout(self) -> CatalogLayout {
        match self {
            CatalogPart::RoundPlate => CatalogLayout::Round,
            CatalogPart::Tile | CatalogPart::Plate => CatalogLayout::Tile,
        }
    }
}

impl fmt::Display for CatalogPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CatalogPart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown part '{s}' (expected one of 4073, 3070b, 35381)")
            })
    }
}

/// Layout variant of the catalog XML export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CatalogLayout {
    #[default]
    Round,
    Tile,
}

impl CatalogLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogLayout::Round => "round",
            CatalogLayout::Tile => "tile",
        }
    }
}

impl fmt::Display for CatalogLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
