//! Parts report and document backend payloads.
//!
//! The JSON shapes here are shared by the HTTP API and the requests sent to
//! the document backend, so field names follow what the backend reads:
//! `bl_name` and `bricklink_color_id` for colors, camel case at the top level
//! of the instructions body.

use brick_mosaic::{Conversion, Mosaic, PaletteColor, PartsEntry};
use serde::Serialize;
use std::borrow::Cow;
use utoipa::ToSchema;

use crate::models::CatalogPart;

/// Header row of the parts CSV
pub const CSV_HEADER: &str = "color_name,color_hex,catalog_color_id,part_id,qty";

/// One parts list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PartDto {
    /// Display name of the color
    pub name: String,
    /// Catalog name of the color
    #[serde(rename = "bl_name")]
    pub catalog_name: String,
    /// `#RRGGBB`
    pub hex: String,
    /// Number of bricks
    pub count: usize,
    #[serde(rename = "bricklink_color_id")]
    pub catalog_color_id: u32,
}

impl From<&PartsEntry> for PartDto {
    fn from(entry: &PartsEntry) -> Self {
        Self {
            name: entry.color.name().to_string(),
            catalog_name: entry.color.catalog_name().to_string(),
            hex: entry.color.hex().to_string(),
            count: entry.count,
            catalog_color_id: entry.color.catalog_id(),
        }
    }
}

/// One mosaic cell, the full palette color it was matched to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CellDto {
    pub name: String,
    pub hex: String,
    #[serde(rename = "bricklink_color_id")]
    pub catalog_color_id: u32,
    #[serde(rename = "bl_name")]
    pub catalog_name: String,
}

impl From<&PaletteColor> for CellDto {
    fn from(color: &PaletteColor) -> Self {
        Self {
            name: color.name().to_string(),
            hex: color.hex().to_string(),
            catalog_color_id: color.catalog_id(),
            catalog_name: color.catalog_name().to_string(),
        }
    }
}

/// Full mosaic grid, `map[y][x]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MosaicDto {
    pub width: u32,
    pub height: u32,
    pub map: Vec<Vec<CellDto>>,
}

impl From<&Mosaic> for MosaicDto {
    fn from(mosaic: &Mosaic) -> Self {
        Self {
            width: mosaic.width(),
            height: mosaic.height(),
            map: mosaic
                .rows()
                .map(|row| row.map(CellDto::from).collect())
                .collect(),
        }
    }
}

/// Body of `POST /api/generate_pdf` on the document backend
#[derive(Debug, Clone, Serialize)]
pub struct InstructionsPayload {
    #[serde(rename = "legoMap")]
    pub mosaic: MosaicDto,
    #[serde(rename = "partsList")]
    pub parts: Vec<PartDto>,
    pub part_id: CatalogPart,
    #[serde(rename = "stepHeight")]
    pub step_height: u32,
}

/// Body of `POST /api/generate_bricklink_xml` on the document backend
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPayload {
    #[serde(rename = "partsList")]
    pub parts: Vec<PartDto>,
    pub part_id: CatalogPart,
}

pub fn parts_dto(parts: &[PartsEntry]) -> Vec<PartDto> {
    parts.iter().map(PartDto::from).collect()
}

pub fn instructions_payload(
    conversion: &Conversion,
    part: CatalogPart,
    step_height: u32,
) -> InstructionsPayload {
    InstructionsPayload {
        mosaic: MosaicDto::from(conversion.mosaic()),
        parts: parts_dto(conversion.parts()),
        part_id: part,
        step_height,
    }
}

pub fn catalog_payload(conversion: &Conversion, part: CatalogPart) -> CatalogPayload {
    CatalogPayload {
        parts: parts_dto(conversion.parts()),
        part_id: part,
    }
}

/// Render the parts list as CSV, one row per color in parts order.
pub fn parts_csv(parts: &[PartsEntry], part: CatalogPart) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + parts.len() * 40);
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for entry in parts {
        let color = &entry.color;
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(color.name()),
            csv_field(color.hex()),
            color.catalog_id(),
            part.id(),
            entry.count
        ));
    }
    csv
}

/// Quote a field when it holds a separator, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_mosaic::{MosaicBuilder, Palette, Rgb};
    use pretty_assertions::assert_eq;

    fn red_black() -> Conversion {
        MosaicBuilder::new(Palette::builtin())
            .width(2)
            .build(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 0)], 2, 1)
            .unwrap()
    }

    #[test]
    fn test_parts_csv() {
        let csv = parts_csv(red_black().parts(), CatalogPart::RoundPlate);
        assert_eq!(
            csv,
            "color_name,color_hex,catalog_color_id,part_id,qty\n\
             Rood,#C91A09,5,4073,1\n\
             Zwart,#000000,11,4073,1\n"
        );
    }

    #[test]
    fn test_parts_csv_empty() {
        assert_eq!(parts_csv(&[], CatalogPart::Tile), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_csv_quoting() {
        let palette = Palette::new(vec![PaletteColor::new(
            "Rood, \"donker\"",
            Rgb::new(158, 11, 15),
            59,
            "Dark Red",
        )])
        .unwrap();
        let conversion = MosaicBuilder::new(palette)
            .width(1)
            .build(&[Rgb::new(0, 0, 0)], 1, 1)
            .unwrap();

        let csv = parts_csv(conversion.parts(), CatalogPart::Tile);
        assert_eq!(
            csv.lines().nth(1),
            Some("\"Rood, \"\"donker\"\"\",#9E0B0F,59,3070b,1")
        );
    }

    #[test]
    fn test_instructions_payload_shape() {
        let payload = instructions_payload(&red_black(), CatalogPart::Plate, 8);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "legoMap": {
                    "width": 2,
                    "height": 1,
                    "map": [[
                        {"name": "Rood", "hex": "#C91A09", "bricklink_color_id": 5, "bl_name": "Red"},
                        {"name": "Zwart", "hex": "#000000", "bricklink_color_id": 11, "bl_name": "Black"}
                    ]]
                },
                "partsList": [
                    {"name": "Rood", "bl_name": "Red", "hex": "#C91A09", "count": 1, "bricklink_color_id": 5},
                    {"name": "Zwart", "bl_name": "Black", "hex": "#000000", "count": 1, "bricklink_color_id": 11}
                ],
                "part_id": "35381",
                "stepHeight": 8
            })
        );
    }

    #[test]
    fn test_catalog_payload_shape() {
        let payload = catalog_payload(&red_black(), CatalogPart::RoundPlate);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["part_id"], "4073");
        assert_eq!(json["partsList"].as_array().unwrap().len(), 2);
        assert_eq!(json["partsList"][0]["bl_name"], "Red");
        assert_eq!(json["partsList"][0]["bricklink_color_id"], 5);
        assert!(json.get("legoMap").is_none());
    }
}
