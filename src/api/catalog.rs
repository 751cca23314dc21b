use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::models::CatalogPart;
use crate::services::Converter;

/// One color of the active palette
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteColorResponse {
    /// Display name
    pub name: String,
    /// `#RRGGBB`
    pub hex: String,
    /// Catalog color id
    pub catalog_id: u32,
    /// Catalog color name
    pub catalog_name: String,
}

/// Response from the /api/palette endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteResponse {
    /// Colors in matching order
    pub colors: Vec<PaletteColorResponse>,
}

/// One selectable catalog part
#[derive(Debug, Serialize, ToSchema)]
pub struct PartOption {
    /// Catalog part number
    pub id: CatalogPart,
    pub description: String,
}

/// Get the palette mosaics are built from
///
/// Order matters: between two equally close colors the earlier one wins.
#[utoipa::path(
    get,
    path = "/api/palette",
    responses(
        (status = 200, description = "Active palette", body = PaletteResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_palette(State(converter): State<Arc<Converter>>) -> Json<PaletteResponse> {
    let colors = converter
        .palette()
        .iter()
        .map(|c| PaletteColorResponse {
            name: c.name().to_string(),
            hex: c.hex().to_string(),
            catalog_id: c.catalog_id(),
            catalog_name: c.catalog_name().to_string(),
        })
        .collect();

    Json(PaletteResponse { colors })
}

/// List the catalog parts a mosaic can be exported with
#[utoipa::path(
    get,
    path = "/api/parts",
    responses(
        (status = 200, description = "Supported parts", body = [PartOption]),
    ),
    tag = "Catalog"
)]
pub async fn handle_parts() -> Json<Vec<PartOption>> {
    Json(
        CatalogPart::ALL
            .into_iter()
            .map(|id| PartOption {
                id,
                description: id.description().to_string(),
            })
            .collect(),
    )
}
