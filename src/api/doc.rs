use utoipa::OpenApi;

use super::*;
use crate::models::{CatalogLayout, CatalogPart, SessionSettings};
use crate::services::{CellDto, MosaicDto, PartDto};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brickify API",
        description = "Turn photos into brick mosaics with parts lists and build exports",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        handle_palette,
        handle_parts,
        handle_create_session,
        handle_get_session,
        handle_update_settings,
        handle_delete_session,
        handle_upload_image,
        handle_reset_image,
        handle_build_mosaic,
        handle_get_mosaic,
        handle_preview,
        handle_parts_csv,
        handle_instructions_pdf,
        handle_catalog_xml,
    ),
    components(schemas(
        PaletteResponse,
        PaletteColorResponse,
        PartOption,
        CreateSessionResponse,
        SessionResponse,
        SessionSettings,
        SettingsUpdate,
        ImageInfo,
        MosaicSummary,
        BuildResponse,
        MosaicDto,
        CellDto,
        PartDto,
        InstructionsRequest,
        CatalogPart,
        CatalogLayout,
    )),
    tags(
        (name = "Catalog", description = "Palette and part options"),
        (name = "Sessions", description = "Session lifecycle and image upload"),
        (name = "Mosaic", description = "Mosaic generation, preview and parts list"),
        (name = "Export", description = "Documents produced by the document backend")
    )
)]
pub struct ApiDoc;
