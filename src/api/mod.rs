pub mod catalog;
pub mod doc;
pub mod export;
pub mod mosaic;
pub mod sessions;

pub use catalog::{handle_palette, handle_parts, PaletteColorResponse, PaletteResponse, PartOption};
pub use catalog::{__path_handle_palette, __path_handle_parts};
pub use export::{handle_catalog_xml, handle_instructions_pdf, InstructionsRequest};
pub use export::{__path_handle_catalog_xml, __path_handle_instructions_pdf};
pub use mosaic::{handle_build_mosaic, handle_get_mosaic, handle_parts_csv, handle_preview, BuildResponse};
pub use mosaic::{
    __path_handle_build_mosaic, __path_handle_get_mosaic, __path_handle_parts_csv,
    __path_handle_preview,
};
pub use sessions::{
    handle_create_session, handle_delete_session, handle_get_session, handle_reset_image,
    handle_update_settings, handle_upload_image, CreateSessionResponse, ImageInfo, MosaicSummary,
    SessionResponse, SettingsUpdate,
};
pub use sessions::{
    __path_handle_create_session, __path_handle_delete_session, __path_handle_get_session,
    __path_handle_reset_image, __path_handle_update_settings, __path_handle_upload_image,
};
pub use doc::ApiDoc;
