pub mod converter;
pub mod export_client;
pub mod exporter;
pub mod image_loader;
pub mod renderer;
pub mod session_store;

pub use converter::Converter;
pub use export_client::{ExportClient, ExportedDocument};
pub use exporter::{CatalogPayload, CellDto, InstructionsPayload, MosaicDto, PartDto};
pub use image_loader::{decode_image, load_image_file};
pub use renderer::RenderService;
pub use session_store::{InMemorySessionStore, SessionStore};
