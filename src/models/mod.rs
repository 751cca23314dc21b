pub mod config;
pub mod part;
pub mod session;

pub use config::{AppConfig, DefaultsConfig, ExportConfig, LimitsConfig, PaletteEntryConfig};
pub use part::{CatalogLayout, CatalogPart};
pub use session::{Session, SessionId, SessionSettings, SourceImage};
