use crate::assets::AssetLoader;
use crate::models::CatalogPart;
use brick_mosaic::{Palette, PaletteColor, PaletteError};
use serde::Deserialize;
use std::sync::Arc;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Settings new sessions start with
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Bounds on client-supplied values
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Document backend and output options
    #[serde(default)]
    pub export: ExportConfig,

    /// Replacement for the built-in palette
    #[serde(default)]
    pub palette: Option<Vec<PaletteEntryConfig>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub grid_width: u32,
    pub cell_size: u32,
    pub part: CatalogPart,
    pub step_height: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            grid_width: brick_mosaic::DEFAULT_GRID_WIDTH,
            cell_size: 12,
            part: CatalogPart::default(),
            step_height: 8,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_grid_width: u32,
    /// Bricks per mosaic; bounds tall sources at a legal width
    pub max_grid_cells: u64,
    pub max_cell_size: u32,
    /// Pixels per rendered preview
    pub max_preview_pixels: u64,
    pub max_upload_bytes: usize,
    /// Live sessions; the least recently updated one is evicted beyond this
    pub max_sessions: usize,
    /// Sessions untouched for this long are dropped
    pub session_idle_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_grid_width: 400,
            max_grid_cells: 250_000,
            max_cell_size: 64,
            max_preview_pixels: 64_000_000,
            max_upload_bytes: 20 * 1024 * 1024,
            max_sessions: 256,
            session_idle_secs: 6 * 60 * 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Base URL of the document backend
    pub backend_url: String,
    pub timeout_secs: u64,
    /// Recompress preview PNGs with oxipng
    pub optimize_png: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            optimize_png: false,
        }
    }
}

/// One palette color as written in config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteEntryConfig {
    pub name: String,
    pub hex: String,
    pub catalog_id: u32,
    #[serde(default)]
    pub catalog_name: String,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        grid_width = config.defaults.grid_width,
                        backend_url = %config.export.backend_url,
                        custom_palette = config.palette.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace the backend URL when one is given (from `BACKEND_URL`).
    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.export.backend_url = url.trim().trim_end_matches('/').to_string();
        }
        self
    }

    /// Build the palette mosaics are matched against.
    ///
    /// Uses the built-in palette unless config.yaml lists its own colors.
    pub fn build_palette(&self) -> Result<Arc<Palette>, PaletteError> {
        let Some(entries) = &self.palette else {
            return Ok(Palette::builtin());
        };

        let colors = entries
            .iter()
            .enumerate()
            .map(|(index, e)| {
                PaletteColor::parse(&e.name, &e.hex, e.catalog_id, &e.catalog_name)
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Arc::new(Palette::new(colors)?))
    }
}
