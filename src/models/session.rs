use brick_mosaic::{Conversion, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::ToSchema;

use super::{CatalogPart, DefaultsConfig};

/// Session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        use rand::Rng;
        let id: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoded source photo, alpha already discarded
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<Vec<Rgb>>,
}

/// User-adjustable settings of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionSettings {
    /// Bricks across
    pub grid_width: u32,
    /// Preview pixels per brick
    pub cell_size: u32,
    pub part: CatalogPart,
    /// Rows per instruction step
    pub step_height: u32,
}

impl From<&DefaultsConfig> for SessionSettings {
    fn from(d: &DefaultsConfig) -> Self {
        Self {
            grid_width: d.grid_width,
            cell_size: d.cell_size,
            part: d.part,
            step_height: d.step_height,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&DefaultsConfig::default())
    }
}

/// One user's conversion workspace
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub source: Option<SourceImage>,
    pub settings: SessionSettings,
    /// Current mosaic and parts, replaced wholesale on every build
    pub conversion: Option<Arc<Conversion>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn new(id: SessionId, settings: SessionSettings) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            source: None,
            settings,
            conversion: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Drop the image and everything derived from it.
    pub fn reset(&mut self) {
        self.source = None;
        self.conversion = None;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}
