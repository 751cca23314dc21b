use brick_mosaic::{derived_height, validate_grid_width, Conversion, MosaicBuilder, Palette};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{ApiError, ConvertError};
use crate::models::SourceImage;

/// Turns decoded images into mosaics against one shared palette.
#[derive(Debug, Clone)]
pub struct Converter {
    builder: MosaicBuilder,
    max_grid_width: u32,
    max_grid_cells: u64,
}

impl Converter {
    pub fn new(palette: Arc<Palette>, max_grid_width: u32, max_grid_cells: u64) -> Self {
        Self {
            builder: MosaicBuilder::new(palette),
            max_grid_width,
            max_grid_cells,
        }
    }

    pub fn palette(&self) -> &Arc<Palette> {
        self.builder.palette()
    }

    pub fn max_grid_width(&self) -> u32 {
        self.max_grid_width
    }

    /// Check a grid width as received from a client.
    pub fn validate_width(&self, width: f64) -> Result<u32, ConvertError> {
        let width = validate_grid_width(width)?;
        if width > self.max_grid_width {
            return Err(ConvertError::InvalidDimension(format!(
                "grid width {width} exceeds the maximum of {}",
                self.max_grid_width
            )));
        }
        Ok(width)
    }

    /// Parse and check a grid width given as text (query strings, CLI).
    pub fn parse_width(&self, raw: &str) -> Result<u32, ConvertError> {
        let width: f64 = raw.trim().parse().map_err(|_| {
            ConvertError::InvalidDimension(format!("grid width '{raw}' is not a number"))
        })?;
        self.validate_width(width)
    }

    /// Check that `source` at `width` bricks across stays within the cell budget.
    pub fn check_grid(&self, source: &SourceImage, width: u32) -> Result<u32, ConvertError> {
        let height = derived_height(source.width, source.height, width);
        let cells = u64::from(width) * u64::from(height);
        if cells > self.max_grid_cells {
            return Err(ConvertError::InvalidDimension(format!(
                "a {width}x{height} mosaic has {cells} bricks, more than the maximum of {}",
                self.max_grid_cells
            )));
        }
        Ok(height)
    }

    /// Build the mosaic for `source` at `width` bricks across.
    pub fn convert(&self, source: &SourceImage, width: u32) -> Result<Conversion, ConvertError> {
        self.check_grid(source, width)?;
        let start = Instant::now();
        let conversion = self
            .builder
            .clone()
            .width(width)
            .build(&source.pixels, source.width, source.height)?;

        tracing::info!(
            source_width = source.width,
            source_height = source.height,
            width = conversion.mosaic().width(),
            height = conversion.mosaic().height(),
            colors = conversion.parts().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built mosaic"
        );

        Ok(conversion)
    }

    /// Run [`convert`](Self::convert) off the async runtime.
    pub async fn convert_blocking(
        &self,
        source: SourceImage,
        width: u32,
    ) -> Result<Conversion, ApiError> {
        let converter = self.clone();

        tokio::task::spawn_blocking(move || converter.convert(&source, width))
            .await
            .map_err(|e| ApiError::Internal(format!("Conversion task failed: {e}")))?
            .map_err(ApiError::from)
    }
}
