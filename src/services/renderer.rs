use brick_mosaic::{Conversion, Mosaic};
use std::sync::Arc;

use crate::error::{ApiError, RenderError};
use crate::rendering;

/// Preview rendering with the configured size limit and PNG options
pub struct RenderService {
    max_cell_size: u32,
    max_preview_pixels: u64,
    optimize_png: bool,
}

impl RenderService {
    pub fn new(max_cell_size: u32, max_preview_pixels: u64, optimize_png: bool) -> Self {
        Self {
            max_cell_size,
            max_preview_pixels,
            optimize_png,
        }
    }

    /// Check a client-supplied cell size.
    pub fn validate_cell_size(&self, cell_size: u32) -> Result<u32, ApiError> {
        if cell_size == 0 || cell_size > self.max_cell_size {
            return Err(ApiError::InvalidDimension(format!(
                "cell size {cell_size} must be between 1 and {}",
                self.max_cell_size
            )));
        }
        Ok(cell_size)
    }

    /// Check the cell size and the resulting preview area for `mosaic`.
    pub fn validate_preview(&self, mosaic: &Mosaic, cell_size: u32) -> Result<u32, ApiError> {
        let cell_size = self.validate_cell_size(cell_size)?;
        let width = u64::from(mosaic.width()) * u64::from(cell_size);
        let height = u64::from(mosaic.height()) * u64::from(cell_size);
        if width * height > self.max_preview_pixels {
            return Err(ApiError::InvalidDimension(format!(
                "a {width}x{height} preview exceeds the maximum of {} pixels; use a smaller cell size",
                self.max_preview_pixels
            )));
        }
        Ok(cell_size)
    }

    /// Render the preview PNG of a conversion.
    ///
    /// Uses spawn_blocking to keep rasterization and PNG compression off the
    /// async runtime.
    pub async fn render_png(
        &self,
        conversion: Arc<Conversion>,
        cell_size: u32,
    ) -> Result<Vec<u8>, ApiError> {
        let cell_size = self.validate_preview(conversion.mosaic(), cell_size)?;
        let optimize = self.optimize_png;

        let png = tokio::task::spawn_blocking(move || {
            rendering::render_preview_png(conversion.mosaic(), cell_size, optimize)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))??;

        tracing::debug!(cell_size, bytes = png.len(), "Rendered preview");
        Ok(png)
    }

    /// Synchronous variant for the CLI.
    pub fn render_png_blocking(
        &self,
        conversion: &Conversion,
        cell_size: u32,
    ) -> Result<Vec<u8>, RenderError> {
        rendering::render_preview_png(conversion.mosaic(), cell_size, self.optimize_png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_mosaic::{MosaicBuilder, Palette, Rgb};

    #[test]
    fn test_validate_cell_size() {
        let service = RenderService::new(28, 64_000_000, false);
        assert_eq!(service.validate_cell_size(6).unwrap(), 6);
        assert_eq!(service.validate_cell_size(28).unwrap(), 28);
        assert!(matches!(
            service.validate_cell_size(0),
            Err(ApiError::InvalidDimension(_))
        ));
        assert!(service.validate_cell_size(29).is_err());
    }

    #[tokio::test]
    async fn test_preview_pixel_budget() {
        let conversion = MosaicBuilder::new(Palette::builtin())
            .width(10)
            .build(&[Rgb::new(0, 0, 0); 100], 10, 10)
            .unwrap();
        let service = RenderService::new(64, 10_000, false);

        // 10x10 bricks at 10 px = 10_000 pixels, on the budget
        assert_eq!(service.validate_preview(conversion.mosaic(), 10).unwrap(), 10);
        assert!(matches!(
            service.validate_preview(conversion.mosaic(), 11),
            Err(ApiError::InvalidDimension(_))
        ));
        assert!(matches!(
            service.render_png(Arc::new(conversion), 11).await,
            Err(ApiError::InvalidDimension(_))
        ));
    }

    #[tokio::test]
    async fn test_render_png() {
        let conversion = MosaicBuilder::new(Palette::builtin())
            .width(3)
            .build(&[Rgb::new(0, 0, 0); 6], 3, 2)
            .unwrap();
        let png = RenderService::new(64, 64_000_000, false)
            .render_png(Arc::new(conversion), 4)
            .await
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 8));
    }
}
