//! Mosaic preview rasterization.
//!
//! Each brick becomes a `cell_size` square in its palette color with a
//! translucent black disc in the middle standing in for the stud.

use brick_mosaic::Mosaic;
use std::io::Cursor;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::error::RenderError;

/// Stud radius as a fraction of the cell size
pub const STUD_RADIUS_RATIO: f32 = 0.18;

/// Stud shading alpha, 0.15 of full opacity
pub const STUD_ALPHA: u8 = 38;

// Largest edge we are willing to allocate
const MAX_PREVIEW_EDGE: u32 = 32_768;

/// Hard ceiling on preview pixels (256 MiB of RGBA), whatever the config says
pub const MAX_PREVIEW_PIXELS: u64 = 1 << 26;

/// Rasterize `mosaic` at `cell_size` pixels per brick.
///
/// The result is exactly `width * cell_size` by `height * cell_size`.
pub fn render_preview(mosaic: &Mosaic, cell_size: u32) -> Result<Pixmap, RenderError> {
    let unsupported = || RenderError::UnsupportedDimensions {
        width: mosaic.width().saturating_mul(cell_size),
        height: mosaic.height().saturating_mul(cell_size),
    };

    if cell_size == 0 {
        return Err(unsupported());
    }
    let width = mosaic.width().checked_mul(cell_size).ok_or_else(unsupported)?;
    let height = mosaic.height().checked_mul(cell_size).ok_or_else(unsupported)?;
    if width > MAX_PREVIEW_EDGE
        || height > MAX_PREVIEW_EDGE
        || u64::from(width) * u64::from(height) > MAX_PREVIEW_PIXELS
    {
        return Err(unsupported());
    }

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;

    let size = cell_size as f32;
    let mut paint = Paint {
        anti_alias: false,
        ..Default::default()
    };
    for (x, y, color) in mosaic.cells() {
        let rgb = color.rgb();
        paint.set_color_rgba8(rgb.r, rgb.g, rgb.b, 255);
        if let Some(rect) = Rect::from_xywh(x as f32 * size, y as f32 * size, size, size) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    let radius = (size * STUD_RADIUS_RATIO).max(1.0);
    let mut studs = PathBuilder::new();
    for y in 0..mosaic.height() {
        for x in 0..mosaic.width() {
            let cx = x as f32 * size + size / 2.0;
            let cy = y as f32 * size + size / 2.0;
            studs.push_circle(cx, cy, radius);
        }
    }
    if let Some(path) = studs.finish() {
        let mut stud_paint = Paint::default();
        stud_paint.set_color_rgba8(0, 0, 0, STUD_ALPHA);
        stud_paint.anti_alias = true;
        pixmap.fill_path(
            &path,
            &stud_paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    Ok(pixmap)
}

/// Encode a pixmap as an RGBA8 PNG.
///
/// With `optimize` the bytes are recompressed by oxipng; if that fails the
/// plain encoding is returned.
pub fn encode_png(pixmap: &Pixmap, optimize: bool) -> Result<Vec<u8>, RenderError> {
    // Every preview pixel is opaque, so premultiplied data equals straight RGBA
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(pixmap.data())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

/// Render and encode in one step.
pub fn render_preview_png(
    mosaic: &Mosaic,
    cell_size: u32,
    optimize: bool,
) -> Result<Vec<u8>, RenderError> {
    let pixmap = render_preview(mosaic, cell_size)?;
    encode_png(&pixmap, optimize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_mosaic::{MosaicBuilder, Palette, Rgb};

    fn red_black() -> Mosaic {
        MosaicBuilder::new(Palette::builtin())
            .width(2)
            .build(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 0)], 2, 1)
            .unwrap()
            .into_parts()
            .0
    }

    fn white(width: u32, height: u32) -> Mosaic {
        let pixels = vec![Rgb::new(255, 255, 255); (width * height) as usize];
        MosaicBuilder::new(Palette::builtin())
            .width(width)
            .build(&pixels, width, height)
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_dimensions_are_exact() {
        for cell_size in [1, 2, 5, 12, 28] {
            let pixmap = render_preview(&white(7, 3), cell_size).unwrap();
            assert_eq!(pixmap.width(), 7 * cell_size);
            assert_eq!(pixmap.height(), 3 * cell_size);
        }
    }

    #[test]
    fn test_cell_colors_and_stud() {
        let pixmap = render_preview(&red_black(), 20).unwrap();

        // Cell corners are untouched by the stud
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (0xC9, 0x1A, 0x09));
        let corner = pixmap.pixel(39, 19).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (0, 0, 0));

        // Stud darkens the middle of the red cell
        let center = pixmap.pixel(10, 10).unwrap();
        assert!(center.red() < 0xC9 && center.red() > 0xA0, "red {}", center.red());
        assert_eq!(center.alpha(), 255);
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let result = render_preview(&red_black(), 0);
        assert!(matches!(result, Err(RenderError::UnsupportedDimensions { .. })));
    }

    #[test]
    fn test_oversized_preview_rejected() {
        let result = render_preview(&white(4, 4), MAX_PREVIEW_EDGE);
        assert!(matches!(result, Err(RenderError::UnsupportedDimensions { .. })));
    }

    #[test]
    fn test_pixel_budget_rejected_before_allocation() {
        // Both edges fit (25600 and 32768) but the area is 3.3 GB of RGBA
        let result = render_preview(&white(400, 512), 64);
        assert!(matches!(
            result,
            Err(RenderError::UnsupportedDimensions {
                width: 25_600,
                height: 32_768
            })
        ));
    }

    #[test]
    fn test_encode_png_roundtrip_dimensions() {
        for optimize in [false, true] {
            let bytes = render_preview_png(&red_black(), 6, optimize).unwrap();
            assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (12, 6));
            assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0, [0xC9, 0x1A, 0x09, 255]);
        }
    }
}
