//! Test images, encoded the way a client would upload them.

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Encode an RGB image as PNG bytes
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out.into_inner()
}

/// Single-color image
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    png_bytes(&RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// 4x2 image: left half red, right half black
pub fn red_black_png() -> Vec<u8> {
    let img = RgbImage::from_fn(4, 2, |x, _| if x < 2 { Rgb(RED) } else { Rgb(BLACK) });
    png_bytes(&img)
}

/// Horizontal gray ramp, useful when the exact colors don't matter
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.max(1)) as u8;
        Rgb([v, v, v])
    });
    png_bytes(&img)
}

/// Fully transparent white RGBA image; alpha is expected to be ignored
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out.into_inner()
}

/// Bytes that are no image format at all
pub fn garbage_bytes() -> Vec<u8> {
    b"definitely not an image".to_vec()
}
