//! Area-averaging resize.
//!
//! Every output pixel is the mean of the source pixels under its footprint,
//! weighted by how much of each source pixel the footprint covers. Partial
//! coverage at the footprint edges is accounted for exactly, so the filter
//! stays a true box filter for any ratio between source and target size.

use crate::color::Rgb;

/// Source indices and coverage weights contributing to each output position
/// along one axis.
fn axis_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);

            let first = start.floor() as u32;
            let last = (end.ceil() as u32).clamp(first + 1, src_len);

            (first..last)
                .filter_map(|s| {
                    let lo = start.max(s as f64);
                    let hi = end.min((s + 1) as f64);
                    let weight = hi - lo;
                    (weight > 0.0).then_some((s as usize, weight))
                })
                .collect()
        })
        .collect()
}

/// Resize `pixels` (row-major, `width * height`) to `new_width * new_height`
/// using area averaging.
///
/// Returns the resized pixels in row-major order. Dimensions must all be
/// non-zero; the caller validates this.
pub(crate) fn resize_area(
    pixels: &[Rgb],
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
) -> Vec<Rgb> {
    debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));

    if width == new_width && height == new_height {
        return pixels.to_vec();
    }

    let columns = axis_weights(width, new_width);
    let rows = axis_weights(height, new_height);
    let stride = width as usize;

    let mut output = Vec::with_capacity(new_width as usize * new_height as usize);

    for row in &rows {
        for column in &columns {
            let mut sum = [0.0f64; 3];
            let mut total = 0.0f64;

            for &(sy, wy) in row {
                let line = &pixels[sy * stride..(sy + 1) * stride];
                for &(sx, wx) in column {
                    let weight = wx * wy;
                    let p = line[sx];
                    sum[0] += p.r as f64 * weight;
                    sum[1] += p.g as f64 * weight;
                    sum[2] += p.b as f64 * weight;
                    total += weight;
                }
            }

            let channel = |v: f64| (v / total).round().clamp(0.0, 255.0) as u8;
            output.push(Rgb::new(channel(sum[0]), channel(sum[1]), channel(sum[2])));
        }
    }

    output
}
