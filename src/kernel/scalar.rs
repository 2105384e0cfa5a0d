//! Scalar dot-product inner loop for the NCC kernel (component D).

use crate::image::ImageView;

/// Computes `Σ centered[i] * source[i]` over the template footprint anchored
/// at `(x, y)`.
///
/// Because `centered` is the template's zero-mean buffer, this is the entire
/// numerator contribution the anchor needs — no per-pixel subtraction of the
/// window mean from the source is required.
pub(crate) fn dot_product(
    image: ImageView<'_, u8>,
    centered: &[f64],
    x: usize,
    y: usize,
    tpl_width: usize,
    tpl_height: usize,
) -> f64 {
    let mut dot = 0.0f64;
    for ty in 0..tpl_height {
        let row = image.row(y + ty).expect("row within bounds for dot_product");
        let base = ty * tpl_width;
        for tx in 0..tpl_width {
            dot += centered[base + tx] * row[x + tx] as f64;
        }
    }
    dot
}
