//! SIMD dot-product inner loop using the `wide` crate (feature-gated).
//!
//! Vectorizes the template/source multiply-accumulate in `f64x4` lanes,
//! leaving the remainder to scalar code. Correlation scores must stay
//! double-precision per the kernel's numeric-care contract, so lanes are
//! widened to `f64` rather than kept in `f32` as a lower-precision kernel
//! would.

use crate::image::ImageView;
use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_u8x4_as_f64x4(slice: &[u8]) -> f64x4 {
    f64x4::from([
        slice[0] as f64,
        slice[1] as f64,
        slice[2] as f64,
        slice[3] as f64,
    ])
}

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

/// Computes `Σ centered[i] * source[i]` over the template footprint anchored
/// at `(x, y)`, vectorizing 4 pixels per iteration.
pub(crate) fn dot_product(
    image: ImageView<'_, u8>,
    centered: &[f64],
    x: usize,
    y: usize,
    tpl_width: usize,
    tpl_height: usize,
) -> f64 {
    let simd_end = tpl_width / LANES * LANES;
    let mut acc = f64x4::ZERO;
    let mut tail = 0.0f64;

    for ty in 0..tpl_height {
        let row = image.row(y + ty).expect("row within bounds for dot_product");
        let base = ty * tpl_width;

        let mut tx = 0;
        while tx < simd_end {
            let img_vals = load_u8x4_as_f64x4(&row[x + tx..]);
            let tpl_vals = load_f64x4(&centered[base + tx..]);
            acc += tpl_vals * img_vals;
            tx += LANES;
        }
        while tx < tpl_width {
            tail += centered[base + tx] * row[x + tx] as f64;
            tx += 1;
        }
    }

    hsum(acc) + tail
}
