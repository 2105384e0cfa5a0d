//! Normalized cross-correlation kernel (component D).
//!
//! Combines a raw per-anchor dot product against the template's zero-mean
//! buffer with source-window statistics drawn from the integral image. Since
//! the centered template sums to zero, the hot loop never needs to subtract
//! the window mean from the source pixels — only `dot_product` touches every
//! template pixel; everything else is O(1) integral-image lookups.

pub(crate) mod scalar;

#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

#[cfg(feature = "simd")]
use simd::dot_product;
#[cfg(not(feature = "simd"))]
use scalar::dot_product;

use crate::image::ImageView;
use crate::integral::IntegralImage;
use crate::template::{TemplateStats, EPSILON};

/// Sum of squared deviations (`sumsq - sum^2/n`) over a rectangular window.
#[inline]
fn window_var_n(integral: &IntegralImage, x: usize, y: usize, w: usize, h: usize) -> f64 {
    let n = (w * h) as f64;
    let sum = integral.sum(x, y, x + w, y + h) as f64;
    let sum_sq = integral.sum_sq(x, y, x + w, y + h) as f64;
    sum_sq - (sum * sum) / n
}

/// Computes the NCC score at anchor `(x, y)`.
///
/// Returns `f64::NEG_INFINITY` when the local window is flat (`s_norm < ε`)
/// or the anchor falls outside the valid placement range for the template.
///
/// Exposed publicly (via [`crate::lowlevel`]) for callers who already hold a
/// raw-pixel integral image and template stats and want single-anchor
/// scoring without going through the pyramid search driver.
pub fn score_at(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    x: usize,
    y: usize,
) -> f64 {
    let tpl_width = tpl.width();
    let tpl_height = tpl.height();
    if x + tpl_width > image.width() || y + tpl_height > image.height() {
        return f64::NEG_INFINITY;
    }

    let var_n = window_var_n(integral, x, y, tpl_width, tpl_height).max(0.0);
    let s_norm = var_n.sqrt();
    if s_norm < EPSILON {
        return f64::NEG_INFINITY;
    }

    let dot = dot_product(image, tpl.centered(), x, y, tpl_width, tpl_height);
    let r = dot / (s_norm * tpl.t_norm());
    if !r.is_finite() {
        return f64::NEG_INFINITY;
    }
    r.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::gray::GrayImage;

    #[test]
    fn exact_placement_scores_near_one() {
        let width = 10;
        let height = 10;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 13 + y * 7) % 256) as u8);
            }
        }
        let image = GrayImage::from_raw(data.clone(), width, height).unwrap();
        let integral = IntegralImage::build(image.view());

        let tpl_width = 4;
        let tpl_height = 4;
        let tx0 = 3;
        let ty0 = 2;
        let mut tpl_data = Vec::with_capacity(tpl_width * tpl_height);
        for ty in 0..tpl_height {
            for tx in 0..tpl_width {
                tpl_data.push(data[(ty0 + ty) * width + (tx0 + tx)]);
            }
        }
        let tpl_img = GrayImage::from_raw(tpl_data, tpl_width, tpl_height).unwrap();
        let stats = TemplateStats::from_view(tpl_img.view()).unwrap();

        let score = score_at(image.view(), &integral, &stats, tx0, ty0);
        assert!(score >= 1.0 - 1e-6);
    }

    #[test]
    fn flat_window_returns_sentinel() {
        let data = vec![42u8; 8 * 8];
        let image = GrayImage::from_raw(data, 8, 8).unwrap();
        let integral = IntegralImage::build(image.view());

        let tpl_data: Vec<u8> = (0..16).collect();
        let tpl_img = GrayImage::from_raw(tpl_data, 4, 4).unwrap();
        let stats = TemplateStats::from_view(tpl_img.view()).unwrap();

        let score = score_at(image.view(), &integral, &stats, 0, 0);
        assert_eq!(score, f64::NEG_INFINITY);
    }

    #[test]
    fn score_is_clamped_to_unit_range() {
        let width = 6;
        let height = 6;
        let data: Vec<u8> = (0..(width * height)).map(|i| (i * 23 % 256) as u8).collect();
        let image = GrayImage::from_raw(data, width, height).unwrap();
        let integral = IntegralImage::build(image.view());

        let tpl_data: Vec<u8> = (0..9).map(|i| (i * 40 % 256) as u8).collect();
        let tpl_img = GrayImage::from_raw(tpl_data, 3, 3).unwrap();
        let stats = TemplateStats::from_view(tpl_img.view()).unwrap();

        for y in 0..=(height - 3) {
            for x in 0..=(width - 3) {
                let score = score_at(image.view(), &integral, &stats, x, y);
                assert!(score == f64::NEG_INFINITY || (-1.0..=1.0).contains(&score));
            }
        }
    }
}
