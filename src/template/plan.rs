//! Template statistics precomputation (component C).

use crate::image::ImageView;
use crate::util::{ScreenlocError, ScreenlocResult};

/// Flat-template tolerance shared with the NCC kernel (spec: `epsilon = 1e-10`).
pub const EPSILON: f64 = 1e-10;

/// Precomputed double-precision statistics for a fixed template window.
///
/// `t_mean` is the exact average intensity, `centered` is the zero-mean
/// template buffer (`centered[i] = t[i] - t_mean`), and `t_norm` is its L2
/// norm. Because `centered` sums to zero, the NCC kernel's dot product never
/// needs to re-subtract the source-window mean from every pixel.
pub struct TemplateStats {
    width: usize,
    height: usize,
    t_mean: f64,
    centered: Vec<f64>,
    t_norm: f64,
}

impl TemplateStats {
    /// Builds template statistics from a template view.
    ///
    /// Fails with [`ScreenlocError::DegenerateTemplate`] when the template is
    /// flat (`t_norm <= epsilon`), per spec.
    pub fn from_view(tpl: ImageView<'_, u8>) -> ScreenlocResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(ScreenlocError::InvalidDimensions { width, height })?;

        let mut sum = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).expect("row within bounds for template stats");
            for &value in row {
                sum += value as f64;
            }
        }
        let t_mean = sum / count as f64;

        let mut centered = Vec::with_capacity(count);
        let mut sum_sq = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).expect("row within bounds for template stats");
            for &value in row {
                let c = value as f64 - t_mean;
                sum_sq += c * c;
                centered.push(c);
            }
        }
        let t_norm = sum_sq.sqrt();

        if t_norm <= EPSILON {
            return Err(ScreenlocError::DegenerateTemplate {
                reason: "flat template (t_norm <= epsilon)",
            });
        }

        Ok(Self {
            width,
            height,
            t_mean,
            centered,
            t_norm,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the template's mean intensity.
    pub fn t_mean(&self) -> f64 {
        self.t_mean
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn centered(&self) -> &[f64] {
        &self.centered
    }

    /// Returns the L2 norm of the zero-mean template buffer.
    pub fn t_norm(&self) -> f64 {
        self.t_norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::gray::GrayImage;

    #[test]
    fn flat_template_is_degenerate() {
        let img = GrayImage::from_raw(vec![128u8; 16], 4, 4).unwrap();
        let err = TemplateStats::from_view(img.view()).unwrap_err();
        assert_eq!(
            err,
            ScreenlocError::DegenerateTemplate {
                reason: "flat template (t_norm <= epsilon)"
            }
        );
    }

    #[test]
    fn centered_buffer_sums_to_zero() {
        let data: Vec<u8> = (0..16).collect();
        let img = GrayImage::from_raw(data, 4, 4).unwrap();
        let stats = TemplateStats::from_view(img.view()).unwrap();
        let sum: f64 = stats.centered().iter().sum();
        assert!(sum.abs() < 1e-9);
        assert!((stats.t_mean() - 7.5).abs() < 1e-9);
    }
}
