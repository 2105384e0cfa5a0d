//! Summed-area tables over a grayscale raster (component B).
//!
//! `IntegralImage` holds two `(W+1) x (H+1)` tables of 64-bit sums: `s` over
//! raw pixel values and `s2` over their squares. Both are built in a single
//! pass using the standard recurrence, and rectangular sums over the source
//! are then available in O(1) via inclusion-exclusion. Row 0 and column 0 are
//! always zero.
//!
//! Maximum `s` value over an 8-bit image is bounded by `255 * W * H`;
//! `s2` by `65025 * W * H`. Both fit comfortably in `u64` for any image size
//! that fits in memory (`u64::MAX / 65025 ~= 2.8e14` pixels).

use crate::image::ImageView;

/// Summed-area and summed-square-area tables over a grayscale image.
pub struct IntegralImage {
    s: Vec<u64>,
    s2: Vec<u64>,
    width: usize,
    height: usize,
}

impl IntegralImage {
    /// Builds both tables from a grayscale view in `O(width * height)`.
    pub fn build(image: ImageView<'_, u8>) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let mut s = vec![0u64; stride * (height + 1)];
        let mut s2 = vec![0u64; stride * (height + 1)];

        for y in 0..height {
            let row = image.row(y).expect("row within bounds for integral build");
            let row_out = (y + 1) * stride;
            let row_prev = y * stride;
            for x in 0..width {
                let value = row[x] as u64;
                let above = s[row_prev + x + 1];
                let left = s[row_out + x];
                let above_left = s[row_prev + x];
                s[row_out + x + 1] = value + above + left - above_left;

                let value2 = value * value;
                let above2 = s2[row_prev + x + 1];
                let left2 = s2[row_out + x];
                let above_left2 = s2[row_prev + x];
                s2[row_out + x + 1] = value2 + above2 + left2 - above_left2;
            }
        }

        Self {
            s,
            s2,
            width,
            height,
        }
    }

    /// Returns the image width this table was built over.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height this table was built over.
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn at(table: &[u64], stride: usize, x: usize, y: usize) -> u64 {
        table[y * stride + x]
    }

    /// Sum of pixel values over the half-open rectangle `[x1, x2) x [y1, y2)`.
    ///
    /// Panics (via array indexing) if the rectangle exceeds `(width, height)`.
    #[inline]
    pub fn sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> u64 {
        let stride = self.width + 1;
        Self::at(&self.s, stride, x2, y2) - Self::at(&self.s, stride, x1, y2)
            - Self::at(&self.s, stride, x2, y1)
            + Self::at(&self.s, stride, x1, y1)
    }

    /// Sum of squared pixel values over the half-open rectangle `[x1, x2) x [y1, y2)`.
    #[inline]
    pub fn sum_sq(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> u64 {
        let stride = self.width + 1;
        Self::at(&self.s2, stride, x2, y2) - Self::at(&self.s2, stride, x1, y2)
            - Self::at(&self.s2, stride, x2, y1)
            + Self::at(&self.s2, stride, x1, y1)
    }
}
