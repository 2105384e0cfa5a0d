//! Image pyramid construction for grayscale `u8` images (component F levels).
//!
//! Downsampling uses a 2x2 box filter: `dst = round_ties_even((a+b+c+d)/4)`.
//! Level `k` has dimensions `max(1, W>>k) x max(1, H>>k)`; construction stops
//! once a level's width or height drops below 2, which in practice happens
//! only once a level reaches a single pixel on that axis.

use crate::image::gray::GrayImage;
use crate::image::ImageView;
use crate::util::ScreenlocResult;

/// Owned image pyramid built from a base grayscale level.
///
/// Level 0 is the original resolution; each subsequent level is a 2x
/// box-downsample of its predecessor.
pub struct ImagePyramid {
    levels: Vec<GrayImage>,
}

impl ImagePyramid {
    /// Builds a pyramid from a base grayscale view.
    ///
    /// `max_levels` is clamped to at least 1 so the base level is always
    /// present. Construction stops once the source is smaller than `2x2`.
    pub fn build(base: ImageView<'_, u8>, max_levels: usize) -> ScreenlocResult<Self> {
        let max_levels = max_levels.max(1);
        let mut levels = Vec::new();
        levels.push(GrayImage::from_view(base)?);

        while levels.len() < max_levels {
            let prev = levels.last().expect("levels is not empty");
            let src = prev.view();
            if src.width() < 2 || src.height() < 2 {
                break;
            }
            levels.push(downsample_2x(src)?);
        }

        Ok(Self { levels })
    }

    /// Returns all pyramid levels, coarsest last.
    pub fn levels(&self) -> &[GrayImage] {
        &self.levels
    }

    /// Returns a view for a specific pyramid level.
    pub fn level(&self, index: usize) -> Option<ImageView<'_, u8>> {
        self.levels.get(index).map(|level| level.view())
    }

    /// Consumes the pyramid, returning its owned levels.
    pub fn into_levels(self) -> Vec<GrayImage> {
        self.levels
    }
}

fn downsample_2x(src: ImageView<'_, u8>) -> ScreenlocResult<GrayImage> {
    let dst_width = src.width() / 2;
    let dst_height = src.height() / 2;
    let mut dst = vec![0u8; dst_width * dst_height];

    for y in 0..dst_height {
        let row0 = src.row(y * 2).expect("row within bounds for downsample");
        let row1 = src
            .row(y * 2 + 1)
            .expect("row within bounds for downsample");
        for x in 0..dst_width {
            let a = row0[2 * x] as u32;
            let b = row0[2 * x + 1] as u32;
            let c = row1[2 * x] as u32;
            let d = row1[2 * x + 1] as u32;
            let avg = (a + b + c + d) as f64 / 4.0;
            dst[y * dst_width + x] = avg.round_ties_even() as u8;
        }
    }

    GrayImage::from_raw(dst, dst_width, dst_height)
}
