//! Dense anchor scans over a rectangular region (component E).
//!
//! A sequential scan is always available; the `rayon` feature adds a
//! row-parallel variant. Either way the region is partitioned by row with no
//! shared mutable state, and the caller is responsible for the final
//! `(y, x)` tie-break during reduction — row order carries no meaning.

use crate::candidate::topk::Candidate;
use crate::image::ImageView;
use crate::integral::IntegralImage;
use crate::kernel::score_at;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::scan_region_par;
use crate::template::TemplateStats;

/// Evaluates every anchor in `[x0, x1] x [y0, y1]` sequentially, row-major.
pub(crate) fn scan_region_seq(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> Vec<Candidate> {
    if x0 > x1 || y0 > y1 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let score = score_at(image, integral, tpl, x, y);
            if score.is_finite() {
                out.push(Candidate {
                    x: x as i32,
                    y: y as i32,
                    score,
                });
            }
        }
    }
    out
}

/// Evaluates every anchor in `[x0, x1] x [y0, y1]`, parallel when requested
/// and the `rayon` feature is compiled in.
#[allow(clippy::too_many_arguments)]
pub(crate) fn scan_region(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    parallel: bool,
) -> Vec<Candidate> {
    #[cfg(feature = "rayon")]
    {
        if parallel {
            return scan_region_par(image, integral, tpl, x0, y0, x1, y1);
        }
    }
    #[cfg(not(feature = "rayon"))]
    {
        let _ = parallel;
    }
    scan_region_seq(image, integral, tpl, x0, y0, x1, y1)
}

/// Evaluates the full valid anchor range for the template's footprint.
pub(crate) fn scan_full(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    parallel: bool,
) -> Vec<Candidate> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = tpl.width();
    let tpl_height = tpl.height();
    if img_width < tpl_width || img_height < tpl_height {
        return Vec::new();
    }
    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;
    scan_region(image, integral, tpl, 0, 0, max_x, max_y, parallel)
}
