//! Low-level, raw-pixel entry points for callers who already hold decoded
//! rasters and want to skip the `GrayImage`/pyramid convenience layer.
//!
//! These types and functions are the same building blocks [`match_best`] and
//! [`match_all`] are built from; they are re-exported here as public surface
//! rather than left as an internal implementation detail, for advanced use
//! cases (e.g. a caller that already maintains its own integral image across
//! repeated searches against a static source).
//!
//! [`match_best`]: crate::match_best
//! [`match_all`]: crate::match_all

pub use crate::candidate::Candidate;
pub use crate::integral::IntegralImage;
pub use crate::kernel::score_at;
pub use crate::template::TemplateStats;

use crate::candidate::nms::suppress;
use crate::image::ImageView;
use crate::search::scan::scan_full;
use crate::util::{ScreenlocError, ScreenlocResult};

/// Runs a single-level (non-pyramid) search directly against a raw image and
/// precomputed integral image, skipping template/source size checks that
/// drive pyramid selection in [`crate::match_all`].
///
/// Always scans the single level given; callers wanting coarse-to-fine
/// search on large sources should use [`crate::match_all`] instead.
pub fn find_all_raw(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    threshold: f64,
    max_count: usize,
    parallel: bool,
) -> ScreenlocResult<Vec<Candidate>> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ScreenlocError::InvalidThreshold { value: threshold });
    }
    if max_count < 1 {
        return Err(ScreenlocError::InvalidMaxCount { value: max_count });
    }

    let candidates: Vec<Candidate> = scan_full(image, integral, tpl, parallel)
        .into_iter()
        .filter(|c| c.score >= threshold)
        .collect();
    Ok(suppress(candidates, tpl.width(), tpl.height(), max_count))
}
