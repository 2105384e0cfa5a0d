//! screenloc locates a template image inside a larger source image using
//! normalized cross-correlation (NCC), returning integer pixel positions and
//! a confidence score in `[-1, 1]`.
//!
//! The crate consumes already-decoded 8-bit grayscale rasters (see
//! [`image::GrayImage`] and, with the `image-io` feature, [`image::io`] for
//! decoding encoded bytes) and performs translation-only, coarse-to-fine
//! search accelerated by an image pyramid above a size threshold. Rotation,
//! scale invariance, sub-pixel localization, and GPU acceleration are
//! explicitly out of scope.
//!
//! ```no_run
//! use screenloc::{match_best, GrayImage};
//!
//! # fn run() -> screenloc::ScreenlocResult<()> {
//! let source = GrayImage::from_raw(vec![0u8; 64 * 64], 64, 64)?;
//! let template = GrayImage::from_raw(vec![0u8; 8 * 8], 8, 8)?;
//! if let Some(found) = match_best(source.view(), template.view(), 0.8)? {
//!     println!("matched at ({}, {}) with confidence {}", found.x, found.y, found.confidence);
//! }
//! # Ok(())
//! # }
//! ```

mod candidate;
mod integral;
pub mod image;
mod kernel;
pub mod lowlevel;
mod search;
mod template;
mod threadpool;
mod trace;
mod util;

pub use crate::image::{GrayImage, ImagePyramid, ImageView};
pub use integral::IntegralImage;
pub use template::Template;
pub use threadpool::set_threads;
pub use util::{ScreenlocError, ScreenlocResult};

use crate::search::{search_all, search_best, SearchParams};

/// A located template occurrence, guaranteed `confidence >= threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Top-left x coordinate of the matched placement, in source coordinates.
    pub x: i32,
    /// Top-left y coordinate of the matched placement, in source coordinates.
    pub y: i32,
    /// NCC score in `[-1, 1]`.
    pub confidence: f64,
}

fn validate_params(threshold: f64, max_count: usize) -> ScreenlocResult<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ScreenlocError::InvalidThreshold { value: threshold });
    }
    if max_count < 1 {
        return Err(ScreenlocError::InvalidMaxCount { value: max_count });
    }
    Ok(())
}

fn search_params(threshold: f64, max_count: usize) -> SearchParams {
    threadpool::ensure_initialized();
    SearchParams {
        threshold,
        max_count,
        parallel: cfg!(feature = "rayon"),
    }
}

/// Locates the single best occurrence of `template` in `source`.
///
/// Returns `None` when no placement scores at least `threshold` — a "not
/// found" outcome is never an error. A degenerate template (flat, zero
/// variance) is a different case: it aborts the call with
/// `ScreenlocError::DegenerateTemplate` rather than returning `Ok(None)`.
/// `threshold` must lie in `[0, 1]`.
pub fn match_best(
    source: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    threshold: f64,
) -> ScreenlocResult<Option<MatchResult>> {
    validate_params(threshold, 1)?;
    let params = search_params(threshold, 1);
    let best = search_best(source, template, params)?;
    Ok(best.map(|c| MatchResult {
        x: c.x,
        y: c.y,
        confidence: c.score,
    }))
}

/// Locates up to `max_count` non-overlapping occurrences of `template` in
/// `source`, ordered by descending confidence.
///
/// `threshold` must lie in `[0, 1]`; `max_count` must be at least 1.
pub fn match_all(
    source: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    threshold: f64,
    max_count: usize,
) -> ScreenlocResult<Vec<MatchResult>> {
    validate_params(threshold, max_count)?;
    let params = search_params(threshold, max_count);
    let candidates = search_all(source, template, params)?;
    Ok(candidates
        .into_iter()
        .map(|c| MatchResult {
            x: c.x,
            y: c.y,
            confidence: c.score,
        })
        .collect())
}

/// Returns the `(width, height)` of a raster view.
pub fn raster_dims(raster: ImageView<'_, u8>) -> (usize, usize) {
    (raster.width(), raster.height())
}
