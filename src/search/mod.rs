//! Coarse-to-fine search orchestration (component F) and the single-level
//! fallback used when the template or image is too small to benefit from a
//! pyramid.

mod coarse;
mod refine;
pub(crate) mod scan;

use crate::candidate::nms::suppress;
use crate::candidate::topk::Candidate;
use crate::image::pyramid::ImagePyramid;
use crate::image::ImageView;
use crate::integral::IntegralImage;
use crate::search::coarse::coarse_search;
use crate::search::refine::refine_to_level;
use crate::template::TemplateStats;
use crate::trace::{trace_event, trace_span};
use crate::util::{ScreenlocError, ScreenlocResult};

const PYRAMID_MIN_TEMPLATE_DIM: usize = 64;
const PYRAMID_MIN_SOURCE_DIM: usize = 256;
const PYRAMID_MAX_LEVELS: usize = 3;
const PYRAMID_MIN_COARSE_TEMPLATE_DIM: usize = 8;
const RELAXED_THRESHOLD_MARGIN: f64 = 0.15;
const REFINE_WINDOW_RADIUS: usize = 2;

/// Parameters shared by every search entry point.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchParams {
    pub(crate) threshold: f64,
    pub(crate) max_count: usize,
    pub(crate) parallel: bool,
}

fn uses_pyramid(tpl_width: usize, tpl_height: usize, img_width: usize, img_height: usize) -> bool {
    tpl_width.min(tpl_height) >= PYRAMID_MIN_TEMPLATE_DIM
        && img_width.min(img_height) >= PYRAMID_MIN_SOURCE_DIM
}

/// Picks the pyramid level count (including level 0) such that the coarsest
/// template's smaller dimension stays at least 8px, capped at 3 levels.
fn pyramid_level_count(tpl_width: usize, tpl_height: usize) -> usize {
    let mut levels = 1;
    let mut w = tpl_width;
    let mut h = tpl_height;
    while levels < PYRAMID_MAX_LEVELS {
        let next_w = w / 2;
        let next_h = h / 2;
        if next_w.min(next_h) < PYRAMID_MIN_COARSE_TEMPLATE_DIM {
            break;
        }
        w = next_w;
        h = next_h;
        levels += 1;
    }
    levels
}

/// Runs the full search pipeline and returns every surviving candidate,
/// NMS-deduplicated and truncated to `max_count`.
pub(crate) fn search_all(
    source: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    params: SearchParams,
) -> ScreenlocResult<Vec<Candidate>> {
    let tpl_width = template.width();
    let tpl_height = template.height();
    let img_width = source.width();
    let img_height = source.height();

    if tpl_width > img_width || tpl_height > img_height {
        return Err(ScreenlocError::TemplateLargerThanSource {
            tpl_width,
            tpl_height,
            src_width: img_width,
            src_height: img_height,
        });
    }

    let _span = trace_span!(
        "search_all",
        img_width = img_width,
        img_height = img_height,
        tpl_width = tpl_width,
        tpl_height = tpl_height
    )
    .entered();

    let candidates = if uses_pyramid(tpl_width, tpl_height, img_width, img_height) {
        search_pyramid(source, template, params)?
    } else {
        let tpl_stats = TemplateStats::from_view(template)?;
        let integral = IntegralImage::build(source);
        scan::scan_full(source, &integral, &tpl_stats, params.parallel)
    };

    let filtered: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.score >= params.threshold)
        .collect();

    let kept = suppress(filtered, tpl_width, tpl_height, params.max_count);
    trace_event!("search_candidates", count = kept.len());
    Ok(kept)
}

/// Runs the full search pipeline and returns only the single best candidate.
pub(crate) fn search_best(
    source: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    params: SearchParams,
) -> ScreenlocResult<Option<Candidate>> {
    let mut single = params;
    single.max_count = 1;
    let mut results = search_all(source, template, single)?;
    Ok(if results.is_empty() {
        None
    } else {
        Some(results.remove(0))
    })
}

fn search_pyramid(
    source: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    params: SearchParams,
) -> ScreenlocResult<Vec<Candidate>> {
    let tpl_width = template.width();
    let tpl_height = template.height();
    let num_levels = pyramid_level_count(tpl_width, tpl_height);

    let source_pyramid = ImagePyramid::build(source, num_levels)?;
    let template_pyramid = ImagePyramid::build(template, num_levels)?;
    let num_levels = source_pyramid
        .levels()
        .len()
        .min(template_pyramid.levels().len());

    let mut template_stats = Vec::with_capacity(num_levels);
    for level in 0..num_levels {
        let view = template_pyramid
            .level(level)
            .ok_or(ScreenlocError::IndexOutOfBounds {
                index: level,
                len: num_levels,
                context: "template pyramid level",
            })?;
        template_stats.push(TemplateStats::from_view(view)?);
    }

    let coarsest = num_levels - 1;
    let k_coarse = if params.max_count > 1 {
        (2 * params.max_count).max(16)
    } else {
        4
    };
    let relaxed_threshold = (params.threshold - RELAXED_THRESHOLD_MARGIN).max(0.0);

    let _span = trace_span!("pyramid_search", levels = num_levels, coarsest = coarsest).entered();

    let coarse_view = source_pyramid
        .level(coarsest)
        .ok_or(ScreenlocError::IndexOutOfBounds {
            index: coarsest,
            len: num_levels,
            context: "source pyramid level",
        })?;
    let coarse_integral = IntegralImage::build(coarse_view);
    let mut candidates = coarse_search(
        coarse_view,
        &coarse_integral,
        &template_stats[coarsest],
        relaxed_threshold,
        k_coarse,
        params.parallel,
    );
    trace_event!("coarse_candidates", count = candidates.len());

    for level in (0..coarsest).rev() {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let level_view = source_pyramid
            .level(level)
            .ok_or(ScreenlocError::IndexOutOfBounds {
                index: level,
                len: num_levels,
                context: "source pyramid level",
            })?;
        let level_integral = IntegralImage::build(level_view);
        let threshold = if level == 0 {
            params.threshold
        } else {
            relaxed_threshold
        };
        candidates = refine_to_level(
            level_view,
            &level_integral,
            &template_stats[level],
            &candidates,
            REFINE_WINDOW_RADIUS,
            threshold,
        );
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_trigger_requires_both_template_and_source_size() {
        assert!(!uses_pyramid(32, 32, 1024, 1024));
        assert!(!uses_pyramid(64, 64, 200, 200));
        assert!(uses_pyramid(64, 64, 256, 256));
        assert!(uses_pyramid(100, 64, 1024, 256));
    }

    #[test]
    fn level_count_caps_at_three_and_respects_min_dim() {
        assert_eq!(pyramid_level_count(64, 64), 3);
        assert_eq!(pyramid_level_count(16, 16), 2);
        assert_eq!(pyramid_level_count(8, 8), 1);
    }
}
