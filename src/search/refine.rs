//! Refinement search between pyramid levels (component F, steps 2-3).

use crate::candidate::topk::Candidate;
use crate::image::ImageView;
use crate::integral::IntegralImage;
use crate::search::scan::scan_region_seq;
use crate::template::TemplateStats;

fn window_bounds(
    cx: usize,
    cy: usize,
    radius: usize,
    max_x: usize,
    max_y: usize,
) -> Option<(usize, usize, usize, usize)> {
    if cx > max_x || cy > max_y {
        return None;
    }
    let x0 = cx.saturating_sub(radius);
    let y0 = cy.saturating_sub(radius);
    let x1 = (cx + radius).min(max_x);
    let y1 = (cy + radius).min(max_y);
    Some((x0, y0, x1, y1))
}

#[inline]
fn better(a: Candidate, b: Candidate) -> bool {
    if a.score != b.score {
        return a.score > b.score;
    }
    (a.y, a.x) < (b.y, b.x)
}

/// Refines each coarse candidate to its local best anchor at a finer level.
///
/// The coarse position is first upscaled by 2x (the pyramid step factor),
/// then searched within a radius-`radius` window at the finer level's own
/// integral image and template stats. Candidates whose refined score falls
/// below `threshold`, or whose window falls entirely outside the image, are
/// dropped.
pub(crate) fn refine_to_level(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    prev: &[Candidate],
    radius: usize,
    threshold: f64,
) -> Vec<Candidate> {
    let tpl_width = tpl.width();
    let tpl_height = tpl.height();
    let img_width = image.width();
    let img_height = image.height();
    if img_width < tpl_width || img_height < tpl_height {
        return Vec::new();
    }
    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;

    let mut out = Vec::with_capacity(prev.len());
    for cand in prev {
        let cx = (cand.x as usize).saturating_mul(2);
        let cy = (cand.y as usize).saturating_mul(2);
        let bounds = match window_bounds(cx, cy, radius, max_x, max_y) {
            Some(bounds) => bounds,
            None => continue,
        };

        let window = scan_region_seq(image, integral, tpl, bounds.0, bounds.1, bounds.2, bounds.3);
        let best = window
            .into_iter()
            .filter(|c| c.score >= threshold)
            .reduce(|a, b| if better(b, a) { b } else { a });
        if let Some(best) = best {
            out.push(best);
        }
    }
    out
}
