//! Coarse full search and top-K selection (component F, step 1).

use crate::candidate::topk::Candidate;
use crate::image::ImageView;
use crate::integral::IntegralImage;
use crate::search::scan;
use crate::template::TemplateStats;

/// Full search over a single level, keeping the top `k` candidates whose
/// score is at least `threshold`.
///
/// Used both for the coarsest pyramid level and for single-level (no
/// pyramid) searches.
pub(crate) fn coarse_search(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplateStats,
    threshold: f64,
    k: usize,
    parallel: bool,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = scan::scan_full(image, integral, tpl, parallel)
        .into_iter()
        .filter(|c| c.score >= threshold)
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap()
            .then(a.y.cmp(&b.y))
            .then(a.x.cmp(&b.x))
    });
    candidates.truncate(k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::gray::GrayImage;

    #[test]
    fn truncates_to_k_and_respects_threshold() {
        let width = 20;
        let height = 20;
        let data: Vec<u8> = (0..(width * height)).map(|i| (i * 3 % 256) as u8).collect();
        let image = GrayImage::from_raw(data.clone(), width, height).unwrap();
        let integral = IntegralImage::build(image.view());

        let tw = 4;
        let th = 4;
        let mut tpl_data = Vec::with_capacity(tw * th);
        for ty in 0..th {
            for tx in 0..tw {
                tpl_data.push(data[ty * width + tx]);
            }
        }
        let tpl_img = GrayImage::from_raw(tpl_data, tw, th).unwrap();
        let tpl = TemplateStats::from_view(tpl_img.view()).unwrap();

        let kept = coarse_search(image.view(), &integral, &tpl, -1.0, 2, false);
        assert!(kept.len() <= 2);
        assert_eq!((kept[0].x, kept[0].y), (0, 0));
    }
}
