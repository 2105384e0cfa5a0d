//! Row-partitioned parallel anchor sweep (component E, feature-gated).
//!
//! Each row is an independent unit of work: a worker owns a disjoint strip
//! of anchors and returns its own candidate list, with no shared mutable
//! state and no locking. Row completion order carries no meaning — callers
//! must apply the `(y, x)` tie-break explicitly during reduction rather than
//! trusting iteration order.

use crate::candidate::topk::Candidate;
use crate::image::ImageView;
use crate::integral::IntegralImage;
use crate::kernel::score_at;
use crate::template::TemplateStats;
use rayon::prelude::*;

/// Evaluates every anchor in `[x0, x1] x [y0, y1]` in parallel, partitioned by row.
pub(crate) fn scan_region_par(
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

    (y0..=y1)
        .into_par_iter()
        .flat_map_iter(|y| {
            (x0..=x1).filter_map(move |x| {
                let score = score_at(image, integral, tpl, x, y);
                score.is_finite().then_some(Candidate {
                    x: x as i32,
                    y: y as i32,
                    score,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::gray::GrayImage;
    use crate::search::scan::scan_region_seq;

    #[test]
    fn matches_sequential_scan() {
        let width = 20;
        let height = 16;
        let data: Vec<u8> = (0..(width * height))
            .map(|i| ((i * 37 + i / 5) % 256) as u8)
            .collect();
        let image = GrayImage::from_raw(data, width, height).unwrap();
        let integral = IntegralImage::build(image.view());

        let tpl_data: Vec<u8> = (0..(5 * 4)).map(|i| (i * 11 % 256) as u8).collect();
        let tpl_img = GrayImage::from_raw(tpl_data, 5, 4).unwrap();
        let tpl = TemplateStats::from_view(tpl_img.view()).unwrap();

        let max_x = width - 5;
        let max_y = height - 4;
        let mut par = scan_region_par(image.view(), &integral, &tpl, 0, 0, max_x, max_y);
        let mut seq = scan_region_seq(image.view(), &integral, &tpl, 0, 0, max_x, max_y);
        let key = |c: &Candidate| (c.y, c.x);
        par.sort_by_key(key);
        seq.sort_by_key(key);
        assert_eq!(par.len(), seq.len());
        for (p, s) in par.iter().zip(seq.iter()) {
            assert_eq!((p.x, p.y), (s.x, s.y));
            assert!((p.score - s.score).abs() < 1e-9);
        }
    }
}
