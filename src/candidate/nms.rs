//! Non-maximum suppression (component G).

use crate::candidate::topk::Candidate;

/// Deduplicates overlapping candidates by Chebyshev distance between centers.
///
/// Candidates are sorted by descending score, ties broken `(y, x)` ascending
/// per the determinism contract, then accepted greedily: a candidate is
/// rejected if its center lies within a `min(w, h) / 2` box of any already
/// accepted center. Stops once `max_count` candidates are accepted.
pub(crate) fn suppress(
    mut candidates: Vec<Candidate>,
    tpl_width: usize,
    tpl_height: usize,
    max_count: usize,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap()
            .then(a.y.cmp(&b.y))
            .then(a.x.cmp(&b.x))
    });

    let half_w = tpl_width as f64 / 2.0;
    let half_h = tpl_height as f64 / 2.0;
    let threshold = tpl_width.min(tpl_height) as f64 / 2.0;

    let mut kept: Vec<Candidate> = Vec::new();
    for cand in candidates {
        if kept.len() >= max_count {
            break;
        }
        let cx = cand.x as f64 + half_w;
        let cy = cand.y as f64 + half_h;
        let overlaps = kept.iter().any(|k| {
            let kx = k.x as f64 + half_w;
            let ky = k.y as f64 + half_h;
            (cx - kx).abs().max((cy - ky).abs()) < threshold
        });
        if !overlaps {
            kept.push(cand);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(x: i32, y: i32, score: f64) -> Candidate {
        Candidate { x, y, score }
    }

    #[test]
    fn keeps_four_non_overlapping_tiles() {
        let candidates = vec![
            cand(0, 0, 0.99),
            cand(16, 0, 0.98),
            cand(32, 0, 0.97),
            cand(48, 0, 0.96),
        ];
        let kept = suppress(candidates, 16, 16, 10);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn drops_near_duplicate_in_favor_of_higher_score() {
        let candidates = vec![cand(10, 10, 0.95), cand(11, 10, 0.9), cand(9, 9, 0.5)];
        let kept = suppress(candidates, 16, 16, 10);
        assert_eq!(kept.len(), 1);
        assert_eq!((kept[0].x, kept[0].y), (10, 10));
    }

    #[test]
    fn truncates_to_max_count() {
        let candidates = vec![
            cand(0, 0, 0.9),
            cand(100, 0, 0.8),
            cand(200, 0, 0.7),
        ];
        let kept = suppress(candidates, 8, 8, 2);
        assert_eq!(kept.len(), 2);
    }
}
