//! Match candidates and deterministic best-of reduction.

/// A candidate template placement produced by the NCC kernel.
///
/// `(x, y)` is the top-left anchor of the placement in source coordinates;
/// `score` lies in `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub x: i32,
    pub y: i32,
    pub score: f64,
}

/// Reduces to the single best candidate, breaking ties `(y, x)` ascending.
///
/// This is the explicit tie-break the parallel searcher's determinism
/// contract requires: the reduction must not depend on iteration or
/// worker-completion order.
pub(crate) fn best_of(candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .copied()
        .reduce(|best, cand| if is_better(cand, best) { cand } else { best })
}

#[inline]
fn is_better(a: Candidate, b: Candidate) -> bool {
    if a.score != b.score {
        return a.score > b.score;
    }
    (a.y, a.x) < (b.y, b.x)
}
