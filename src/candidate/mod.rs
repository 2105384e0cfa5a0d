//! Candidate selection and pruning utilities.
//!
//! Holds the `Candidate` type (component D/E output), deterministic best-of
//! reduction, and spatial non-maximum suppression (component G).

pub(crate) mod nms;
pub(crate) mod topk;

pub use topk::Candidate;
