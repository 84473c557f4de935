//! Exact Jaccard similarity over shingle sets.
//!
//! Grounded on `original_source/src/jaccard.py`'s `compute_jaccard`.

use crate::preprocess::Shingle;
use std::collections::HashSet;

/// `|A ∩ B| / |A ∪ B|`. Symmetric; `compute_jaccard(A, A) == 1.0` for any
/// non-empty `A`; `compute_jaccard(A, B) == 0.0` iff `A ∩ B` is empty.
#[must_use]
pub fn compute_jaccard(a: &HashSet<Shingle>, b: &HashSet<Shingle>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
