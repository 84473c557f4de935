//! The closed-form `(s1, p1, s2, p2)`-sensitivity model for a banded LSH
//! scheme, and an analysis sweep over `(M, r)` grids.
//!
//! `compute_sensitivity` is grounded on `original_source/src/lsh.py`'s
//! `compute_sensitivity`; the sweep over parameter grids is grounded on
//! `original_source/src/lsh_analysis.py`'s `perform_analysis`, which drives
//! the same closed-form model across a matrix of `(M, r)` pairs rather than
//! the Monte-Carlo precision estimate the original also computes (dropped:
//! that half requires mutated queries against a live corpus, out of scope
//! for a pure analytical model).

/// `(p1, p2)` for `B = m / r` bands of width `r`, at similarities `s1 < s2`.
///
/// - `p1 = (1 - s1^r)^B`: probability that two documents of similarity `s1`
///   share no band.
/// - `p2 = 1 - (1 - s2^r)^B`: probability that two documents of similarity
///   `s2` share at least one band.
#[must_use]
pub fn compute_sensitivity(s1: f64, s2: f64, m: usize, r: usize) -> (f64, f64) {
    let b = (m / r) as f64;
    let r = r as f64;
    let p1 = (1.0 - s1.powf(r)).powf(b);
    let p2 = 1.0 - (1.0 - s2.powf(r)).powf(b);
    (p1, p2)
}

/// One row of a sensitivity sweep over a grid of `(M, r)` banding parameters.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SweepRow {
    pub m: usize,
    pub r: usize,
    pub s1: f64,
    pub p1: f64,
    pub s2: f64,
    pub p2: f64,
}

/// Tabulate `(p1, p2)` over every `(m, r)` pair in `grid`, skipping entries
/// that would violate `m % r == 0` or `m < r` (those are construction-time
/// `ConfigError`s elsewhere; a sweep silently omits them rather than failing
/// the whole analysis).
#[must_use]
pub fn sweep(grid: &[(usize, usize)], s1: f64, s2: f64) -> Vec<SweepRow> {
    grid.iter()
        .filter(|&&(m, r)| r > 0 && m >= r && m % r == 0)
        .map(|&(m, r)| {
            let (p1, p2) = compute_sensitivity(s1, s2, m, r);
            SweepRow { m, r, s1, p1, s2, p2 }
        })
        .collect()
}
