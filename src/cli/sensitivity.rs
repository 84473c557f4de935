//! `sensitivity` command handler: tabulate the banded-LSH sensitivity
//! model over a grid of `(M, r)` parameters.

use crate::index::sensitivity::{sweep, SweepRow};

/// Run a sensitivity sweep for similarities `s1 < s2` over `grid`.
#[must_use]
pub fn run_sensitivity(grid: &[(usize, usize)], s1: f64, s2: f64) -> Vec<SweepRow> {
    let rows = sweep(grid, s1, s2);
    tracing::info!(rows = rows.len(), s1, s2, "sensitivity sweep complete");
    rows
}
