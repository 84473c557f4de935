//! `all-pairs` command handler: enumerate candidate pairs sharing at least
//! one LSH band and verify each by exact Jaccard similarity.

use crate::error::{ErrorContext, Result};
use crate::index::{AllPairsResult, LshIndex};
use crate::persistence;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Load the index at `index_path`, run all-pairs verification above
/// `threshold`, and optionally write the matching `(doc_id1, doc_id2)`
/// pairs to `csv_out` as a side channel.
pub fn run_all_pairs(
    index_path: &Path,
    threshold: f64,
    csv_out: Option<&Path>,
) -> Result<AllPairsResult> {
    let file = File::open(index_path)
        .with_context(|| format!("opening index file at {}", index_path.display()))?;
    let index: LshIndex = persistence::load(BufReader::new(file))?;

    let result = index.all_pairs(threshold);
    tracing::info!(pairs = result.pairs.len(), threshold, "all-pairs complete");

    if let Some(csv_path) = csv_out {
        let out = File::create(csv_path)
            .with_context(|| format!("creating CSV output at {}", csv_path.display()))?;
        result.write_csv(BufWriter::new(out))?;
    }

    Ok(result)
}
