//! `query` command handler: load a persisted index and find near-duplicates
//! of a single document.

use crate::error::{ErrorContext, Result};
use crate::index::LshIndex;
use crate::persistence;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load the index at `index_path` and return the doc ids whose Jaccard
/// similarity to `query_text` exceeds `threshold`.
pub fn run_query(index_path: &Path, query_text: &str, threshold: f64) -> Result<Vec<usize>> {
    let index = load_index(index_path)?;
    let results = index.query(query_text, threshold)?;
    tracing::info!(matches = results.len(), threshold, "query complete");
    Ok(results)
}

fn load_index(index_path: &Path) -> Result<LshIndex> {
    let file = File::open(index_path)
        .with_context(|| format!("opening index file at {}", index_path.display()))?;
    persistence::load(BufReader::new(file))
}
