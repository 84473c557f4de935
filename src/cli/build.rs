//! `build` command handler: shingle a CSV corpus, compute MinHash
//! signatures, and persist the resulting LSH index.

use crate::config::AppConfig;
use crate::error::{ErrorContext, Result};
use crate::index::LshIndex;
use crate::persistence;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Read a single-column CSV corpus. A `text` header is used if present;
/// otherwise the first column of every record is taken.
fn read_corpus(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("reading corpus CSV at {}", path.display()))?;

    let text_column = reader
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("text"))
        .unwrap_or(0);

    let mut docs = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading record from {}", path.display()))?;
        if let Some(field) = record.get(text_column) {
            docs.push(field.to_string());
        }
    }
    Ok(docs)
}

/// Build an LSH index from `corpus_path` and write it to `output_path`.
pub fn run_build(corpus_path: &Path, output_path: &Path, config: &AppConfig) -> Result<usize> {
    let docs = read_corpus(corpus_path)?;
    tracing::info!(documents = docs.len(), path = %corpus_path.display(), "read corpus");

    let index = LshIndex::build(
        &docs,
        config.m,
        config.r,
        config.hash_family,
        config.preprocess,
        config.threads,
        seed(),
    )?;

    let file = File::create(output_path)
        .with_context(|| format!("creating index file at {}", output_path.display()))?;
    persistence::store(&index, BufWriter::new(file))?;
    tracing::info!(
        bands = index.num_bands(),
        path = %output_path.display(),
        "wrote index"
    );

    Ok(docs.len())
}

/// A fixed seed keeps `build` runs reproducible; callers that need fresh
/// randomness can still vary the hash family or banding parameters.
fn seed() -> u64 {
    0x5bd1_e995
}
