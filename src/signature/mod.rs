//! MinHash signature computation and parallel signature-matrix construction.
//!
//! Grounded on `original_source/src/signature.py`'s `shingles_to_signature`/
//! `generate_signature_matrix` (a worker-pool fan-out over documents with
//! hash parameters drawn once up front) and on the teacher's `rayon` usage
//! for data-parallel, order-preserving work (`src/matching/lsh.rs`'s
//! `compute_minhash`, generalized here to a pluggable hash family and an
//! explicit worker-pool size).

use crate::error::{DupDetectError, Result};
use crate::hashing::HashFamily;
use crate::preprocess::Shingle;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::HashSet;

/// The MinHash signature of a document: position `i` holds
/// `min_{s in shingles} h_i(s)`.
pub type Signature = Vec<u64>;

/// Compute the length-`hashes.len()` MinHash signature of a shingle set.
///
/// Fails with [`DupDetectError::EmptyDocument`] if `shingles` is empty, per
/// spec.md §4.3.
pub fn signature(shingles: &HashSet<Shingle>, hashes: &[HashFamily]) -> Result<Signature> {
    if shingles.is_empty() {
        return Err(DupDetectError::empty_document(
            "signature requested for a document with no shingles",
        ));
    }

    Ok(hashes
        .iter()
        .map(|h| {
            shingles
                .iter()
                .map(|&s| h.calculate(s))
                .min()
                .expect("shingles is non-empty")
        })
        .collect())
}

/// Generate `m` fresh hash instances of `family_name`, drawn in order from a
/// single seeded RNG so the result is reproducible given the seed.
fn generate_hash_functions(family_name: &str, m: usize, seed: u64) -> Result<Vec<HashFamily>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| HashFamily::random(family_name, &mut rng))
        .collect()
}

/// Compute the signature matrix for a corpus of shingle sets.
///
/// Draws `m` hash-function parameters once, in order, before dispatching any
/// work (spec.md §5: "parallelism must not change results"), then computes
/// each document's signature on a worker pool of the requested size.
/// Signatures are reassembled in input order regardless of how the pool
/// schedules the work, since this map preserves index association.
///
/// `seed` controls reproducibility of the hash-function draw; callers that
/// need fresh, unpredictable parameters should derive it from entropy
/// (e.g. `rand::random()`) before calling.
pub fn build_matrix(
    docs: &[HashSet<Shingle>],
    m: usize,
    family_name: &str,
    threads: usize,
    seed: u64,
) -> Result<(Vec<Signature>, Vec<HashFamily>)> {
    let hashes = generate_hash_functions(family_name, m, seed)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| DupDetectError::config(format!("failed to build worker pool: {e}")))?;

    let signatures = pool.install(|| {
        docs.par_iter()
            .enumerate()
            .map(|(i, shingles)| {
                signature(shingles, &hashes)
                    .map_err(|e| DupDetectError::empty_document(format!("document {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()
    })?;

    Ok((signatures, hashes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_shingle_sets_yield_identical_signatures() {
        let a: HashSet<Shingle> = [1, 2, 3].into_iter().collect();
        let b: HashSet<Shingle> = [3, 2, 1].into_iter().collect();
        let hashes = generate_hash_functions("Xorhash", 8, 42).unwrap();
        assert_eq!(signature(&a, &hashes).unwrap(), signature(&b, &hashes).unwrap());
    }

    #[test]
    fn empty_shingle_set_is_an_error() {
        let empty: HashSet<Shingle> = HashSet::new();
        let hashes = generate_hash_functions("Xorhash", 4, 1).unwrap();
        assert!(matches!(
            signature(&empty, &hashes),
            Err(DupDetectError::EmptyDocument { .. })
        ));
    }

    #[test]
    fn build_matrix_preserves_input_order() {
        let docs: Vec<HashSet<Shingle>> = vec![
            [1, 2, 3].into_iter().collect(),
            [4, 5, 6].into_iter().collect(),
            [1, 2, 3].into_iter().collect(),
        ];
        let (sigs, hashes) = build_matrix(&docs, 16, "Linconhash", 4, 7).unwrap();
        assert_eq!(sigs.len(), 3);
        assert_eq!(hashes.len(), 16);
        // doc 0 and doc 2 have identical shingle sets -> identical signatures.
        assert_eq!(sigs[0], sigs[2]);
        assert_ne!(sigs[0], sigs[1]);
    }

    #[test]
    fn build_matrix_is_deterministic_given_the_same_seed() {
        let docs: Vec<HashSet<Shingle>> = vec![[1, 2, 3].into_iter().collect()];
        let (sigs1, _) = build_matrix(&docs, 10, "MD5hash", 2, 99).unwrap();
        let (sigs2, _) = build_matrix(&docs, 10, "MD5hash", 1, 99).unwrap();
        assert_eq!(sigs1, sigs2);
    }
}
