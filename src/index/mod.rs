//! The banded LSH index: construction, threshold query, and all-pairs
//! near-duplicate enumeration.
//!
//! Grounded on `original_source/src/lsh.py`'s `LSH` class (`index_gen`,
//! `query`, `get_all_similar_pairs`, `hash_band`) and on the teacher's
//! `src/matching/lsh.rs` (`LshIndex`, banded buckets keyed by band hash,
//! freeze-after-build). Band hashing follows spec.md §3 exactly (MD5 hex
//! digest of big-endian 8-byte words), not the teacher's `DefaultHasher`
//! shortcut, since the spec's round-trip and golden-vector tests depend on
//! the exact digest.

pub mod jaccard;
pub mod sensitivity;

use crate::error::{DupDetectError, Result};
use crate::hashing::HashFamily;
use crate::preprocess::{self, PreprocessFlags, Shingle};
use crate::signature::{self, Signature};
use jaccard::compute_jaccard;
use md5::{Digest, Md5};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Band buckets for one band: band-hash hex digest -> document ids, in
/// first-insertion order.
pub type Bucket = HashMap<String, Vec<usize>>;

/// A retained near-duplicate pair and its exact Jaccard similarity.
pub type PairResult = ((usize, usize), f64);

/// The banded LSH index over a fixed corpus.
///
/// Hash functions and documents are fixed at construction; buckets are
/// populated once and are thereafter read-only (§5: "freeze-after-build").
pub struct LshIndex {
    m: usize,
    r: usize,
    hash_functions: Vec<HashFamily>,
    docs: Vec<HashSet<Shingle>>,
    buckets: Vec<Bucket>,
    flags: PreprocessFlags,
}

impl LshIndex {
    /// Number of bands, `B = M / r`.
    #[must_use]
    pub fn num_bands(&self) -> usize {
        self.m / self.r
    }

    #[must_use]
    pub fn m(&self) -> usize {
        self.m
    }

    #[must_use]
    pub fn r(&self) -> usize {
        self.r
    }

    #[must_use]
    pub fn hash_functions(&self) -> &[HashFamily] {
        &self.hash_functions
    }

    #[must_use]
    pub fn docs(&self) -> &[HashSet<Shingle>] {
        &self.docs
    }

    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[must_use]
    pub fn preprocess_flags(&self) -> &PreprocessFlags {
        &self.flags
    }

    /// Validate `M`/`r` per spec.md §7's `ConfigError` row: `r` must be
    /// positive, `M >= r`, and `M` a multiple of `r` (the historical
    /// `M % r != 0` tail-dropping behavior is rejected rather than tolerated,
    /// per spec.md §9's open question).
    fn validate_bands(m: usize, r: usize) -> Result<()> {
        if r == 0 {
            return Err(DupDetectError::config("r must be greater than zero"));
        }
        if m < r {
            return Err(DupDetectError::config(format!(
                "M ({m}) must be >= r ({r})"
            )));
        }
        if m % r != 0 {
            return Err(DupDetectError::config(format!(
                "M ({m}) must be a multiple of r ({r})"
            )));
        }
        Ok(())
    }

    /// Build an index from raw document texts: shingles each document with
    /// `flags`, builds the signature matrix on a worker pool of size
    /// `threads`, and populates the band buckets.
    pub fn build(
        raw_docs: &[String],
        m: usize,
        r: usize,
        family_name: &str,
        flags: PreprocessFlags,
        threads: usize,
        seed: u64,
    ) -> Result<Self> {
        flags.validate()?;
        Self::validate_bands(m, r)?;

        let docs: Vec<HashSet<Shingle>> =
            raw_docs.iter().map(|d| preprocess::to_shingles(d, &flags)).collect();

        for (i, shingles) in docs.iter().enumerate() {
            if shingles.is_empty() {
                return Err(DupDetectError::empty_document(format!(
                    "document {i} has no shingles under the configured pre-processing flags"
                )));
            }
        }

        let (signatures, hash_functions) = signature::build_matrix(&docs, m, family_name, threads, seed)?;
        Self::from_parts(docs, signatures, hash_functions, m, r, flags)
    }

    /// Build an index from already-computed shingle sets and a signature
    /// matrix (spec.md §4.4, "Construction").
    pub fn from_parts(
        docs: Vec<HashSet<Shingle>>,
        signatures: Vec<Signature>,
        hash_functions: Vec<HashFamily>,
        m: usize,
        r: usize,
        flags: PreprocessFlags,
    ) -> Result<Self> {
        Self::validate_bands(m, r)?;
        if hash_functions.len() != m {
            return Err(DupDetectError::inconsistent_index(format!(
                "expected {m} hash functions, got {}",
                hash_functions.len()
            )));
        }

        let num_bands = m / r;
        let mut buckets: Vec<Bucket> = (0..num_bands).map(|_| HashMap::new()).collect();

        for (doc_id, sig) in signatures.iter().enumerate() {
            for (band_idx, bucket) in buckets.iter_mut().enumerate() {
                let hash = band_hash(sig, band_idx * r, r);
                bucket.entry(hash).or_default().push(doc_id);
            }
        }

        Ok(Self {
            m,
            r,
            hash_functions,
            docs,
            buckets,
            flags,
        })
    }

    /// Rehydrate an index from already-populated bucket tables (the
    /// persistence layer's load path, where the band hashes were computed by
    /// a prior run and must not be recomputed).
    pub fn from_buckets(
        docs: Vec<HashSet<Shingle>>,
        hash_functions: Vec<HashFamily>,
        buckets: Vec<Bucket>,
        m: usize,
        r: usize,
        flags: PreprocessFlags,
    ) -> Result<Self> {
        Self::validate_bands(m, r)?;
        if hash_functions.len() != m {
            return Err(DupDetectError::inconsistent_index(format!(
                "expected {m} hash functions, got {}",
                hash_functions.len()
            )));
        }
        let expected_bands = m / r;
        if buckets.len() != expected_bands {
            return Err(DupDetectError::inconsistent_index(format!(
                "expected {expected_bands} band tables, got {}",
                buckets.len()
            )));
        }
        Ok(Self {
            m,
            r,
            hash_functions,
            docs,
            buckets,
            flags,
        })
    }

    /// Compute the signature of a query document against this index's
    /// stored hash functions, re-applying the same pre-processing flags used
    /// at index creation (spec.md §4.4 step 1-2).
    fn query_signature(&self, query_shingles: &HashSet<Shingle>) -> Result<Signature> {
        signature::signature(query_shingles, &self.hash_functions)
    }

    /// Threshold query: return indexed document ids whose exact Jaccard
    /// similarity to `query_text` is strictly greater than `threshold`, in
    /// first-encountered order during candidate enumeration.
    pub fn query(&self, query_text: &str, threshold: f64) -> Result<Vec<usize>> {
        let query_shingles = preprocess::to_shingles(query_text, &self.flags);
        let sig = self.query_signature(&query_shingles)?;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for band_idx in 0..self.num_bands() {
            let hash = band_hash(&sig, band_idx * self.r, self.r);
            if let Some(ids) = self.buckets[band_idx].get(&hash) {
                for &id in ids {
                    if seen.insert(id) {
                        candidates.push(id);
                    }
                }
            }
        }

        Ok(candidates
            .into_iter()
            .filter(|&id| compute_jaccard(&query_shingles, &self.docs[id]) > threshold)
            .collect())
    }

    /// Enumerate all near-duplicate pairs with similarity strictly greater
    /// than `threshold`. Returns the unordered pair/similarity set, plus the
    /// same pairs sorted ascending by `(doc_id1, doc_id2)` for the CSV
    /// side-channel (spec.md §4.4, "All-pairs").
    pub fn all_pairs(&self, threshold: f64) -> AllPairsResult {
        let mut candidates: HashSet<(usize, usize)> = HashSet::new();
        for bucket in &self.buckets {
            for ids in bucket.values() {
                for (pos, &i) in ids.iter().enumerate() {
                    for &j in &ids[pos + 1..] {
                        let pair = if i < j { (i, j) } else { (j, i) };
                        candidates.insert(pair);
                    }
                }
            }
        }

        let docs = &self.docs;
        let mut pairs: Vec<PairResult> = candidates
            .into_par_iter()
            .filter_map(|(i, j)| {
                let sim = compute_jaccard(&docs[i], &docs[j]);
                (sim > threshold).then_some(((i, j), sim))
            })
            .collect();

        pairs.sort_by_key(|&((i, j), _)| (i, j));
        let sorted_pairs: Vec<(usize, usize)> = pairs.iter().map(|&(p, _)| p).collect();

        AllPairsResult { pairs, sorted_pairs }
    }
}

/// Result of [`LshIndex::all_pairs`].
#[derive(Debug, Clone)]
pub struct AllPairsResult {
    /// The retained pairs and their exact similarity (unordered set, sorted
    /// here only for deterministic test assertions).
    pub pairs: Vec<PairResult>,
    /// The side-channel CSV rows: retained pairs sorted ascending by
    /// `(doc_id1, doc_id2)`.
    pub sorted_pairs: Vec<(usize, usize)>,
}

impl AllPairsResult {
    /// Write the `doc_id1,doc_id2` side-channel table, sorted ascending by
    /// pair key, with a header row (spec.md §6).
    pub fn write_csv(&self, writer: impl std::io::Write) -> Result<()> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record(["doc_id1", "doc_id2"])?;
        for &(i, j) in &self.sorted_pairs {
            w.write_record([i.to_string(), j.to_string()])?;
        }
        w.flush().map_err(DupDetectError::from)?;
        Ok(())
    }
}

/// MD5 hex digest of the big-endian 8-byte encoding of `sig[start..start+r]`,
/// concatenated in positional order (spec.md §3, "Band hash").
#[must_use]
pub fn band_hash(sig: &[u64], start: usize, r: usize) -> String {
    let end = (start + r).min(sig.len());
    let mut hasher = Md5::new();
    for &value in &sig[start..end] {
        hasher.update(value.to_be_bytes());
    }
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(docs: &[&str], m: usize, r: usize, family: &str) -> Result<LshIndex> {
        let owned: Vec<String> = docs.iter().map(|s| s.to_string()).collect();
        LshIndex::build(&owned, m, r, family, PreprocessFlags::default(), 2, 1)
    }

    #[test]
    fn golden_band_hash_of_all_zero_band() {
        // spec.md §8 scenario 3: band_hash([0,0,0,0,0], 0) with r=5 is the
        // MD5 of forty zero bytes.
        let sig = vec![0u64; 5];
        let got = band_hash(&sig, 0, 5);
        let mut hasher = Md5::new();
        hasher.update([0u8; 40]);
        let expected: String = hasher.finalize().iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(got, expected);
        assert_eq!(got.len(), 32);
    }

    #[test]
    fn rejects_bad_band_parameters() {
        assert!(LshIndex::validate_bands(10, 0).is_err());
        assert!(LshIndex::validate_bands(3, 5).is_err());
        assert!(LshIndex::validate_bands(10, 3).is_err());
        assert!(LshIndex::validate_bands(10, 5).is_ok());
    }

    #[test]
    fn scenario_identical_docs_collide_in_every_band() {
        // spec.md §8 scenario 1.
        let index = build(&["a b c d", "a b c d", "x y z w"], 10, 2, "Xorhash").unwrap();
        let mut results = index.query("a b c d", 0.5).unwrap();
        results.sort_unstable();
        assert_eq!(results, vec![0, 1]);

        let all_pairs = index.all_pairs(0.5);
        assert_eq!(all_pairs.sorted_pairs, vec![(0, 1)]);
        assert_eq!(all_pairs.pairs.len(), 1);
        assert!((all_pairs.pairs[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_one_excludes_ties() {
        let index = build(&["a b c d", "a b c d"], 10, 2, "Xorhash").unwrap();
        let results = index.query("a b c d", 1.0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn out_of_vocabulary_query_is_empty_document_error() {
        let index = build(&["a b c d", "e f g h"], 10, 2, "Xorhash").unwrap();
        let result = index.query("x", 0.1);
        assert!(matches!(result, Err(DupDetectError::EmptyDocument { .. })));
    }

    #[test]
    fn m_equals_r_is_a_single_band() {
        let index = build(&["a b c d", "a b c d", "x y z w"], 4, 4, "Xorhash").unwrap();
        assert_eq!(index.num_bands(), 1);
        let results = index.query("a b c d", 0.5).unwrap();
        assert!(results.contains(&0));
        assert!(results.contains(&1));
    }

    #[test]
    fn m_zero_is_rejected() {
        let result = build(&["a b c d"], 0, 5, "Xorhash");
        assert!(matches!(result, Err(DupDetectError::Config(_))));
    }

    #[test]
    fn csv_side_channel_has_header_and_sorted_rows() {
        let index = build(&["a b c d", "a b c d", "x y z w"], 10, 2, "Xorhash").unwrap();
        let all_pairs = index.all_pairs(0.5);
        let mut buf = Vec::new();
        all_pairs.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "doc_id1,doc_id2");
        assert_eq!(lines.next().unwrap(), "0,1");
    }
}
