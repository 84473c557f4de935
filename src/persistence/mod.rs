//! Full-snapshot persistence for the LSH index.
//!
//! Grounded on `original_source/src/lsh.py`'s `load_index`/`store_index`
//! (a single JSON document holding `M`, `r`, `docs`, `hashfunctions`, and
//! `index`). Per spec.md §9's open question, `preprocess_flags` is an added
//! field so a query issued after `load` doesn't silently fall back to
//! default flags; it is optional on read so snapshots written before this
//! extension still load.

use crate::error::{DupDetectError, Result};
use crate::hashing::HashFamily;
use crate::index::LshIndex;
use crate::preprocess::PreprocessFlags;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

/// The wire format of a full index snapshot (spec.md §4.6).
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedIndex {
    #[serde(rename = "M")]
    pub m: usize,
    pub r: usize,
    pub docs: Vec<Vec<u64>>,
    pub hashfunctions: Vec<String>,
    pub index: Vec<HashMap<String, Vec<usize>>>,
    #[serde(default)]
    pub preprocess_flags: Option<PreprocessFlags>,
}

impl PersistedIndex {
    /// Snapshot an in-memory index.
    #[must_use]
    pub fn from_index(index: &LshIndex) -> Self {
        Self {
            m: index.m(),
            r: index.r(),
            docs: index
                .docs()
                .iter()
                .map(|s| s.iter().copied().collect())
                .collect(),
            hashfunctions: index.hash_functions().iter().map(HashFamily::store).collect(),
            index: index.buckets().to_vec(),
            preprocess_flags: Some(*index.preprocess_flags()),
        }
    }

    /// Rehydrate an [`LshIndex`] from this snapshot, validating shape
    /// invariants (spec.md §7, `InconsistentIndex`) and hash-tag parsing
    /// (`MalformedTag`) before accepting it.
    pub fn into_index(self) -> Result<LshIndex> {
        if self.hashfunctions.len() != self.m {
            return Err(DupDetectError::inconsistent_index(format!(
                "snapshot has {} hash functions but M={}",
                self.hashfunctions.len(),
                self.m
            )));
        }
        if self.r == 0 {
            return Err(DupDetectError::config("r must be greater than zero"));
        }
        let expected_bands = self.m / self.r;
        if self.index.len() != expected_bands {
            return Err(DupDetectError::inconsistent_index(format!(
                "snapshot has {} band tables but M/r={}",
                self.index.len(),
                expected_bands
            )));
        }

        let hash_functions: Vec<HashFamily> = self
            .hashfunctions
            .iter()
            .map(|tag| HashFamily::load(tag))
            .collect::<Result<_>>()?;

        let docs: Vec<HashSet<u64>> = self
            .docs
            .into_iter()
            .map(|shingles| shingles.into_iter().collect())
            .collect();

        let flags = self.preprocess_flags.unwrap_or_default();

        LshIndex::from_buckets(docs, hash_functions, self.index, self.m, self.r, flags)
    }
}

/// Write an index snapshot as JSON to `writer`.
pub fn store(index: &LshIndex, writer: impl Write) -> Result<()> {
    let snapshot = PersistedIndex::from_index(index);
    serde_json::to_writer(writer, &snapshot)?;
    Ok(())
}

/// Read an index snapshot as JSON from `reader`.
pub fn load(reader: impl Read) -> Result<LshIndex> {
    let snapshot: PersistedIndex = serde_json::from_reader(reader)?;
    snapshot.into_index()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::PreprocessFlags;

    #[test]
    fn round_trips_an_index() {
        let docs = vec!["a b c d".to_string(), "a b c d".to_string(), "x y z w".to_string()];
        let index =
            LshIndex::build(&docs, 10, 2, "Xorhash", PreprocessFlags::default(), 2, 3).unwrap();

        let mut buf = Vec::new();
        store(&index, &mut buf).unwrap();
        let loaded = load(buf.as_slice()).unwrap();

        assert_eq!(loaded.m(), index.m());
        assert_eq!(loaded.r(), index.r());
        assert_eq!(loaded.docs(), index.docs());

        let mut results_before = index.query("a b c d", 0.5).unwrap();
        let mut results_after = loaded.query("a b c d", 0.5).unwrap();
        results_before.sort_unstable();
        results_after.sort_unstable();
        assert_eq!(results_before, results_after);
    }

    #[test]
    fn rejects_mismatched_hash_function_count() {
        let snapshot = PersistedIndex {
            m: 10,
            r: 2,
            docs: vec![vec![1, 2, 3]],
            hashfunctions: vec!["Xorhash_1".to_string()],
            index: vec![HashMap::new(); 5],
            preprocess_flags: None,
        };
        assert!(matches!(
            snapshot.into_index(),
            Err(DupDetectError::InconsistentIndex(_))
        ));
    }

    #[test]
    fn rejects_malformed_hash_tag() {
        let snapshot = PersistedIndex {
            m: 1,
            r: 1,
            docs: vec![vec![1]],
            hashfunctions: vec!["NotAFamily_1".to_string()],
            index: vec![HashMap::new()],
            preprocess_flags: None,
        };
        assert!(matches!(
            snapshot.into_index(),
            Err(DupDetectError::MalformedTag { .. })
        ));
    }
}
