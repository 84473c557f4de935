//! Document normalization and shingling.
//!
//! Turns a raw document string into a set of 64-bit shingle fingerprints,
//! per the pre-processing flags the caller selects. Grounded on
//! `original_source/src/processing.py`'s `longcrc`/`to_shingles` and on
//! `src/matching/lsh.rs`'s `compute_shingles` shape (hash-then-insert into
//! a `HashSet`, no intermediate string allocation).

mod stopwords;

use crate::error::{DupDetectError, Result};
use std::collections::HashSet;

/// A 64-bit shingle fingerprint.
pub type Shingle = u64;

/// Pre-processing flags controlling normalization, filtering, and shingling.
///
/// `filter_stopwords` and `stopword_start` are mutually exclusive; enabling
/// both is a programmer error surfaced as [`DupDetectError::Config`] by
/// [`PreprocessFlags::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreprocessFlags {
    /// Shingle length in tokens (`k`).
    pub shingle_size: usize,
    /// ASCII-case-fold the text before tokenization.
    pub remove_capitalization: bool,
    /// Strip characters that are neither alphanumeric nor whitespace.
    pub filter_punctuation: bool,
    /// Remove stopword tokens before shingling.
    pub filter_stopwords: bool,
    /// After shingling, keep only shingles whose first token is a stopword.
    pub stopword_start: bool,
}

impl Default for PreprocessFlags {
    fn default() -> Self {
        Self {
            shingle_size: 3,
            remove_capitalization: false,
            filter_punctuation: false,
            filter_stopwords: false,
            stopword_start: false,
        }
    }
}

impl PreprocessFlags {
    /// The historical reference configuration: case-folding, punctuation
    /// stripping, and `stopword_start` enabled (`original_source/src/lsh.py`'s
    /// `self._filter`).
    #[must_use]
    pub fn reference() -> Self {
        Self {
            shingle_size: 3,
            remove_capitalization: true,
            filter_punctuation: true,
            filter_stopwords: false,
            stopword_start: true,
        }
    }

    /// Validate flag combinations, returning a [`DupDetectError::Config`] for
    /// spec violations (see spec.md §7, `ConfigError` row).
    pub fn validate(&self) -> Result<()> {
        if self.filter_stopwords && self.stopword_start {
            return Err(DupDetectError::config(
                "filter_stopwords and stopword_start are mutually exclusive",
            ));
        }
        if self.shingle_size == 0 {
            return Err(DupDetectError::config("shingle_size must be >= 1"));
        }
        Ok(())
    }
}

/// Normalize and shingle a document into a set of 64-bit fingerprints.
///
/// A document shorter than `flags.shingle_size` tokens yields the empty set.
pub fn to_shingles(doc: &str, flags: &PreprocessFlags) -> HashSet<Shingle> {
    let normalized = normalize(doc, flags);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let tokens = if flags.filter_stopwords {
        tokens
            .into_iter()
            .filter(|t| !stopwords::is_stopword(t))
            .collect()
    } else {
        tokens
    };

    let k = flags.shingle_size;
    let mut shingles = HashSet::new();
    if tokens.len() < k {
        return shingles;
    }

    for window in tokens.windows(k) {
        if flags.stopword_start && !stopwords::is_stopword(window[0]) {
            continue;
        }
        shingles.insert(longcrc(window));
    }
    shingles
}

/// Apply `remove_capitalization` and `filter_punctuation` to raw text.
fn normalize(doc: &str, flags: &PreprocessFlags) -> String {
    let mut out = String::with_capacity(doc.len());
    for c in doc.chars() {
        if flags.filter_punctuation && !(c.is_alphanumeric() || c.is_whitespace()) {
            continue;
        }
        if flags.remove_capitalization {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Combine two CRC-32s into a 64-bit fingerprint: the low 32 bits are the
/// CRC-32 of the space-joined token window in order, the high 32 bits are
/// the CRC-32 of the window joined in reverse order.
///
/// Reproduces `original_source/src/processing.py`'s `longcrc` bit-for-bit.
pub fn longcrc(tokens: &[&str]) -> u64 {
    let forward = tokens.join(" ");
    let reversed: Vec<&str> = tokens.iter().rev().copied().collect();
    let backward = reversed.join(" ");

    let low = u64::from(crc32fast::hash(forward.as_bytes()));
    let high = u64::from(crc32fast::hash(backward.as_bytes()));
    low | (high << 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_under_k_tokens() {
        let flags = PreprocessFlags::default();
        let shingles = to_shingles("a b", &flags);
        assert!(shingles.is_empty());
    }

    #[test]
    fn duplicate_shingles_collapse() {
        let flags = PreprocessFlags::default();
        // Windows: "a b c", "b c a", "c a b", "a b c" -- the repeated "a b c"
        // window collapses into the same shingle, leaving 3 distinct ones.
        let shingles = to_shingles("a b c a b c", &flags);
        assert_eq!(shingles.len(), 3);
    }

    #[test]
    fn stopword_start_keeps_only_matching_shingles() {
        let flags = PreprocessFlags {
            remove_capitalization: true,
            filter_punctuation: true,
            stopword_start: true,
            ..PreprocessFlags::default()
        };
        let shingles_kept = to_shingles("The quick brown", &flags);
        let shingles_dropped = to_shingles("quick brown fox", &flags);
        assert_eq!(shingles_kept.len(), 1);
        assert!(shingles_dropped.is_empty());
    }

    #[test]
    fn stopword_start_and_filter_stopwords_conflict() {
        let flags = PreprocessFlags {
            filter_stopwords: true,
            stopword_start: true,
            ..PreprocessFlags::default()
        };
        assert!(flags.validate().is_err());
    }

    #[test]
    fn longcrc_is_order_sensitive_but_deterministic() {
        let a = longcrc(&["a", "b", "c"]);
        let b = longcrc(&["a", "b", "c"]);
        let c = longcrc(&["c", "b", "a"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
