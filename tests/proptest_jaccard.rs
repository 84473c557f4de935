//! Property-based tests for Jaccard similarity and MinHash signature
//! invariants. Ensures core algorithms handle arbitrary input without
//! panicking and that key mathematical invariants hold across random input.

use dupdetect::hashing::HashFamily;
use dupdetect::index::jaccard::compute_jaccard;
use dupdetect::preprocess::{longcrc, to_shingles, PreprocessFlags};
use dupdetect::signature::signature;
use proptest::prelude::*;
use rand::SeedableRng;
use std::collections::HashSet;

fn shingle_set_strategy() -> impl Strategy<Value = HashSet<u64>> {
    proptest::collection::hash_set(0u64..1000, 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn jaccard_is_bounded_and_symmetric(a in shingle_set_strategy(), b in shingle_set_strategy()) {
        let j_ab = compute_jaccard(&a, &b);
        let j_ba = compute_jaccard(&b, &a);
        prop_assert!((0.0..=1.0).contains(&j_ab));
        prop_assert_eq!(j_ab, j_ba);
    }

    #[test]
    fn jaccard_of_identical_nonempty_sets_is_one(a in proptest::collection::hash_set(0u64..1000, 1..30)) {
        prop_assert_eq!(compute_jaccard(&a, &a), 1.0);
    }

    #[test]
    fn longcrc_is_deterministic(tokens in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let first = longcrc(&refs);
        let second = longcrc(&refs);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn to_shingles_never_panics(text in "\\PC{0,200}", k in 1usize..5) {
        let flags = PreprocessFlags { shingle_size: k, ..PreprocessFlags::default() };
        let _ = to_shingles(&text, &flags);
    }

    #[test]
    fn minhash_signature_is_deterministic_for_same_shingles(
        shingles in shingle_set_strategy().prop_filter("non-empty", |s| !s.is_empty()),
        seed in any::<u64>(),
    ) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let hashes: Vec<HashFamily> = (0..8)
            .map(|_| HashFamily::random("Linconhash", &mut rng).unwrap())
            .collect();
        let sig1 = signature(&shingles, &hashes).unwrap();
        let sig2 = signature(&shingles, &hashes).unwrap();
        prop_assert_eq!(sig1, sig2);
    }
}
