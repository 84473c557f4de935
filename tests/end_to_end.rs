//! End-to-end lifecycle: build an index, persist it, reload it, query it,
//! and enumerate near-duplicate pairs — mirroring the original news-article
//! corpus walkthrough (build -> sensitivity -> store -> load -> query ->
//! all-pairs).

use dupdetect::index::sensitivity::compute_sensitivity;
use dupdetect::preprocess::PreprocessFlags;
use dupdetect::{persistence, LshIndex};

fn news_corpus() -> Vec<String> {
    vec![
        "the peseta nosedived to a new all time low on the forex market friday".to_string(),
        "the peseta nosedived to a new all time low on the forex market friday afternoon"
            .to_string(),
        "goldman sachs has been charged with fraud and asian stocks tumbled monday".to_string(),
        "your work computer just suffered a major meltdown from a virus".to_string(),
        "the federal reserve chairman suggested monetary policy would remain unchanged"
            .to_string(),
    ]
}

#[test]
fn full_lifecycle_build_store_load_query_all_pairs() {
    let docs = news_corpus();
    let index = LshIndex::build(&docs, 100, 5, "Xorhash", PreprocessFlags::reference(), 2, 7)
        .expect("corpus builds");

    let (p1, p2) = compute_sensitivity(0.3, 0.8, index.m(), index.r());
    assert!((0.0..=1.0).contains(&p1));
    assert!((0.0..=1.0).contains(&p2));

    let mut buf = Vec::new();
    persistence::store(&index, &mut buf).expect("index stores");
    let reloaded = persistence::load(buf.as_slice()).expect("index loads");

    let query = "the peseta nosedived to a new all time low on the forex market friday";
    let mut matches = reloaded.query(query, 0.5).expect("query succeeds");
    matches.sort_unstable();
    assert!(matches.contains(&0));
    assert!(matches.contains(&1));

    let all_pairs = reloaded.all_pairs(0.5);
    assert!(all_pairs
        .pairs
        .iter()
        .any(|&((i, j), score)| (i, j) == (0, 1) && score > 0.5));
}

#[test]
fn different_hash_families_agree_on_which_docs_are_near_duplicates() {
    let docs = news_corpus();
    for family in ["Xorhash", "Linconhash", "MD5hash"] {
        let index = LshIndex::build(&docs, 60, 3, family, PreprocessFlags::default(), 2, 11)
            .unwrap_or_else(|e| panic!("{family} builds: {e}"));
        let results = index
            .query(&docs[0], 0.3)
            .unwrap_or_else(|e| panic!("{family} queries: {e}"));
        assert!(
            results.contains(&0),
            "{family} should find the query document itself among near-duplicates"
        );
    }
}

#[test]
fn persisted_snapshot_is_readable_json_with_expected_shape() {
    let docs = news_corpus();
    let index = LshIndex::build(&docs, 20, 4, "Linconhash", PreprocessFlags::default(), 1, 3)
        .expect("corpus builds");

    let mut buf = Vec::new();
    persistence::store(&index, &mut buf).expect("index stores");
    let json: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");

    assert_eq!(json["M"], 20);
    assert_eq!(json["r"], 4);
    assert_eq!(json["hashfunctions"].as_array().unwrap().len(), 20);
    assert_eq!(json["docs"].as_array().unwrap().len(), docs.len());
    assert_eq!(json["index"].as_array().unwrap().len(), 5);
}
