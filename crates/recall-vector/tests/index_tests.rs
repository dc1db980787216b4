use std::sync::Arc;

use recall_core::traits::Embedder;
use recall_core::{Chunk, Corpus, Embedding, Error, Result};
use recall_embed::{EmbeddingProvider, FALLBACK_DIM};
use recall_vector::VectorIndex;

/// Maps each known keyword to an axis; a text's vector counts keyword hits.
/// `"boom"` makes the provider fail, to exercise build atomicity.
struct KeywordEmbedder;

const AXES: [&str; 3] = ["fire", "water", "shelter"];

impl Embedder for KeywordEmbedder {
    fn name(&self) -> &str { "keyword" }
    fn dim(&self) -> usize { AXES.len() }
    fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        texts.iter().map(|t| {
            if t.contains("boom") { return Err(Error::Embedding("boom".into())); }
            Ok(AXES.iter().map(|a| t.split_whitespace().filter(|w| w == a).count() as f32).collect())
        }).collect()
    }
}

/// Returns vectors of the wrong length.
struct ShortEmbedder;

impl Embedder for ShortEmbedder {
    fn name(&self) -> &str { "short" }
    fn dim(&self) -> usize { 4 }
    fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> { Ok(texts.iter().map(|_| vec![1.0; 3]).collect()) }
}

fn corpus(texts: &[&str]) -> Corpus {
    texts.iter().enumerate().map(|(i, t)| Chunk::new("test.txt", i as u64, *t)).collect()
}

fn fallback_index() -> VectorIndex {
    VectorIndex::new(Arc::new(EmbeddingProvider::fallback(FALLBACK_DIM)))
}

#[test]
fn unbuilt_and_empty_indexes_return_nothing() {
    let index = fallback_index();
    assert!(!index.is_built());
    for k in [0, 1, 10] { assert!(index.search("anything", k).expect("search").is_empty()); }

    index.build(&Corpus::default()).expect("build empty");
    assert!(index.is_built());
    assert!(index.is_empty());
    assert!(index.search("anything", 5).expect("search").is_empty());
}

#[test]
fn results_are_bounded_and_sorted() {
    let index = fallback_index();
    let c = corpus(&["alpha", "bravo", "charlie", "delta", "echo"]);
    index.build(&c).expect("build");

    assert_eq!(index.search("query", 3).expect("search").len(), 3);
    assert!(index.search("query", 0).expect("search").is_empty());
    let all = index.search("query", 50).expect("search");
    assert_eq!(all.len(), c.len(), "top_k beyond corpus returns the whole corpus");
    for w in all.windows(2) { assert!(w[0].score >= w[1].score); }
    assert!(all.iter().all(|h| h.score.is_some()));
}

#[test]
fn ranks_by_cosine_with_ties_in_corpus_order() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index.build(&corpus(&[
        "water water",          // 0: pure water
        "fire",                 // 1: pure fire
        "fire water",           // 2: mixed
        "fire fire",            // 3: pure fire, same direction as 1
        "nothing relevant",     // 4: zero vector
    ])).expect("build");

    let hits = index.search("fire", 10).expect("search");
    let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["fire", "fire fire", "fire water", "water water", "nothing relevant"]);
    assert!((hits[0].score.unwrap_or_default() - 1.0).abs() < 1e-5);
    assert_eq!(hits[0].score, hits[1].score);
    assert_eq!(hits[4].score, Some(0.0));
}

#[test]
fn failed_build_keeps_previous_snapshot() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index.build(&corpus(&["fire", "water"])).expect("build");
    let before = index.snapshot().expect("built");

    let err = index.build(&corpus(&["shelter", "boom", "fire"])).unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
    let after = index.snapshot().expect("still built");
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(index.len(), 2);
}

#[test]
fn wrong_dimension_aborts_build() {
    let index = VectorIndex::new(Arc::new(ShortEmbedder));
    let err = index.build(&corpus(&["a"])).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 4, actual: 3 }));
    assert!(!index.is_built());
}

#[test]
fn rebuild_fully_replaces_snapshot() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index.build(&corpus(&["fire", "water", "shelter"])).expect("build");
    let pinned = index.snapshot().expect("built");
    index.build(&corpus(&["water"])).expect("rebuild");

    assert_eq!(index.len(), 1);
    assert_eq!(index.search("fire", 10).expect("search").len(), 1);
    // a reader holding the old snapshot still sees it whole
    assert_eq!(pinned.len(), 3);
    assert_eq!(pinned.corpus()[2].text, "shelter");
}

#[test]
fn single_chunk_fallback_search() {
    let index = fallback_index();
    index.build(&corpus(&["Depression is common and treatable."])).expect("build");
    let hits = index.search("signs of depression depressive disorder low mood", 10).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "Depression is common and treatable.");
}
