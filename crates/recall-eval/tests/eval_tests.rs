use std::io::Write;
use std::sync::Arc;

use recall_core::traits::Retriever;
use recall_core::{Chunk, Corpus, Error};
use recall_embed::{EmbeddingProvider, FALLBACK_DIM};
use recall_eval::{default_queries, evaluate, load_eval_set, LabeledQuery, FETCH_K, METRIC_K};
use recall_hybrid::HybridRetriever;
use recall_text::SimpleRetriever;
use recall_vector::VectorIndex;

fn corpus() -> Corpus {
    [
        "Depression is common and treatable.",
        "Breathing exercises help you manage anxiety.",
        "Offer support and encourage them to seek professional help.",
        "Sleep hygiene matters.",
    ]
    .iter()
    .enumerate()
    .map(|(i, t)| Chunk::new("guide.txt", i as u64, *t))
    .collect()
}

#[test]
fn default_set_has_three_labeled_queries() {
    let qs = default_queries();
    assert_eq!(qs.len(), 3);
    assert!(qs.iter().all(|q| !q.gt.is_empty()));
}

#[test]
fn evaluates_each_method_in_order() {
    let c = corpus();
    let simple = SimpleRetriever::new(c.clone());
    let index = Arc::new(VectorIndex::new(Arc::new(EmbeddingProvider::fallback(FALLBACK_DIM))));
    index.build(&c).expect("build");
    let hybrid = HybridRetriever::new(Arc::clone(&index));

    let retrievers: [&dyn Retriever; 3] = [&simple, &index, &hybrid];
    let report = evaluate(&retrievers, &default_queries(), FETCH_K, METRIC_K).expect("evaluate");
    let names: Vec<&str> = report.methods.iter().map(|m| m.method.as_str()).collect();
    assert_eq!(names, vec!["simple", "vector", "hybrid"]);

    // whole phrases never occur verbatim, so substring search finds nothing
    let s = report.method("simple").expect("simple");
    assert_eq!((s.precision, s.recall, s.mrr), (0.0, 0.0, 0.0));
    assert!(s.queries.iter().all(|q| q.retrieved == 0));

    // every chunk comes back from the vector paths, so each query has a hit
    for name in ["vector", "hybrid"] {
        let m = report.method(name).expect(name);
        assert!(m.queries.iter().all(|q| q.retrieved == c.len()));
        assert!(m.mrr > 0.0, "{name}");
    }
    // the rerank lifts the chunk sharing "depression" with the query to the top
    let first = &report.method("hybrid").expect("hybrid").queries[0];
    assert_eq!(first.mrr, 1.0);
    assert_eq!(first.recall, 1.0);

    let text = report.to_string();
    assert!(text.starts_with("method"));
    assert!(text.contains("P@3"));
    assert_eq!(text.lines().count(), 4);
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["methods"][2]["method"], "hybrid");
}

#[test]
fn loads_eval_set_from_json() {
    let mut f = tempfile::NamedTempFile::new().expect("tmp");
    write!(f, r#"[{{"q": "sleep", "gt": ["sleep hygiene"]}}, {{"q": "no labels"}}]"#).expect("write");
    let qs = load_eval_set(f.path()).expect("load");
    assert_eq!(qs[0], LabeledQuery::new("sleep", &["sleep hygiene"]));
    assert!(qs[1].gt.is_empty());

    let simple = SimpleRetriever::new(corpus());
    let retrievers: [&dyn Retriever; 1] = [&simple];
    let report = evaluate(&retrievers, &qs, FETCH_K, METRIC_K).expect("evaluate");
    let rows = &report.methods[0].queries;
    assert_eq!(rows[0].precision, 1.0);
    assert_eq!(rows[0].recall, 1.0);
    assert_eq!(rows[1].recall, 0.0);
}

#[test]
fn missing_eval_set_is_not_found() {
    let err = load_eval_set(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
