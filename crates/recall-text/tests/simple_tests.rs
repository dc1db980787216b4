use recall_core::{Chunk, Corpus};
use recall_text::SimpleRetriever;

fn corpus() -> Corpus {
    vec![
        Chunk::new("a.txt", 0, "Depression is common."),
        Chunk::new("a.txt", 1, "Anxiety is manageable."),
        Chunk::new("b.txt", 0, "Untreated DEPRESSION can recur."),
        Chunk::new("b.txt", 1, ""),
        Chunk::new("c.txt", 0, "Talk therapy helps depression and anxiety."),
    ]
    .into()
}

#[test]
fn matches_are_case_insensitive_in_corpus_order() {
    let r = SimpleRetriever::new(corpus());
    let hits = r.search("depression", 10);
    let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["Depression is common.", "Untreated DEPRESSION can recur.", "Talk therapy helps depression and anxiety."]);
    assert!(hits.iter().all(|h| h.score.is_none()));
}

#[test]
fn results_are_truncated_to_k() {
    let r = SimpleRetriever::new(corpus());
    assert_eq!(r.search("depression", 2).len(), 2);
    assert_eq!(r.search("depression", 2)[1].text, "Untreated DEPRESSION can recur.");
    assert!(r.search("depression", 0).is_empty());
}

#[test]
fn every_hit_contains_the_query() {
    let c = corpus();
    let r = SimpleRetriever::new(c.clone());
    for q in ["is", "ANX", "can", "therapy helps", "zzz"] {
        let hits = r.search(q, 10);
        assert!(hits.len() <= 10);
        assert!(hits.iter().all(|h| h.text.to_lowercase().contains(&q.to_lowercase())));
        // subsequence of the corpus
        let mut pos = 0;
        for h in &hits {
            let found = c[pos..].iter().position(|ch| ch.text == h.text).expect("hit comes from corpus");
            pos += found + 1;
        }
    }
}

#[test]
fn phrase_without_exact_substring_finds_nothing() {
    let r = SimpleRetriever::new(vec![Chunk::new("", 0, "Depression is common and treatable.")].into());
    assert!(r.search("signs of depression", 3).is_empty());
}

#[test]
fn empty_text_chunks_never_match_a_real_query() {
    let r = SimpleRetriever::new(corpus());
    assert!(r.search("a", 10).iter().all(|h| !h.text.is_empty()));
}
