use recall_core::traits::Retriever;
use recall_core::{Corpus, Result, SearchCandidate};

/// Case-insensitive substring filter over the corpus, in corpus order.
/// No ranking: the first `k` matching chunks are returned as they appear.
#[derive(Debug, Clone, Default)]
pub struct SimpleRetriever {
    corpus: Corpus,
}

impl SimpleRetriever {
    pub fn new(corpus: Corpus) -> Self { Self { corpus } }

    pub fn search(&self, query: &str, k: usize) -> Vec<SearchCandidate> {
        let needle = query.to_lowercase();
        let hits: Vec<SearchCandidate> = self.corpus
            .iter()
            .filter(|c| c.text.to_lowercase().contains(&needle))
            .take(k)
            .map(SearchCandidate::from)
            .collect();
        tracing::debug!(query, k, hits = hits.len(), "substring search");
        hits
    }
}

impl Retriever for SimpleRetriever {
    fn name(&self) -> &'static str { "simple" }
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchCandidate>> { Ok(SimpleRetriever::search(self, query, k)) }
}
