//! recall-vector
//!
//! In-memory dense index over a corpus snapshot. `build` computes every
//! embedding off to the side and only then publishes the new snapshot, so a
//! concurrent `search` sees either the old snapshot or the new one in full,
//! and a failed build leaves the old one in place.

pub mod similarity;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use recall_core::traits::{Embedder, Retriever};
use recall_core::{Corpus, Embedding, Error, Result, SearchCandidate};

use crate::similarity::{cosine, top_k_stable};

/// Chunks and their embeddings, positionally aligned.
#[derive(Debug)]
pub struct Snapshot {
    corpus: Corpus,
    embeddings: Vec<Embedding>,
}

impl Snapshot {
    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn len(&self) -> usize { self.embeddings.len() }
    pub fn is_empty(&self) -> bool { self.embeddings.is_empty() }

    /// Rank every stored chunk against an already-embedded query.
    pub fn rank(&self, query_vec: &[f32], top_k: usize) -> Vec<SearchCandidate> {
        let scores: Vec<f32> = self.embeddings.iter().map(|v| cosine(v, query_vec)).collect();
        top_k_stable(&scores, top_k)
            .into_iter()
            .map(|i| SearchCandidate::scored(self.corpus[i].text.clone(), scores[i]))
            .collect()
    }
}

pub struct VectorIndex {
    embedder: Arc<dyn Embedder>,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder, snapshot: RwLock::new(None) }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> { &self.embedder }

    /// Replace the snapshot with one built from `corpus`. All-or-nothing: on
    /// any embedding error the previous snapshot stays published.
    pub fn build(&self, corpus: &Corpus) -> Result<()> {
        let start = Instant::now();
        let embeddings = self.embedder.encode(&corpus.texts())?;
        if embeddings.len() != corpus.len() {
            return Err(Error::DimensionMismatch { expected: corpus.len(), actual: embeddings.len() });
        }
        let dim = self.embedder.dim();
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dim) {
            return Err(Error::DimensionMismatch { expected: dim, actual: bad.len() });
        }
        let next = Arc::new(Snapshot { corpus: corpus.clone(), embeddings });
        *self.snapshot.write() = Some(next);
        tracing::info!(
            chunks = corpus.len(), dim, provider = self.embedder.name(),
            elapsed_ms = start.elapsed().as_millis() as u64, "vector index built"
        );
        Ok(())
    }

    /// The currently published snapshot, if any. Holding the `Arc` pins it for
    /// as long as the caller needs a consistent view.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> { self.snapshot.read().clone() }

    pub fn is_built(&self) -> bool { self.snapshot.read().is_some() }

    pub fn len(&self) -> usize { self.snapshot().map_or(0, |s| s.len()) }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The corpus behind the current snapshot (empty when unbuilt).
    pub fn corpus(&self) -> Corpus { self.snapshot().map(|s| s.corpus.clone()).unwrap_or_default() }

    /// Top `top_k` chunks by cosine similarity to `query`, highest first, ties
    /// in corpus order. Unbuilt or empty index, or `top_k == 0`, gives `[]`.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchCandidate>> {
        let Some(snapshot) = self.snapshot() else { return Ok(Vec::new()) };
        if top_k == 0 || snapshot.is_empty() { return Ok(Vec::new()); }

        let query_vec = self.embedder.encode(&[query.to_string()])?
            .pop()
            .ok_or_else(|| Error::Embedding("provider returned no vector for the query".into()))?;
        let dim = self.embedder.dim();
        if query_vec.len() != dim {
            return Err(Error::DimensionMismatch { expected: dim, actual: query_vec.len() });
        }
        let hits = snapshot.rank(&query_vec, top_k);
        tracing::debug!(query, top_k, hits = hits.len(), "vector search");
        Ok(hits)
    }
}

impl Retriever for VectorIndex {
    fn name(&self) -> &'static str { "vector" }
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchCandidate>> { VectorIndex::search(self, query, k) }
}
