//! recall-hybrid
//!
//! Query expansion -> wide vector recall -> overlap rerank -> truncate.

pub mod service;

use std::sync::Arc;

use recall_core::traits::Retriever;
use recall_core::{Result, SearchCandidate};
use recall_text::{rerank_by_overlap, QueryRewriter};
use recall_vector::VectorIndex;

pub use service::{Method, RetrievalService};

/// Vector candidates fetched per query before reranking, independent of `k`.
pub const OVERFETCH: usize = 10;

#[derive(Clone)]
pub struct HybridRetriever {
    index: Arc<VectorIndex>,
    rewriter: QueryRewriter,
}

impl HybridRetriever {
    pub fn new(index: Arc<VectorIndex>) -> Self { Self { index, rewriter: QueryRewriter::new() } }

    /// At most `min(k, OVERFETCH, corpus size)` candidates. The expanded query
    /// only widens vector recall; the rerank scores against `query` as given.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchCandidate>> {
        if k == 0 { return Ok(Vec::new()); }
        let expanded = self.rewriter.expand(query);
        let wide = self.index.search(&expanded, OVERFETCH)?;
        let mut ranked = rerank_by_overlap(wide, query);
        ranked.truncate(k);
        tracing::debug!(query, expanded = %expanded, k, hits = ranked.len(), "hybrid search");
        Ok(ranked)
    }
}

impl Retriever for HybridRetriever {
    fn name(&self) -> &'static str { "hybrid" }
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchCandidate>> { HybridRetriever::search(self, query, k) }
}
