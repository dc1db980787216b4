use std::sync::Arc;

use crate::error::Result;
use crate::types::{Embedding, SearchCandidate};

/// Turns text into fixed-dimension vectors.
///
/// One embedding per input, in input order, all of length [`Embedder::dim`].
/// An empty input returns an empty output.
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `fallback:xxh64:d384`).
    fn name(&self) -> &str;
    fn dim(&self) -> usize;
    fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>>;
}

/// Anything that answers `(query, k)` with a ranked candidate list.
pub trait Retriever: Send + Sync {
    fn name(&self) -> &'static str;
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchCandidate>>;
}

impl<T: Retriever + ?Sized> Retriever for Arc<T> {
    fn name(&self) -> &'static str { (**self).name() }
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchCandidate>> { (**self).search(query, k) }
}
