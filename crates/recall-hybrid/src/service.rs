//! Async front for the retrievers.
//!
//! Index builds and every search run on tokio's blocking pool, so model
//! inference never stalls the runtime threads serving other requests. All
//! searches read whatever snapshot is published when they start.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use recall_core::config::EmbeddingSettings;
use recall_core::traits::{Embedder, Retriever};
use recall_core::{Corpus, Error, Result, SearchCandidate};
use recall_embed::select_provider;
use recall_text::SimpleRetriever;
use recall_vector::VectorIndex;

use crate::HybridRetriever;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Simple,
    Vector,
    Hybrid,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Simple, Method::Vector, Method::Hybrid];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Simple => "simple",
            Method::Vector => "vector",
            Method::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Method {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Method::Simple),
            "vector" => Ok(Method::Vector),
            "hybrid" => Ok(Method::Hybrid),
            other => Err(Error::InvalidConfig(format!("unknown retrieval method '{other}' (simple|vector|hybrid)"))),
        }
    }
}

#[derive(Clone)]
pub struct RetrievalService {
    index: Arc<VectorIndex>,
}

impl RetrievalService {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self { Self::from_index(Arc::new(VectorIndex::new(embedder))) }

    /// Select the embedding provider once, per the settings, and wrap it.
    pub async fn from_settings(settings: &EmbeddingSettings) -> Self { Self::new(Arc::new(select_provider(settings).await)) }

    pub fn from_index(index: Arc<VectorIndex>) -> Self { Self { index } }

    pub fn index(&self) -> &Arc<VectorIndex> { &self.index }

    /// Retriever for `method` over the current snapshot.
    pub fn retriever(&self, method: Method) -> Box<dyn Retriever> {
        match method {
            Method::Simple => Box::new(SimpleRetriever::new(self.index.corpus())),
            Method::Vector => Box::new(Arc::clone(&self.index)),
            Method::Hybrid => Box::new(HybridRetriever::new(Arc::clone(&self.index))),
        }
    }

    pub async fn rebuild(&self, corpus: Corpus) -> Result<()> {
        let index = Arc::clone(&self.index);
        run_blocking(move || index.build(&corpus)).await
    }

    pub async fn search(&self, method: Method, query: impl Into<String>, k: usize) -> Result<Vec<SearchCandidate>> {
        let retriever = self.retriever(method);
        let query = query.into();
        run_blocking(move || retriever.search(&query, k)).await
    }
}

async fn run_blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| Error::Operation(format!("retrieval worker failed: {e}")))?
}
