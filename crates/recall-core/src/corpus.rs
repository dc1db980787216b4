//! Ordered, immutable chunk collections loaded from the ingestion output.
//!
//! The on-disk shape is the JSON array written by the ingestion step:
//! `[{"source": "a.txt", "chunk_id": 0, "text": "..."}, ...]`.

use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::Chunk;

/// A corpus snapshot. Cloning is cheap and shares the underlying chunks.
#[derive(Debug, Clone)]
pub struct Corpus {
    chunks: Arc<[Chunk]>,
}

impl Corpus {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks: chunks.into() }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let chunks: Vec<Chunk> = serde_json::from_str(json)?;
        Ok(Self::new(chunks))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!("corpus file {}", path.display())));
        }
        let corpus = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), chunks = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    /// Like [`Corpus::load`], but a missing file yields an empty corpus.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(Error::NotFound(what)) => {
                tracing::info!("no {what}; starting with an empty corpus");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn chunks(&self) -> &[Chunk] { &self.chunks }

    pub fn texts(&self) -> Vec<String> { self.chunks.iter().map(|c| c.text.clone()).collect() }
}

impl Default for Corpus {
    fn default() -> Self { Self::new(Vec::new()) }
}

impl Deref for Corpus {
    type Target = [Chunk];
    fn deref(&self) -> &[Chunk] { &self.chunks }
}

impl From<Vec<Chunk>> for Corpus {
    fn from(chunks: Vec<Chunk>) -> Self { Self::new(chunks) }
}

impl FromIterator<Chunk> for Corpus {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self { Self::new(iter.into_iter().collect()) }
}
