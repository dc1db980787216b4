//! Deterministic, non-semantic stand-in embedding.
//!
//! Coordinate `i` of a text's vector is `xxh64(seed = i, text bytes)` scaled
//! into `[0, 1)`. The hash is content-addressed with fixed seeds, so the same
//! text yields a bit-identical vector in every run and process. Nearness under
//! this embedding says nothing about meaning; it exists so the pipeline runs
//! reproducibly without a model.

use std::hash::Hasher;

use twox_hash::XxHash64;

use recall_core::traits::Embedder;
use recall_core::{Embedding, Result};

pub const FALLBACK_DIM: usize = 384;

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
    name: String,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim, name: format!("fallback:xxh64:d{dim}") }
    }

    pub fn embed_text(&self, text: &str) -> Embedding {
        (0..self.dim).map(|i| unit_hash(i as u64, text)).collect()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self { Self::new(FALLBACK_DIM) }
}

/// Top 24 bits of the hash over 2^24: exact in f32 and strictly below 1.0.
fn unit_hash(seed: u64, text: &str) -> f32 {
    let mut hasher = XxHash64::with_seed(seed);
    hasher.write(text.as_bytes());
    (hasher.finish() >> 40) as f32 / (1u64 << 24) as f32
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &str { &self.name }
    fn dim(&self) -> usize { self.dim }
    fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
