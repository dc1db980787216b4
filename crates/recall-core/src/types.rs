//! Domain types shared by the retrieval engines.

use serde::{Deserialize, Serialize};

/// A fixed-length vector produced by an embedding provider.
pub type Embedding = Vec<f32>;

/// A unit of source text with provenance, the atomic unit of retrieval.
///
/// - `source_id`: name of the originating document (`source` on the wire)
/// - `chunk_id`: position of the chunk within its source
/// - `text`: the payload; a missing `text` key deserializes to `""`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(rename = "source", alias = "source_id", default)]
    pub source_id: String,
    #[serde(default)]
    pub chunk_id: u64,
    #[serde(default)]
    pub text: String,
}

impl Chunk {
    pub fn new(source_id: impl Into<String>, chunk_id: u64, text: impl Into<String>) -> Self {
        Self { source_id: source_id.into(), chunk_id, text: text.into() }
    }
}

/// The result record flowing between retrieval stages.
///
/// Only `text` is required downstream; `score` is informational and its
/// meaning depends on the stage that produced it (cosine similarity for
/// vector search, absent for substring matches).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl SearchCandidate {
    pub fn new(text: impl Into<String>, score: Option<f32>) -> Self {
        Self { text: text.into(), score }
    }

    pub fn scored(text: impl Into<String>, score: f32) -> Self {
        Self::new(text, Some(score))
    }
}

/// Candidate shapes accepted at ingress: a bare string or a record with a
/// `text` field. Both normalize to [`SearchCandidate`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CandidateInput {
    Text(String),
    Record(SearchCandidate),
}

impl From<CandidateInput> for SearchCandidate {
    fn from(input: CandidateInput) -> Self {
        match input {
            CandidateInput::Text(text) => SearchCandidate::new(text, None),
            CandidateInput::Record(record) => record,
        }
    }
}

impl From<&str> for SearchCandidate {
    fn from(text: &str) -> Self { SearchCandidate::new(text, None) }
}

impl From<String> for SearchCandidate {
    fn from(text: String) -> Self { SearchCandidate::new(text, None) }
}

impl From<&Chunk> for SearchCandidate {
    fn from(chunk: &Chunk) -> Self { SearchCandidate::new(chunk.text.clone(), None) }
}
