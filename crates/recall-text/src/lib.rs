//! recall-text
//!
//! Lexical side of retrieval: query normalization and synonym expansion,
//! token-overlap reranking, and a plain substring retriever.

pub mod rerank;
pub mod rewrite;
pub mod simple;

pub use rerank::rerank_by_overlap;
pub use rewrite::{QueryRewriter, SYNONYMS};
pub use simple::SimpleRetriever;
