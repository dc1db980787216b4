//! recall-eval
//!
//! Offline comparison of retrieval methods on a small labeled query set.
//! A result counts as relevant when its text contains a ground-truth snippet
//! (case-insensitive).

pub mod dataset;
pub mod metrics;
pub mod report;

pub use dataset::{default_queries, load_eval_set, LabeledQuery};
pub use metrics::{mrr, precision_at_k, recall_at_k};
pub use report::{evaluate, EvalReport, MethodSummary, QueryMetrics};

/// Results requested from each retriever per query.
pub const FETCH_K: usize = 5;
/// Cut-off for precision and recall.
pub const METRIC_K: usize = 3;
