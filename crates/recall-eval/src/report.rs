use std::fmt;

use serde::Serialize;

use recall_core::traits::Retriever;
use recall_core::Result;

use crate::dataset::LabeledQuery;
use crate::metrics::{mrr, precision_at_k, recall_at_k};

#[derive(Debug, Clone, Serialize)]
pub struct QueryMetrics {
    pub query: String,
    pub retrieved: usize,
    pub precision: f64,
    pub recall: f64,
    pub mrr: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub precision: f64,
    pub recall: f64,
    pub mrr: f64,
    pub queries: Vec<QueryMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub fetch_k: usize,
    pub metric_k: usize,
    pub methods: Vec<MethodSummary>,
}

impl EvalReport {
    pub fn method(&self, name: &str) -> Option<&MethodSummary> { self.methods.iter().find(|m| m.method == name) }
}

fn mean(xs: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = xs.fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Run every query through every retriever and average the metrics per method.
///
/// Each retriever is asked for `fetch_k` results; precision and recall look
/// at the first `metric_k`, MRR at everything returned.
pub fn evaluate(retrievers: &[&dyn Retriever], queries: &[LabeledQuery], fetch_k: usize, metric_k: usize) -> Result<EvalReport> {
    let mut methods = Vec::with_capacity(retrievers.len());
    for retriever in retrievers {
        let mut rows = Vec::with_capacity(queries.len());
        for lq in queries {
            let results = retriever.search(&lq.q, fetch_k)?;
            rows.push(QueryMetrics {
                query: lq.q.clone(),
                retrieved: results.len(),
                precision: precision_at_k(&results, &lq.gt, metric_k),
                recall: recall_at_k(&results, &lq.gt, metric_k),
                mrr: mrr(&results, &lq.gt),
            });
        }
        let summary = MethodSummary {
            method: retriever.name().to_string(),
            precision: mean(rows.iter().map(|r| r.precision)),
            recall: mean(rows.iter().map(|r| r.recall)),
            mrr: mean(rows.iter().map(|r| r.mrr)),
            queries: rows,
        };
        tracing::debug!(method = %summary.method, precision = summary.precision, recall = summary.recall, mrr = summary.mrr, "evaluated");
        methods.push(summary);
    }
    Ok(EvalReport { fetch_k, metric_k, methods })
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = self.metric_k;
        writeln!(f, "{:<8} {:>8} {:>8} {:>8}", "method", format!("P@{k}"), format!("R@{k}"), "MRR")?;
        for m in &self.methods {
            writeln!(f, "{:<8} {:>8.3} {:>8.3} {:>8.3}", m.method, m.precision, m.recall, m.mrr)?;
        }
        Ok(())
    }
}
