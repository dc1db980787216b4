use std::path::Path;

use serde::{Deserialize, Serialize};

use recall_core::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledQuery {
    pub q: String,
    #[serde(default)]
    pub gt: Vec<String>,
}

impl LabeledQuery {
    pub fn new(q: &str, gt: &[&str]) -> Self {
        Self { q: q.to_string(), gt: gt.iter().map(|s| s.to_string()).collect() }
    }
}

/// The built-in demo set.
pub fn default_queries() -> Vec<LabeledQuery> {
    vec![
        LabeledQuery::new("signs of depression", &["depression is common"]),
        LabeledQuery::new("manage anxiety breathing", &["breathing exercises", "manage anxiety"]),
        LabeledQuery::new("support a friend with depression", &["support", "seek professional help"]),
    ]
}

/// Read `[{"q": "...", "gt": ["..."]}, ...]`.
pub fn load_eval_set(path: &Path) -> Result<Vec<LabeledQuery>> {
    if !path.exists() {
        return Err(Error::NotFound(format!("eval set {}", path.display())));
    }
    let queries: Vec<LabeledQuery> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    tracing::info!(path = %path.display(), queries = queries.len(), "loaded eval set");
    Ok(queries)
}
