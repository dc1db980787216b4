use recall_core::SearchCandidate;

/// Case-insensitive substring match, unlike the case-sensitive `gt in text`
/// check of the upstream evaluation script.
fn is_relevant(text: &str, ground_truth: &[String]) -> bool {
    let text = text.to_lowercase();
    ground_truth.iter().any(|gt| text.contains(&gt.to_lowercase()))
}

/// Share of the top-`k` results that contain at least one ground-truth snippet.
pub fn precision_at_k(results: &[SearchCandidate], ground_truth: &[String], k: usize) -> f64 {
    let top = &results[..k.min(results.len())];
    if top.is_empty() { return 0.0; }
    let relevant = top.iter().filter(|r| is_relevant(&r.text, ground_truth)).count();
    relevant as f64 / top.len() as f64
}

/// Share of ground-truth snippets found in any of the top-`k` results.
pub fn recall_at_k(results: &[SearchCandidate], ground_truth: &[String], k: usize) -> f64 {
    if ground_truth.is_empty() { return 0.0; }
    let top = &results[..k.min(results.len())];
    let hits = ground_truth
        .iter()
        .filter(|gt| { let gt = gt.to_lowercase(); top.iter().any(|r| r.text.to_lowercase().contains(&gt)) })
        .count();
    hits as f64 / ground_truth.len() as f64
}

/// Reciprocal rank of the first relevant result; 0 when none is relevant.
pub fn mrr(results: &[SearchCandidate], ground_truth: &[String]) -> f64 {
    results
        .iter()
        .position(|r| is_relevant(&r.text, ground_truth))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}
