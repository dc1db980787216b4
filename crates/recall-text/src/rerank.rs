use std::collections::HashSet;

use recall_core::SearchCandidate;

fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase().split_whitespace().map(str::to_owned).collect()
}

/// Reorder candidates by how many distinct lowercase whitespace tokens they
/// share with `query`, most first. Candidates with equal overlap keep their
/// input order. Accepts anything that normalizes to a [`SearchCandidate`]
/// (bare strings, records, [`recall_core::CandidateInput`]).
pub fn rerank_by_overlap<I, C>(candidates: I, query: &str) -> Vec<SearchCandidate>
where
    I: IntoIterator<Item = C>,
    C: Into<SearchCandidate>,
{
    let query_tokens = token_set(query);
    let mut scored: Vec<(usize, SearchCandidate)> = candidates
        .into_iter()
        .map(Into::into)
        .map(|c: SearchCandidate| (token_set(&c.text).intersection(&query_tokens).count(), c))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, c)| c).collect()
}
