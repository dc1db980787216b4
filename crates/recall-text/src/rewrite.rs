//! Query normalization and rule-based synonym expansion.

/// Normalized term -> alternate phrases, in expansion order.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("depression", &["depressive disorder", "low mood"]),
    ("anxiety", &["anxiety disorder", "worry"]),
    ("panic", &["panic attack"]),
];

#[derive(Debug, Clone, Copy)]
pub struct QueryRewriter {
    table: &'static [(&'static str, &'static [&'static str])],
}

impl Default for QueryRewriter {
    fn default() -> Self { Self { table: SYNONYMS } }
}

impl QueryRewriter {
    pub fn new() -> Self { Self::default() }

    /// Lowercase, turn every character outside `[a-z0-9]` into a separator,
    /// collapse separator runs to one space and trim.
    pub fn normalize(&self, query: &str) -> String {
        let spaced: String = query
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
            .collect();
        spaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// The normalized query followed by the synonyms of each of its tokens,
    /// in token then table order. Duplicates across tokens are kept.
    pub fn expand(&self, query: &str) -> String {
        let normalized = self.normalize(query);
        let extras: Vec<&str> = normalized
            .split(' ')
            .filter_map(|token| self.synonyms(token))
            .flatten()
            .copied()
            .collect();
        if extras.is_empty() {
            return normalized;
        }
        format!("{normalized} {}", extras.join(" "))
    }

    pub fn synonyms(&self, term: &str) -> Option<&'static [&'static str]> {
        self.table.iter().find(|(t, _)| *t == term).map(|(_, alts)| *alts)
    }
}
