//! Approximate keyword matching.
//!
//! `FuzzyIndex` is the typo-tolerant complement to exact substring matching.
//! It is built once at startup from the flattened keyword index and scored
//! with normalized Damerau-Levenshtein distance (`strsim`), which counts the
//! transpositions that dominate real typos ("jam brapa", "hallo").
//!
//! Keywords are usually much shorter than the utterance, so comparing a
//! keyword against the whole utterance would drown the signal in length
//! difference. Instead each keyword is compared against every window of the
//! same word count in the utterance (and the whole utterance, which covers
//! short inputs), keeping the best window. The resulting score is a bounded
//! distance in `[0, 1]`: 0 is identical, lower is better. The resolver
//! discards anything above its acceptance ceiling.

use crate::engine::store::{KeywordEntry, RuleStore};
use strsim::normalized_damerau_levenshtein;

/// One ranked hit from a fuzzy query.
#[derive(Debug, Clone)]
pub(crate) struct FuzzyHit {
    pub keyword: String,
    pub rule_id: String,
    pub priority: i32,
    /// Bounded distance score; 0 = identical, 1 = nothing in common.
    pub score: f64,
}

#[derive(Debug)]
pub(crate) struct FuzzyIndex {
    entries: Vec<KeywordEntry>,
}

impl FuzzyIndex {
    /// Snapshot the store's keyword index. Construction happens once at
    /// engine startup; queries never touch the store again.
    pub fn new(store: &RuleStore) -> Self {
        FuzzyIndex { entries: store.keyword_index().to_vec() }
    }

    /// Rank every indexed keyword against `query` (assumed lowercased).
    ///
    /// Hits are sorted by score ascending, then rule priority descending.
    /// No ceiling is applied here; callers filter.
    pub fn search(&self, query: &str) -> Vec<FuzzyHit> {
        let query_words: Vec<&str> = query.split_whitespace().collect();

        let mut hits: Vec<FuzzyHit> = self
            .entries
            .iter()
            .map(|entry| FuzzyHit {
                keyword: entry.keyword.clone(),
                rule_id: entry.rule_id.clone(),
                priority: entry.priority,
                score: keyword_distance(&entry.keyword, query, &query_words),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score.total_cmp(&b.score).then_with(|| b.priority.cmp(&a.priority))
        });
        hits
    }
}

/// Best (lowest) distance between `keyword` and any same-word-count window of
/// the query, or the whole query.
fn keyword_distance(keyword: &str, query: &str, query_words: &[&str]) -> f64 {
    let mut best = normalized_damerau_levenshtein(keyword, query);

    let width = keyword.split_whitespace().count().max(1);
    if query_words.len() >= width {
        for window in query_words.windows(width) {
            let joined = window.join(" ");
            let similarity = normalized_damerau_levenshtein(keyword, &joined);
            if similarity > best {
                best = similarity;
            }
        }
    }

    1.0 - best
}
