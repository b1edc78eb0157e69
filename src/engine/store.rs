//! Rule storage and indexing.
//!
//! `RuleStore` is the static side of the engine: built once from a validated
//! [`RuleSet`](crate::RuleSet), it keeps the matching-eligible rules sorted by
//! priority (descending, stable) and a flattened keyword index, one entry
//! per (keyword, rule) pair, that the fuzzy index consumes. Auxiliary
//! records (priority < 0) are kept only for their data payload and never
//! participate in matching.

use crate::Rule;
use crate::config::{FALLBACK_RULE_ID, SUGGESTIONS_RULE_ID, RuleSet};
use std::collections::HashMap;

/// One entry of the flattened keyword index.
#[derive(Debug, Clone)]
pub(crate) struct KeywordEntry {
    pub keyword: String,
    pub rule_id: String,
    pub priority: i32,
}

#[derive(Debug)]
pub(crate) struct RuleStore {
    /// All rules, matchable ones first in priority order.
    rules: Vec<Rule>,
    by_id: HashMap<String, usize>,
    /// Number of leading entries in `rules` that participate in matching.
    matchable_len: usize,
    keyword_index: Vec<KeywordEntry>,
    suggestions: Vec<String>,
}

impl RuleStore {
    pub fn new(set: &RuleSet) -> Self {
        let mut rules: Vec<Rule> = set.rules().iter().filter(|r| r.is_matchable()).cloned().collect();
        // Stable sort keeps the configured order as the final tie-break.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        let matchable_len = rules.len();
        rules.extend(set.rules().iter().filter(|r| !r.is_matchable()).cloned());

        let by_id: HashMap<String, usize> =
            rules.iter().enumerate().map(|(idx, r)| (r.id.clone(), idx)).collect();

        let keyword_index: Vec<KeywordEntry> = rules[..matchable_len]
            .iter()
            .flat_map(|rule| {
                rule.keywords.iter().filter(|kw| !kw.is_empty()).map(|kw| KeywordEntry {
                    keyword: kw.clone(),
                    rule_id: rule.id.clone(),
                    priority: rule.priority,
                })
            })
            .collect();

        let suggestions = rules
            .iter()
            .find(|r| r.id == SUGGESTIONS_RULE_ID)
            .map(|r| r.data.clone())
            .unwrap_or_default();

        RuleStore { rules, by_id, matchable_len, keyword_index, suggestions }
    }

    /// Matching-eligible rules in priority order (highest first).
    pub fn matchable(&self) -> &[Rule] {
        &self.rules[..self.matchable_len]
    }

    pub fn by_id(&self, id: &str) -> Option<&Rule> {
        self.by_id.get(id).map(|&idx| &self.rules[idx])
    }

    /// The dedicated fallback rule, if the configuration still has one.
    pub fn fallback(&self) -> Option<&Rule> {
        self.by_id(FALLBACK_RULE_ID)
    }

    /// Flattened (keyword, rule, priority) index for the fuzzy matcher.
    /// Empty catch-all keywords are excluded.
    pub fn keyword_index(&self) -> &[KeywordEntry] {
        &self.keyword_index
    }

    /// Suggestion strings from the auxiliary `suggestions` record.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Build a store straight from raw rules, skipping `RuleSet` validation.
    /// Exists so tests can model a configuration that lost its fallback rule.
    #[cfg(test)]
    pub fn new_unchecked_for_tests(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        let matchable_len = rules.iter().filter(|r| r.is_matchable()).count();
        let by_id: HashMap<String, usize> =
            rules.iter().enumerate().map(|(idx, r)| (r.id.clone(), idx)).collect();
        let keyword_index: Vec<KeywordEntry> = rules[..matchable_len]
            .iter()
            .flat_map(|rule| {
                rule.keywords.iter().filter(|kw| !kw.is_empty()).map(|kw| KeywordEntry {
                    keyword: kw.clone(),
                    rule_id: rule.id.clone(),
                    priority: rule.priority,
                })
            })
            .collect();
        RuleStore { rules, by_id, matchable_len, keyword_index, suggestions: Vec::new() }
    }
}
