//! Match resolution: candidate generation, context gating, ranking, fallback.
//!
//! Given a normalized utterance and the current context token, resolution is
//! a fixed sequence:
//!
//! ```text
//! (1) exact candidates     keyword is a substring of the utterance;
//!                          rule quality = length of its longest hit
//! (2) fuzzy candidates     FuzzyIndex hits with score ≤ 0.4;
//!                          quality = 1 − score
//! (3) context filter       no requiredContext, or it equals the current
//!                          context, or the rule can interrupt
//! (4) ranking              priority desc, exact before fuzzy, quality desc
//! (5) fallback             the dedicated "fallback" rule
//! ```
//!
//! Exact matching is deliberately raw substring containment with no
//! word-boundary guard: a keyword can match inside an unrelated longer word.
//! That quirk is part of the matching contract and covered by a test, not
//! corrected here.
//!
//! A `None` return means the fallback rule itself is missing from the store;
//! the caller turns that into a degraded error turn rather than a panic.

use crate::Rule;
use crate::engine::fuzzy::FuzzyIndex;
use crate::engine::store::RuleStore;
use std::collections::HashSet;
use tracing::debug;

/// Highest fuzzy distance score the resolver will still accept.
pub(crate) const FUZZY_SCORE_CEILING: f64 = 0.4;

/// How the resolved rule was selected.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResolvedKind {
    Exact { keyword: String },
    Fuzzy { corrected: String, score: f64 },
    Fallback,
}

#[derive(Debug)]
pub(crate) struct Resolution<'a> {
    pub rule: &'a Rule,
    pub kind: ResolvedKind,
}

struct Candidate<'a> {
    rule: &'a Rule,
    exact: bool,
    /// Longest keyword length for exact candidates, `1 − score` for fuzzy.
    /// Never compared across the exact/fuzzy divide.
    quality: f64,
    kind: ResolvedKind,
}

/// Resolve `utterance` (already trimmed and lowercased) against the store.
pub(crate) fn resolve<'a>(
    store: &'a RuleStore,
    fuzzy: &FuzzyIndex,
    utterance: &str,
    context: Option<&str>,
) -> Option<Resolution<'a>> {
    let mut candidates: Vec<Candidate<'a>> = Vec::new();

    // Exact substring candidates, one per rule with at least one hit.
    for rule in store.matchable() {
        let longest = rule
            .keywords
            .iter()
            .filter(|kw| utterance.contains(kw.as_str()))
            .max_by_key(|kw| kw.len());
        if let Some(keyword) = longest {
            candidates.push(Candidate {
                rule,
                exact: true,
                quality: keyword.len() as f64,
                kind: ResolvedKind::Exact { keyword: keyword.clone() },
            });
        }
    }

    // Fuzzy candidates under the ceiling, best hit per rule. Rules that
    // already matched exactly are skipped: the exact candidate outranks any
    // fuzzy one for the same rule anyway.
    let exact_ids: HashSet<&str> = candidates.iter().map(|c| c.rule.id.as_str()).collect();
    let mut fuzzy_seen: HashSet<String> = HashSet::new();
    for hit in fuzzy.search(utterance) {
        if hit.score > FUZZY_SCORE_CEILING {
            break; // hits are sorted by score
        }
        if exact_ids.contains(hit.rule_id.as_str()) || !fuzzy_seen.insert(hit.rule_id.clone()) {
            continue;
        }
        if let Some(rule) = store.by_id(&hit.rule_id) {
            candidates.push(Candidate {
                rule,
                exact: false,
                quality: 1.0 - hit.score,
                kind: ResolvedKind::Fuzzy { corrected: hit.keyword, score: hit.score },
            });
        }
    }

    // Context filter.
    candidates.retain(|c| match c.rule.required_context.as_deref() {
        None => true,
        Some(required) => Some(required) == context || c.rule.can_interrupt_context,
    });

    // Ranking: priority desc, exact before fuzzy, quality desc. The sort is
    // stable, so store order (priority-sorted) breaks remaining ties.
    candidates.sort_by(|a, b| {
        b.rule
            .priority
            .cmp(&a.rule.priority)
            .then_with(|| b.exact.cmp(&a.exact))
            .then_with(|| b.quality.total_cmp(&a.quality))
    });

    if let Some(winner) = candidates.into_iter().next() {
        debug!(
            rule = %winner.rule.id,
            priority = winner.rule.priority,
            exact = winner.exact,
            "match resolved"
        );
        return Some(Resolution { rule: winner.rule, kind: winner.kind });
    }

    match store.fallback() {
        Some(rule) => {
            debug!("no eligible candidate, using fallback rule");
            Some(Resolution { rule, kind: ResolvedKind::Fallback })
        }
        None => None,
    }
}
