//! Public engine surface.
//!
//! [`ChatEngine`] owns everything a conversation needs: the indexed rule
//! store, the fuzzy index, one [`SessionState`] and one seeded RNG. One engine
//! is one conversation; callers serving several users keep one engine each.
//!
//! Every call to [`ChatEngine::respond`] runs the same pipeline: normalize,
//! maybe re-roll the mood, short-circuit verbatim repeats, resolve a rule,
//! produce the reply, apply the context transition, decorate with
//! personalization and the mood suffix, then record the turn in conversation
//! memory. The returned [`Turn`]
//! is a full trace of what happened, serializable for `--json` consumers.

use crate::engine::store::RuleStore;
use crate::engine::{context, dispatch, mood, repetition, resolver, session::SessionState};
use crate::engine::fuzzy::FuzzyIndex;
use crate::engine::resolver::ResolvedKind;
use crate::{FuzzyDetail, MatchKind, Mood, RuleSet};
use chrono::{DateTime, FixedOffset, Utc};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Jakarta wall clock (UTC+7), the reference timezone for time-aware replies.
static JAKARTA: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset"));

/// Reply for a turn on which rule resolution itself broke down (the rule set
/// lost its fallback rule at runtime).
const DEGRADED_REPLY: &str = "Maaf, terjadi sedikit masalah pada sistem internal saya.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    /// The utterance was empty (or whitespace) after trimming.
    #[error("empty utterance")]
    EmptyUtterance,
}

/// Knobs fixed at engine construction.
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineOptions {
    /// Seed for the engine RNG. Unseeded engines draw from entropy.
    pub seed: Option<u64>,
    /// Frozen wall clock for time-aware handlers. Unset means "now" in
    /// Jakarta time.
    pub reference_time: Option<DateTime<FixedOffset>>,
}

/// Everything one call to [`ChatEngine::respond`] did.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub reply: String,
    pub match_kind: MatchKind,
    /// Winning rule, or none on a degraded error turn.
    pub rule_id: Option<String>,
    pub priority: Option<i32>,
    pub context_before: Option<String>,
    pub context_after: Option<String>,
    pub mood: Mood,
    pub user_name: Option<String>,
    pub favorite_color: Option<String>,
    pub reminder_count: usize,
    pub quiz_active: bool,
    pub troubleshoot_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyDetail>,
}

pub struct ChatEngine {
    store: RuleStore,
    fuzzy: FuzzyIndex,
    session: SessionState,
    rng: StdRng,
    reference_time: Option<DateTime<FixedOffset>>,
}

impl ChatEngine {
    pub fn new(rules: RuleSet, options: EngineOptions) -> Self {
        let store = RuleStore::new(&rules);
        let fuzzy = FuzzyIndex::new(&store);
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ChatEngine {
            store,
            fuzzy,
            session: SessionState::default(),
            rng,
            reference_time: options.reference_time,
        }
    }

    /// Engine over the built-in Indonesian rule set, unseeded.
    pub fn builtin() -> Self {
        Self::new(RuleSet::builtin(), EngineOptions::default())
    }

    pub fn mood(&self) -> Mood {
        self.session.mood
    }

    /// Run one conversational turn.
    pub fn respond(&mut self, raw: &str) -> Result<Turn, TurnError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TurnError::EmptyUtterance);
        }
        let normalized = trimmed.to_lowercase();

        mood::maybe_reroll(&mut self.session.mood, &mut self.rng);
        let context_before = self.session.context.clone();

        // A verbatim repeat skips resolution entirely and leaves conversation
        // memory alone, so a third repeat echoes the original answer instead
        // of stacking acknowledgment prefixes.
        if repetition::is_repeat(&self.session.memory, &normalized) {
            debug!("verbatim repeat detected, skipping resolution");
            let mut reply = repetition::repeat_reply(&self.session.memory, &mut self.rng);
            mood::personalize(&mut reply, &self.session.profile, &mut self.rng);
            mood::apply_mood(&mut reply, self.session.mood, &mut self.rng);
            let rule_id = self.session.memory.last_matched_rule_id.clone();
            let priority =
                rule_id.as_deref().and_then(|id| self.store.by_id(id)).map(|r| r.priority);
            return Ok(self.build_turn(reply, MatchKind::Repeat, rule_id, priority, context_before, None));
        }

        let Some(resolution) = resolver::resolve(
            &self.store,
            &self.fuzzy,
            &normalized,
            self.session.context.as_deref(),
        ) else {
            // The fallback rule is gone; answer with a fixed degraded reply
            // and drop all conversational context. An error turn is never
            // treated as repeatable.
            self.session.context = None;
            self.session.reconcile_flows();
            self.session.memory.last_user_message = Some(normalized);
            self.session.memory.last_matched_rule_id = None;
            self.session.memory.last_bot_reply = Some(DEGRADED_REPLY.to_string());
            return Ok(self.build_turn(
                DEGRADED_REPLY.to_string(),
                MatchKind::Error,
                None,
                None,
                context_before,
                None,
            ));
        };

        let rule = resolution.rule;
        let kind = resolution.kind;
        let now = self.now();
        let mut reply =
            dispatch::respond_with_rule(rule, trimmed, &self.store, &mut self.session, &mut self.rng, now);

        let after_handler = self.session.context.clone();
        self.session.context =
            context::resolve_transition(context_before.as_deref(), after_handler.as_deref(), rule, &kind);
        self.session.reconcile_flows();

        mood::personalize(&mut reply, &self.session.profile, &mut self.rng);
        mood::apply_mood(&mut reply, self.session.mood, &mut self.rng);

        self.session.memory.last_user_message = Some(normalized);
        self.session.memory.last_matched_rule_id = Some(rule.id.clone());
        self.session.memory.last_bot_reply = Some(reply.clone());

        let (match_kind, fuzzy_detail) = match kind {
            ResolvedKind::Exact { .. } => (MatchKind::Exact, None),
            ResolvedKind::Fuzzy { corrected, score } => {
                (MatchKind::Fuzzy, Some(FuzzyDetail { corrected, score }))
            }
            ResolvedKind::Fallback => (MatchKind::Fallback, None),
        };
        let rule_id = Some(rule.id.clone());
        let priority = Some(rule.priority);
        Ok(self.build_turn(reply, match_kind, rule_id, priority, context_before, fuzzy_detail))
    }

    fn build_turn(
        &self,
        reply: String,
        match_kind: MatchKind,
        rule_id: Option<String>,
        priority: Option<i32>,
        context_before: Option<String>,
        fuzzy: Option<FuzzyDetail>,
    ) -> Turn {
        Turn {
            reply,
            match_kind,
            rule_id,
            priority,
            context_before,
            context_after: self.session.context.clone(),
            mood: self.session.mood,
            user_name: self.session.profile.name.clone(),
            favorite_color: self.session.profile.favorite_color.clone(),
            reminder_count: self.session.reminders.len(),
            quiz_active: self.session.quiz.is_some(),
            troubleshoot_active: self.session.troubleshoot.is_some(),
            fuzzy,
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.reference_time.unwrap_or_else(|| Utc::now().with_timezone(&JAKARTA))
    }
}
