extern crate self as cakap;

use serde::Serialize;

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod flows;

pub use api::{ChatEngine, EngineOptions, Turn, TurnError};
pub use config::{ConfigError, Handler, Rule, RuleSet};

// --- Shared turn-level types ------------------------------------------------

/// How the winning rule for a turn was found.
///
/// `Repeat` and `Error` never come out of the match resolver itself: `Repeat`
/// short-circuits resolution entirely, and `Error` is the degraded outcome of
/// a rule set that lost its `fallback` rule at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A rule keyword was found as a case-insensitive substring of the utterance.
    Exact,
    /// An approximate keyword match within the accepted distance ceiling.
    Fuzzy,
    /// No eligible candidate; the dedicated `fallback` rule answered.
    Fallback,
    /// The utterance repeated the previous turn verbatim.
    Repeat,
    /// The `fallback` rule itself was missing; fixed degraded reply.
    Error,
}

/// Extra detail attached to a turn when the match was fuzzy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyDetail {
    /// The keyword the utterance was corrected to.
    pub corrected: String,
    /// Distance score in `[0, 1]`; lower is better.
    pub score: f64,
}

/// Process-wide bot mood. Non-neutral moods append a phrasing suffix to every
/// reply; the mood itself is re-rolled probabilistically per turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Cheerful,
    Tired,
}

/// Context tokens used by the built-in rule set and the dynamic handlers.
///
/// At most one token is active at a time (it is a single marker, not a stack).
pub mod context_token {
    pub const AWAITING_NAME: &str = "awaiting-name";
    pub const AWAITING_COLOR: &str = "awaiting-color";
    pub const AWAITING_REMINDER_TEXT: &str = "awaiting-reminder-text";
    pub const QUIZ_RUNNING: &str = "quiz-running";
    pub const TROUBLESHOOT_RUNNING: &str = "troubleshoot-running";
}
