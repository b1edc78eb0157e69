//! Per-session mutable conversation state.
//!
//! One [`SessionState`] holds everything a turn may read or mutate: the active
//! context token, the short conversation memory, the user profile, reminders,
//! the bot mood, and any running sub-dialogue. The engine owns exactly one of
//! these, which makes single-tenant semantics an explicit property of the
//! owner rather than an accident of shared globals: serving concurrent
//! callers against one engine would interleave turns, so multi-tenant
//! deployments must keep one engine (or at least one `SessionState`) per
//! caller.

use crate::Mood;
use crate::flows::quiz::QuizSession;
use crate::flows::troubleshoot::TroubleshootSession;

/// What the engine remembers about the immediately preceding turn.
///
/// Drives repetition detection and the `repeat-last` handler.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConversationMemory {
    /// Previous normalized utterance.
    pub last_user_message: Option<String>,
    /// Id of the rule that won the previous turn.
    pub last_matched_rule_id: Option<String>,
    /// Final reply of the previous non-repeat turn.
    pub last_bot_reply: Option<String>,
}

/// Facts the user has volunteered, mutated only by dedicated handlers.
#[derive(Debug, Default, Clone)]
pub(crate) struct UserProfile {
    pub name: Option<String>,
    pub favorite_color: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// The single active context token, or none. Not a stack.
    pub context: Option<String>,
    pub memory: ConversationMemory,
    pub profile: UserProfile,
    /// Append-only until wholly cleared; never reordered.
    pub reminders: Vec<String>,
    pub mood: Mood,
    pub quiz: Option<QuizSession>,
    pub troubleshoot: Option<TroubleshootSession>,
}

impl SessionState {
    /// Drop any sub-dialogue session whose dedicated context token is no
    /// longer active. A `QuizSession`/`TroubleshootSession` existing without
    /// its token would violate the session invariant, so this runs after
    /// every context transition.
    pub fn reconcile_flows(&mut self) {
        if self.context.as_deref() != Some(crate::context_token::QUIZ_RUNNING) {
            self.quiz = None;
        }
        if self.context.as_deref() != Some(crate::context_token::TROUBLESHOOT_RUNNING) {
            self.troubleshoot = None;
        }
    }
}
