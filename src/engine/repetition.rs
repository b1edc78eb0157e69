//! Verbatim-repeat detection.
//!
//! When the user sends the exact same normalized utterance twice in a row and
//! the previous turn matched a real rule (not the fallback), the engine skips
//! matching entirely and acknowledges the repetition instead, prefixing a
//! random acknowledgment phrase to the previous reply. Session state other
//! than the reply is left alone; in particular the stored last reply is not
//! overwritten, so a third identical utterance repeats the original answer
//! instead of stacking prefixes.

use crate::config::FALLBACK_RULE_ID;
use crate::engine::session::ConversationMemory;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const ACKNOWLEDGMENTS: [&str; 4] = [
    "Seperti yang saya sebutkan sebelumnya...",
    "Saya sudah menjawab itu, tapi oke...",
    "Mungkin ada bagian yang kurang jelas? Intinya:",
    "Sekali lagi ya...",
];

const NO_STORED_REPLY: &str = "Anda menanyakan hal yang sama lagi.";

/// Whether `normalized` repeats the previous turn's utterance verbatim.
pub(crate) fn is_repeat(memory: &ConversationMemory, normalized: &str) -> bool {
    memory.last_user_message.as_deref() == Some(normalized)
        && memory
            .last_matched_rule_id
            .as_deref()
            .is_some_and(|id| id != FALLBACK_RULE_ID)
}

/// Compose the acknowledgment reply for a repeated utterance.
pub(crate) fn repeat_reply(memory: &ConversationMemory, rng: &mut StdRng) -> String {
    let ack = ACKNOWLEDGMENTS
        .choose(rng)
        .copied()
        .unwrap_or(ACKNOWLEDGMENTS[0]);
    match memory.last_bot_reply.as_deref() {
        Some(previous) => format!("{ack} {previous}"),
        None => NO_STORED_REPLY.to_string(),
    }
}
