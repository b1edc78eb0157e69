//! Nested sub-dialogue state machines.
//!
//! Sub-dialogues are bounded flows the user enters and leaves only through
//! the context mechanism: while one is running its dedicated context token is
//! active, a high-priority catch-all rule routes every utterance to the
//! flow's answer handler, and every terminal transition clears both the
//! session and the token.
//!
//! - `quiz.rs`: one linear pass over a fixed question list, scored.
//! - `troubleshoot.rs`: a branching diagnosis tree for internet problems,
//!   with fractional sub-steps and an audit history of raw answers.

#[path = "flows/quiz.rs"]
pub(crate) mod quiz;
#[path = "flows/troubleshoot.rs"]
pub(crate) mod troubleshoot;
