//! Match-resolution and conversation-state engine.
//!
//! This module is the core of the chatbot: everything between a normalized
//! utterance coming in and a reply plus updated session state going out.
//!
//! ## How the parts work together
//!
//! Each turn is a fixed, synchronous pipeline:
//!
//! ```text
//! rules ──┐
//!         │  RuleStore::new              (store.rs)
//!         └───────────────┬─────────────
//!                         │  flattened keyword index
//!                         ▼
//!                   FuzzyIndex           (fuzzy.rs, built once at startup)
//!
//! utterance ── RepetitionDetector ───────(repetition.rs; short-circuits)
//!                         │
//!                         ▼
//!                resolve (resolver.rs)
//!                  - exact substring candidates
//!                  - fuzzy candidates (score ≤ 0.4)
//!                  - context filter + ranking
//!                  - fallback rule
//!                         │
//!                         ▼
//!                dispatch (dispatch.rs)
//!                  - static answer pool, or
//!                  - dynamic handler (failure boundary)
//!                         │
//!                         ▼
//!         context transition (context.rs, four-branch precedence)
//!                         │
//!                         ▼
//!              mood suffix (mood.rs) + memory update
//! ```
//!
//! ## Responsibilities by module
//!
//! - `store.rs`: priority-sorted rule set and the flattened keyword index.
//! - `fuzzy.rs`: approximate matching over the keyword index.
//! - `resolver.rs`: candidate generation, context gating, ranking, fallback.
//! - `context.rs`: the post-turn context transition policy.
//! - `repetition.rs`: verbatim-repeat detection and acknowledgment replies.
//! - `mood.rs`: probabilistic mood + personalization phrasing.
//! - `dispatch.rs`: static answer pools and the dynamic handler table.
//! - `session.rs`: the single mutable session (memory, profile, reminders,
//!   running sub-dialogues).
//!
//! The public surface lives in `src/api.rs`; sub-dialogue state machines live
//! under `src/flows/`.
//!
//! ## Debugging
//!
//! Turn internals are logged through `tracing` at `debug` level; run the CLI
//! with `RUST_LOG=cakap=debug` to see resolution and dispatch traces.

#[path = "engine/context.rs"]
pub(crate) mod context;
#[path = "engine/dispatch.rs"]
pub(crate) mod dispatch;
#[path = "engine/fuzzy.rs"]
pub(crate) mod fuzzy;
#[path = "engine/mood.rs"]
pub(crate) mod mood;
#[path = "engine/repetition.rs"]
pub(crate) mod repetition;
#[path = "engine/resolver.rs"]
pub(crate) mod resolver;
#[path = "engine/session.rs"]
pub(crate) mod session;
#[path = "engine/store.rs"]
pub(crate) mod store;
