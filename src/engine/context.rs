//! Post-turn context transition policy.
//!
//! A single mutable context token has two jobs that pull in opposite
//! directions: it must persist across related follow-up turns (keep a quiz
//! running) and reset when the user plainly changes subject. The transition
//! is therefore computed once per turn, after dispatch, from four inputs:
//! the context before the turn, the context after any dynamic-handler side
//! effect, the winning rule's explicit directives, and the match kind.
//!
//! Precedence, first applicable branch wins:
//!
//! 1. Rule has `clearContext` → none, unless the handler already set a
//!    different non-none value (handler effects are never silently dropped).
//! 2. Rule has `setContext` → that value.
//! 3. Rule has neither directive, requires no context, cannot interrupt, a
//!    context was active before the turn, the match is not a fallback, and
//!    the handler left the pre-turn context untouched → topic switch, clear.
//! 4. Otherwise preserve the handler's result, or the pre-turn context.
//!
//! No other outcome is valid; the branch order is the whole contract.

use crate::Rule;
use crate::engine::resolver::ResolvedKind;

/// Compute the context token after a turn.
///
/// `before` is the token at the start of the turn; `after_handler` is the
/// token as the dynamic handler (if any) left it.
pub(crate) fn resolve_transition(
    before: Option<&str>,
    after_handler: Option<&str>,
    rule: &Rule,
    kind: &ResolvedKind,
) -> Option<String> {
    if rule.clear_context {
        if after_handler.is_some() && after_handler != before {
            return after_handler.map(str::to_string);
        }
        return None;
    }

    if let Some(target) = rule.set_context.as_deref() {
        return Some(target.to_string());
    }

    let handler_touched = after_handler != before;
    let is_fallback = matches!(kind, ResolvedKind::Fallback);
    if rule.required_context.is_none()
        && !rule.can_interrupt_context
        && before.is_some()
        && !is_fallback
        && !handler_touched
    {
        // An unrelated rule won while a context was active: topic switch.
        return None;
    }

    if handler_touched { after_handler.map(str::to_string) } else { before.map(str::to_string) }
}
