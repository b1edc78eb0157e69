//! Terminal rendering of a turn: the reply itself, plus a dim one-line trace
//! of how the engine got there.

use cakap::{MatchKind, Mood, Turn};

pub struct Palette {
    pub bold: &'static str,
    pub dim: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if color {
            Palette {
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                cyan: "\x1b[36m",
                yellow: "\x1b[33m",
                red: "\x1b[31m",
                reset: "\x1b[0m",
            }
        } else {
            Palette { bold: "", dim: "", cyan: "", yellow: "", red: "", reset: "" }
        }
    }
}

fn kind_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Exact => "exact",
        MatchKind::Fuzzy => "fuzzy",
        MatchKind::Fallback => "fallback",
        MatchKind::Repeat => "repeat",
        MatchKind::Error => "error",
    }
}

fn mood_label(mood: Mood) -> &'static str {
    match mood {
        Mood::Neutral => "neutral",
        Mood::Cheerful => "cheerful",
        Mood::Tired => "tired",
    }
}

pub fn print_turn(turn: &Turn, p: &Palette) {
    let reply_color = match turn.match_kind {
        MatchKind::Error => p.red,
        MatchKind::Fallback => p.yellow,
        _ => p.bold,
    };
    println!("{reply_color}{}{}", turn.reply, p.reset);

    let mut trace = format!(
        "match={} rule={} prio={}",
        kind_label(turn.match_kind),
        turn.rule_id.as_deref().unwrap_or("-"),
        turn.priority.map_or("-".to_string(), |p| p.to_string()),
    );
    if let Some(detail) = &turn.fuzzy {
        trace.push_str(&format!(" corrected='{}' score={:.2}", detail.corrected, detail.score));
    }
    trace.push_str(&format!(
        " ctx={}>{} mood={}",
        turn.context_before.as_deref().unwrap_or("-"),
        turn.context_after.as_deref().unwrap_or("-"),
        mood_label(turn.mood),
    ));
    if turn.reminder_count > 0 {
        trace.push_str(&format!(" reminders={}", turn.reminder_count));
    }
    if turn.quiz_active {
        trace.push_str(" quiz=on");
    }
    if turn.troubleshoot_active {
        trace.push_str(" troubleshoot=on");
    }
    println!("{}{}  {trace}{}", p.dim, p.cyan, p.reset);
}
