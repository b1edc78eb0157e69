//! Reply production for a resolved rule.
//!
//! A rule answers in one of two ways. Static rules carry an `answers` pool
//! and get a random entry. Dynamic rules name a [`Handler`]; dispatch goes
//! through one explicit `match`, and [`Handler::needs_utterance`] decides
//! whether the raw utterance is passed in at all, so a handler can never
//! quietly start depending on input it was not declared to read.
//!
//! A handler failure never escapes as an error: it is logged and turned into
//! an apologetic reply, so a defective rule file degrades one answer instead
//! of the whole conversation.

use crate::Rule;
use crate::config::Handler;
use crate::context_token;
use crate::engine::session::SessionState;
use crate::engine::store::RuleStore;
use crate::flows::quiz::{QuizOutcome, QuizSession};
use crate::flows::troubleshoot::{TroubleshootOutcome, TroubleshootSession};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::warn;

const APOLOGY: &str = "Maaf, ada yang salah di pihak saya. Coba lagi ya.";

const DAY_NAMES: [&str; 7] =
    ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

#[derive(Debug, Error)]
pub(crate) enum HandlerError {
    #[error("rule '{0}' has no answers to choose from")]
    NoAnswers(String),
}

/// Produce the reply for `rule`, mutating `session` as the handler dictates.
///
/// `now` is the already offset-adjusted wall clock for time-aware handlers.
pub(crate) fn respond_with_rule(
    rule: &Rule,
    raw: &str,
    store: &RuleStore,
    session: &mut SessionState,
    rng: &mut StdRng,
    now: DateTime<FixedOffset>,
) -> String {
    let result = match rule.dynamic_answer {
        Some(handler) => {
            let input = if handler.needs_utterance() { raw } else { "" };
            run_handler(handler, input, rule, store, session, rng, now)
        }
        None => static_answer(rule, rng),
    };

    match result {
        Ok(reply) => reply,
        Err(err) => {
            warn!(rule = %rule.id, %err, "handler failed, degrading to apology");
            rule.answers.choose(rng).cloned().unwrap_or_else(|| APOLOGY.to_string())
        }
    }
}

fn static_answer(rule: &Rule, rng: &mut StdRng) -> Result<String, HandlerError> {
    rule.answers
        .choose(rng)
        .cloned()
        .ok_or_else(|| HandlerError::NoAnswers(rule.id.clone()))
}

fn run_handler(
    handler: Handler,
    input: &str,
    rule: &Rule,
    store: &RuleStore,
    session: &mut SessionState,
    rng: &mut StdRng,
    now: DateTime<FixedOffset>,
) -> Result<String, HandlerError> {
    match handler {
        Handler::GreetByTime => Ok(greet_by_time(now, session)),
        Handler::GreetGeneral => greet_general(rule, rng, now),
        Handler::TellDatetime => Ok(tell_datetime(now)),
        Handler::AskName => Ok(ask_name(session)),
        Handler::SaveName => Ok(save_name(input, session)),
        Handler::AskColor => Ok(ask_color(session)),
        Handler::SaveColor => Ok(save_color(input, session)),
        Handler::ReminderAdd => Ok(reminder_add(input, session)),
        Handler::ReminderAddFreeform => Ok(reminder_add_freeform(input, session)),
        Handler::ReminderList => Ok(reminder_list(session)),
        Handler::ReminderClear => Ok(reminder_clear(session)),
        Handler::RepeatLast => Ok(repeat_last(session)),
        Handler::FallbackWithSuggestions => fallback_with_suggestions(rule, store, rng),
        Handler::QuizStart => Ok(quiz_start(session)),
        Handler::QuizAnswer => Ok(quiz_answer(input, session)),
        Handler::TroubleshootStart => Ok(troubleshoot_start(session)),
        Handler::TroubleshootAnswer => Ok(troubleshoot_answer(input, session)),
        Handler::DiceRoll => Ok(format!("Dadu berhenti di angka {}!", rng.gen_range(1..=6))),
        Handler::CoinFlip => Ok(if rng.gen_bool(0.5) {
            "Koin mendarat di sisi angka!".to_string()
        } else {
            "Koin mendarat di sisi gambar!".to_string()
        }),
    }
}

// --- Time ------------------------------------------------------------------

/// Day-part label for `hour`: pagi 04-10, siang 11-14, sore 15-17, malam
/// 18-20, anything else is the small hours.
fn time_bucket(hour: u32) -> &'static str {
    match hour {
        4..=10 => "pagi",
        11..=14 => "siang",
        15..=17 => "sore",
        18..=20 => "malam",
        _ => "larut malam",
    }
}

fn greet_by_time(now: DateTime<FixedOffset>, session: &SessionState) -> String {
    let (salutation, tail) = match time_bucket(now.hour()) {
        "pagi" => ("Selamat pagi", "Semoga harimu menyenangkan."),
        "siang" => ("Selamat siang", "Jangan lupa makan siang."),
        "sore" => ("Selamat sore", "Semoga sisa harimu lancar."),
        "malam" => ("Selamat malam", "Jangan tidur terlalu larut."),
        _ => ("Wah, sudah larut malam", "Kenapa belum tidur?"),
    };
    match session.profile.name.as_deref() {
        Some(name) => format!("{salutation}, {name}! {tail}"),
        None => format!("{salutation}! {tail}"),
    }
}

/// Half the time a plain greeting is upgraded to a time-of-day one: the base
/// answer loses its own leading greeting word and gets "Selamat {bagian}!"
/// in front instead.
fn greet_general(
    rule: &Rule,
    rng: &mut StdRng,
    now: DateTime<FixedOffset>,
) -> Result<String, HandlerError> {
    let base = rule
        .answers
        .choose(rng)
        .cloned()
        .ok_or_else(|| HandlerError::NoAnswers(rule.id.clone()))?;
    if !rng.gen_bool(0.5) {
        return Ok(base);
    }

    let bucket = match time_bucket(now.hour()) {
        "larut malam" => "malam",
        other => other,
    };
    let rest = regex!(r"(?i)^(halo|hai|hei|yo)[!,.]*\s*").replace(&base, "");
    if rest.is_empty() {
        Ok(format!("Selamat {bucket}!"))
    } else {
        Ok(format!("Selamat {bucket}! {}", capitalize(&rest)))
    }
}

fn tell_datetime(now: DateTime<FixedOffset>) -> String {
    let day = DAY_NAMES[now.weekday().num_days_from_sunday() as usize];
    let month = MONTH_NAMES[now.month0() as usize];
    format!(
        "Sekarang hari {day}, {} {month} {}, pukul {:02}:{:02} WIB.",
        now.day(),
        now.year(),
        now.hour(),
        now.minute()
    )
}

// --- Profile ---------------------------------------------------------------

fn ask_name(session: &mut SessionState) -> String {
    match session.profile.name.as_deref() {
        Some(name) => format!("Nama Anda {name}, kan?"),
        None => {
            session.context = Some(context_token::AWAITING_NAME.to_string());
            "Saya belum tahu nama Anda. Siapa nama Anda?".to_string()
        }
    }
}

const NAME_TRIGGERS: [&str; 3] = ["nama saya", "namaku", "panggil aku"];

fn save_name(raw: &str, session: &mut SessionState) -> String {
    match first_token_after(raw, &NAME_TRIGGERS) {
        Some(token) => {
            let name = capitalize(&token);
            session.profile.name = Some(name.clone());
            session.context = None;
            format!("Senang berkenalan, {name}!")
        }
        None => {
            session.context = Some(context_token::AWAITING_NAME.to_string());
            "Hmm, saya belum menangkap namanya. Siapa nama Anda?".to_string()
        }
    }
}

fn ask_color(session: &mut SessionState) -> String {
    match session.profile.favorite_color.as_deref() {
        Some(color) => format!("Warna favorit Anda {color}, bukan?"),
        None => {
            session.context = Some(context_token::AWAITING_COLOR.to_string());
            "Saya belum tahu. Apa warna favorit Anda?".to_string()
        }
    }
}

const COLOR_TRIGGERS: [&str; 3] = ["warna favoritku", "warna kesukaanku", "warnanya"];

fn save_color(raw: &str, session: &mut SessionState) -> String {
    match first_token_after(raw, &COLOR_TRIGGERS) {
        Some(token) => {
            let color = token.to_lowercase();
            session.profile.favorite_color = Some(color.clone());
            session.context = None;
            format!("Oke, warna {color} sudah saya catat!")
        }
        None => {
            session.context = Some(context_token::AWAITING_COLOR.to_string());
            "Warna apa itu tadi? Sebutkan satu warna ya.".to_string()
        }
    }
}

/// First whitespace token after the earliest trigger phrase, or of the whole
/// utterance when no trigger occurs. Filler "adalah" is skipped.
fn first_token_after(raw: &str, triggers: &[&str]) -> Option<String> {
    let rest = strip_trigger(raw, triggers);
    rest.split_whitespace().find(|t| !t.eq_ignore_ascii_case("adalah")).map(str::to_string)
}

/// Slice off everything up to and including the earliest trigger phrase,
/// preserving the original casing of what follows.
fn strip_trigger<'a>(raw: &'a str, triggers: &[&str]) -> &'a str {
    let lower = raw.to_lowercase();
    let mut best: Option<usize> = None;
    for trigger in triggers {
        if let Some(pos) = lower.find(trigger) {
            let end = pos + trigger.len();
            if best.is_none_or(|b| end < b) {
                best = Some(end);
            }
        }
    }
    match best {
        // Lowercasing can shift byte offsets on non-ASCII input; fall back to
        // the full utterance rather than slice mid-character.
        Some(end) if raw.is_char_boundary(end) => &raw[end..],
        Some(_) => raw,
        None => raw,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// --- Reminders -------------------------------------------------------------

const REMINDER_TRIGGERS: [&str; 4] =
    ["ingatkan saya", "buat pengingat", "tambah reminder", "catat"];

fn reminder_add(raw: &str, session: &mut SessionState) -> String {
    let text = strip_trigger(raw, &REMINDER_TRIGGERS).trim();
    let text = text.strip_prefix("untuk ").unwrap_or(text).trim();
    if text.is_empty() {
        session.context = Some(context_token::AWAITING_REMINDER_TEXT.to_string());
        return "Mau diingatkan tentang apa?".to_string();
    }
    store_reminder(text, session)
}

fn reminder_add_freeform(raw: &str, session: &mut SessionState) -> String {
    session.context = None;
    store_reminder(raw.trim(), session)
}

fn store_reminder(text: &str, session: &mut SessionState) -> String {
    session.reminders.push(text.to_string());
    format!(
        "Oke, saya catat: \"{text}\". Total {} pengingat.",
        session.reminders.len()
    )
}

fn reminder_list(session: &SessionState) -> String {
    if session.reminders.is_empty() {
        return "Belum ada pengingat. Katakan 'ingatkan saya ...' untuk menambah.".to_string();
    }
    let mut lines = vec!["Pengingat Anda:".to_string()];
    for (i, reminder) in session.reminders.iter().enumerate() {
        lines.push(format!("{}. {reminder}", i + 1));
    }
    lines.join("\n")
}

fn reminder_clear(session: &mut SessionState) -> String {
    let count = session.reminders.len();
    if count == 0 {
        return "Tidak ada pengingat untuk dihapus.".to_string();
    }
    session.reminders.clear();
    format!("Siap, {count} pengingat sudah dihapus.")
}

// --- Misc ------------------------------------------------------------------

fn repeat_last(session: &SessionState) -> String {
    match session.memory.last_bot_reply.as_deref() {
        Some(reply) => format!("Saya ulangi: {reply}"),
        None => "Belum ada yang bisa diulang, kita baru mulai ngobrol.".to_string(),
    }
}

fn fallback_with_suggestions(
    rule: &Rule,
    store: &RuleStore,
    rng: &mut StdRng,
) -> Result<String, HandlerError> {
    let base = rule
        .answers
        .choose(rng)
        .cloned()
        .ok_or_else(|| HandlerError::NoAnswers(rule.id.clone()))?;
    let picks: Vec<&String> = store.suggestions().choose_multiple(rng, 3).collect();
    if picks.is_empty() {
        return Ok(base);
    }
    let quoted: Vec<String> = picks.iter().map(|s| format!("'{s}'")).collect();
    Ok(format!("{base} Coba misalnya: {}.", quoted.join(", ")))
}

// --- Sub-dialogues ---------------------------------------------------------

fn quiz_start(session: &mut SessionState) -> String {
    let (quiz, first) = QuizSession::start();
    session.quiz = Some(quiz);
    session.context = Some(context_token::QUIZ_RUNNING.to_string());
    format!("Ayo main kuis! Jawab saja langsung. {first}")
}

fn quiz_answer(raw: &str, session: &mut SessionState) -> String {
    let Some(quiz) = session.quiz.as_mut() else {
        return "Tidak ada kuis yang sedang berjalan. Katakan 'main kuis' untuk mulai.".to_string();
    };
    match quiz.answer(raw) {
        QuizOutcome::Next(reply) => reply,
        QuizOutcome::Finished { summary, .. } => {
            session.quiz = None;
            session.context = None;
            summary
        }
    }
}

fn troubleshoot_start(session: &mut SessionState) -> String {
    let (flow, first) = TroubleshootSession::start();
    session.troubleshoot = Some(flow);
    session.context = Some(context_token::TROUBLESHOOT_RUNNING.to_string());
    first
}

fn troubleshoot_answer(raw: &str, session: &mut SessionState) -> String {
    let Some(flow) = session.troubleshoot.as_mut() else {
        return "Tidak ada sesi troubleshooting yang aktif. Katakan 'internet mati' kalau ada masalah."
            .to_string();
    };
    match flow.answer(raw) {
        TroubleshootOutcome::Ask(question) => question,
        TroubleshootOutcome::Done(diagnosis) => {
            session.troubleshoot = None;
            session.context = None;
            diagnosis
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSet;
    use chrono::TimeZone;
    use rand::SeedableRng;

    fn jakarta(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 29, hour, 30, 0)
            .unwrap()
    }

    fn store() -> RuleStore {
        RuleStore::new(&RuleSet::builtin())
    }

    fn dispatch(
        rule_id: &str,
        raw: &str,
        store: &RuleStore,
        session: &mut SessionState,
        rng: &mut StdRng,
        now: DateTime<FixedOffset>,
    ) -> String {
        let rule = store.by_id(rule_id).unwrap();
        respond_with_rule(rule, raw, store, session, rng, now)
    }

    #[test]
    fn time_buckets_cover_the_whole_day() {
        assert_eq!(time_bucket(4), "pagi");
        assert_eq!(time_bucket(10), "pagi");
        assert_eq!(time_bucket(11), "siang");
        assert_eq!(time_bucket(14), "siang");
        assert_eq!(time_bucket(15), "sore");
        assert_eq!(time_bucket(17), "sore");
        assert_eq!(time_bucket(18), "malam");
        assert_eq!(time_bucket(20), "malam");
        assert_eq!(time_bucket(21), "larut malam");
        assert_eq!(time_bucket(2), "larut malam");
    }

    #[test]
    fn greet_by_time_names_the_day_part() {
        let session = SessionState::default();
        assert!(greet_by_time(jakarta(8), &session).contains("pagi"));
        assert!(greet_by_time(jakarta(13), &session).contains("siang"));
        assert!(greet_by_time(jakarta(16), &session).contains("sore"));
        assert!(greet_by_time(jakarta(19), &session).contains("malam"));
        assert!(greet_by_time(jakarta(23), &session).contains("larut"));
    }

    #[test]
    fn greet_by_time_addresses_a_known_user_by_name() {
        let mut session = SessionState::default();
        session.profile.name = Some("Budi".to_string());
        assert!(greet_by_time(jakarta(8), &session).starts_with("Selamat pagi, Budi!"));
    }

    #[test]
    fn datetime_reports_indonesian_day_and_month() {
        // 2026-08-29 is a Saturday.
        let reply = tell_datetime(jakarta(9));
        assert_eq!(reply, "Sekarang hari Sabtu, 29 Agustus 2026, pukul 09:30 WIB.");
    }

    #[test]
    fn name_round_trip() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let ask = dispatch("ask-name", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(ask.contains("Siapa nama Anda?"));
        assert_eq!(session.context.as_deref(), Some(context_token::AWAITING_NAME));

        let saved = dispatch("save-name", "nama saya budi santoso", &store, &mut session, &mut rng, jakarta(9));
        assert!(saved.contains("Budi"));
        assert_eq!(session.profile.name.as_deref(), Some("Budi"));
        assert_eq!(session.context, None);
    }

    #[test]
    fn empty_name_re_asks_and_keeps_waiting() {
        let store = store();
        let mut session = SessionState::default();
        session.context = Some(context_token::AWAITING_NAME.to_string());
        let mut rng = StdRng::seed_from_u64(1);

        let reply = dispatch("save-name", "nama saya", &store, &mut session, &mut rng, jakarta(9));
        assert!(reply.contains("Siapa nama Anda?"));
        assert_eq!(session.context.as_deref(), Some(context_token::AWAITING_NAME));
        assert_eq!(session.profile.name, None);
    }

    #[test]
    fn bare_name_while_awaiting_is_accepted() {
        let store = store();
        let mut session = SessionState::default();
        session.context = Some(context_token::AWAITING_NAME.to_string());
        let mut rng = StdRng::seed_from_u64(1);

        dispatch("save-name", "ani", &store, &mut session, &mut rng, jakarta(9));
        assert_eq!(session.profile.name.as_deref(), Some("Ani"));
    }

    #[test]
    fn color_is_stored_lowercase() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        dispatch("save-color", "warna favoritku adalah Biru", &store, &mut session, &mut rng, jakarta(9));
        assert_eq!(session.profile.favorite_color.as_deref(), Some("biru"));
        assert_eq!(session.context, None);
    }

    #[test]
    fn reminder_inline_text_keeps_original_casing() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let reply =
            dispatch("reminder-add", "Ingatkan saya beli Kopi", &store, &mut session, &mut rng, jakarta(9));
        assert!(reply.contains("beli Kopi"));
        assert_eq!(session.reminders, vec!["beli Kopi".to_string()]);
        assert_eq!(session.context, None);
    }

    #[test]
    fn bare_reminder_request_asks_for_the_text() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let reply = dispatch("reminder-add", "buat pengingat", &store, &mut session, &mut rng, jakarta(9));
        assert!(reply.contains("tentang apa"));
        assert!(session.reminders.is_empty());
        assert_eq!(session.context.as_deref(), Some(context_token::AWAITING_REMINDER_TEXT));

        let reply =
            dispatch("reminder-freeform", "minum air putih", &store, &mut session, &mut rng, jakarta(9));
        assert!(reply.contains("minum air putih"));
        assert_eq!(session.reminders, vec!["minum air putih".to_string()]);
        assert_eq!(session.context, None);
    }

    #[test]
    fn reminder_list_and_clear() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let empty = dispatch("reminder-list", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(empty.contains("Belum ada pengingat"));

        session.reminders = vec!["a".to_string(), "b".to_string()];
        let listed = dispatch("reminder-list", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(listed.contains("1. a"));
        assert!(listed.contains("2. b"));
        // Listing must not mutate anything.
        assert_eq!(session.reminders.len(), 2);

        let cleared = dispatch("reminder-clear", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(cleared.contains('2'));
        assert!(session.reminders.is_empty());
    }

    #[test]
    fn quiz_start_arms_the_session_and_context() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let reply = dispatch("quiz-start", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(reply.contains("Pertanyaan 1"));
        assert!(session.quiz.is_some());
        assert_eq!(session.context.as_deref(), Some(context_token::QUIZ_RUNNING));
    }

    #[test]
    fn quiz_finish_clears_the_session_and_context() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        dispatch("quiz-start", "", &store, &mut session, &mut rng, jakarta(9));
        let mut last = String::new();
        for _ in 0..crate::flows::quiz::QUESTIONS.len() {
            last = dispatch("quiz-answer", "jakarta", &store, &mut session, &mut rng, jakarta(9));
        }
        assert!(last.contains("Kuis selesai!"));
        assert!(session.quiz.is_none());
        assert_eq!(session.context, None);
    }

    #[test]
    fn troubleshoot_terminal_answer_clears_everything() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let first = dispatch("troubleshoot-start", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(first.contains("Langkah 1:"));
        assert_eq!(session.context.as_deref(), Some(context_token::TROUBLESHOOT_RUNNING));

        dispatch("troubleshoot-answer", "ya", &store, &mut session, &mut rng, jakarta(9));
        let done = dispatch("troubleshoot-answer", "sudah bisa", &store, &mut session, &mut rng, jakarta(9));
        assert!(done.contains("normal"));
        assert!(session.troubleshoot.is_none());
        assert_eq!(session.context, None);
    }

    #[test]
    fn flow_answers_outside_their_state_are_informative_no_ops() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let quiz = dispatch("quiz-answer", "jakarta", &store, &mut session, &mut rng, jakarta(9));
        assert!(quiz.contains("Tidak ada kuis"));
        let ts = dispatch("troubleshoot-answer", "ya", &store, &mut session, &mut rng, jakarta(9));
        assert!(ts.contains("Tidak ada sesi troubleshooting"));
        assert!(session.quiz.is_none());
        assert!(session.troubleshoot.is_none());
        assert_eq!(session.context, None);
    }

    #[test]
    fn dice_stays_on_the_die() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let reply = dispatch("dice-roll", "", &store, &mut session, &mut rng, jakarta(9));
            let n: u32 = reply
                .chars()
                .find(|c| c.is_ascii_digit())
                .and_then(|c| c.to_digit(10))
                .unwrap();
            assert!((1..=6).contains(&n));
        }
    }

    #[test]
    fn fallback_reply_names_concrete_suggestions() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(2);

        let reply = dispatch("fallback", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(reply.contains("Coba misalnya:"));
        assert!(store.suggestions().iter().any(|s| reply.contains(s.as_str())));
    }

    #[test]
    fn answerless_static_rule_degrades_to_the_apology() {
        let rule = Rule {
            id: "broken".to_string(),
            keywords: vec!["x".to_string()],
            priority: 1,
            answers: Vec::new(),
            dynamic_answer: None,
            required_context: None,
            set_context: None,
            clear_context: false,
            can_interrupt_context: false,
            data: Vec::new(),
        };
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);
        let reply = respond_with_rule(&rule, "x", &store, &mut session, &mut rng, jakarta(9));
        assert_eq!(reply, APOLOGY);
    }

    #[test]
    fn repeat_last_echoes_the_stored_reply() {
        let store = store();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(1);

        let nothing = dispatch("repeat-last", "", &store, &mut session, &mut rng, jakarta(9));
        assert!(nothing.contains("Belum ada"));

        session.memory.last_bot_reply = Some("Halo!".to_string());
        let echoed = dispatch("repeat-last", "", &store, &mut session, &mut rng, jakarta(9));
        assert_eq!(echoed, "Saya ulangi: Halo!");
    }
}
