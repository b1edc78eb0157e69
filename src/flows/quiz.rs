//! Quiz sub-dialogue.
//!
//! One session is one pass over a fixed question list: no retries, no going
//! back. An answer is correct when the canonical answer string appears inside
//! the cleaned answer (filler tokens stripped, case-folded), which accepts
//! "jawabannya jakarta dong" as readily as "jakarta".

/// Words stripped from an answer before checking it. Token-level, so "ya"
/// disappears but "jakarta" is untouched.
const FILLER_TOKENS: [&str; 11] = [
    "jawabannya",
    "adalah",
    "itu",
    "kak",
    "dong",
    "deh",
    "ya",
    "hmm",
    "kayaknya",
    "menurutku",
    "mungkin",
];

#[derive(Debug, Clone, Copy)]
pub(crate) struct QuizQuestion {
    pub question: &'static str,
    /// Lowercase canonical answer, checked by containment.
    pub answer: &'static str,
    pub options: &'static [&'static str],
}

/// The fixed built-in question list.
pub(crate) const QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        question: "Apa ibu kota Indonesia?",
        answer: "jakarta",
        options: &["Jakarta", "Bandung", "Surabaya"],
    },
    QuizQuestion {
        question: "Planet terbesar di tata surya kita?",
        answer: "jupiter",
        options: &["Mars", "Jupiter", "Saturnus"],
    },
    QuizQuestion {
        question: "Berapa hasil 7 kali 8?",
        answer: "56",
        options: &["54", "56", "64"],
    },
    QuizQuestion {
        question: "Hewan darat tercepat di dunia?",
        answer: "citah",
        options: &["Citah", "Singa", "Kuda"],
    },
];

/// What a submitted answer did to the session.
#[derive(Debug)]
pub(crate) enum QuizOutcome {
    /// Verdict for the previous question plus the next question's text.
    Next(String),
    /// Final summary; the session is spent and must be dropped.
    Finished { score: u32, summary: String },
}

/// A running quiz. Exists only while the `quiz-running` context is active.
#[derive(Debug, Clone)]
pub(crate) struct QuizSession {
    index: usize,
    score: u32,
    /// Snapshot of the question list taken at start.
    questions: Vec<QuizQuestion>,
}

impl QuizSession {
    /// Start a fresh session and return it with the first question's text.
    pub fn start() -> (Self, String) {
        let session = QuizSession { index: 0, score: 0, questions: QUESTIONS.to_vec() };
        let first = session.current_question_text();
        (session, first)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Grade `raw` against the current question and advance.
    pub fn answer(&mut self, raw: &str) -> QuizOutcome {
        let question = self.questions[self.index];
        let cleaned = clean_answer(raw);
        let correct = cleaned.contains(question.answer);
        if correct {
            self.score += 1;
        }
        self.index += 1;

        let verdict = if correct {
            "Benar!".to_string()
        } else {
            format!("Kurang tepat, jawabannya: {}.", question.answer)
        };

        if self.index < self.questions.len() {
            QuizOutcome::Next(format!("{verdict} {}", self.current_question_text()))
        } else {
            let total = self.questions.len();
            let summary = format!(
                "{verdict} Kuis selesai! Skor Anda {} dari {total}. Katakan 'main kuis' untuk main lagi.",
                self.score
            );
            QuizOutcome::Finished { score: self.score, summary }
        }
    }

    fn current_question_text(&self) -> String {
        let q = self.questions[self.index];
        format!(
            "Pertanyaan {} dari {}: {} (Pilihan: {})",
            self.index + 1,
            self.questions.len(),
            q.question,
            q.options.join(" / ")
        )
    }
}

fn clean_answer(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .filter(|word| !FILLER_TOKENS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_emits_the_first_question_with_options() {
        let (session, first) = QuizSession::start();
        assert_eq!(session.score(), 0);
        assert!(first.contains("Apa ibu kota Indonesia?"));
        assert!(first.contains("Jakarta / Bandung / Surabaya"));
    }

    #[test]
    fn correct_answer_scores_and_advances() {
        let (mut session, _) = QuizSession::start();
        match session.answer("jakarta") {
            QuizOutcome::Next(reply) => {
                assert!(reply.starts_with("Benar!"));
                assert!(reply.contains("Pertanyaan 2"));
            }
            other => panic!("expected next question, got {other:?}"),
        }
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn filler_tokens_are_stripped_before_grading() {
        let (mut session, _) = QuizSession::start();
        match session.answer("Hmm kayaknya jawabannya Jakarta dong ya") {
            QuizOutcome::Next(_) => {}
            other => panic!("expected next question, got {other:?}"),
        }
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn wrong_answer_reveals_the_expected_one() {
        let (mut session, _) = QuizSession::start();
        match session.answer("bandung") {
            QuizOutcome::Next(reply) => assert!(reply.contains("jawabannya: jakarta")),
            other => panic!("expected next question, got {other:?}"),
        }
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn answering_every_question_finishes_with_a_bounded_score() {
        let (mut session, _) = QuizSession::start();
        let total = QUESTIONS.len();
        for i in 0..total {
            let outcome = session.answer("jakarta");
            if i + 1 < total {
                assert!(matches!(outcome, QuizOutcome::Next(_)));
            } else {
                match outcome {
                    QuizOutcome::Finished { score, summary } => {
                        assert!(score as usize <= total);
                        assert!(summary.contains("Kuis selesai!"));
                    }
                    other => panic!("expected finish, got {other:?}"),
                }
            }
        }
    }
}
