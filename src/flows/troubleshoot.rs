//! Guided troubleshooting sub-dialogue.
//!
//! A small branching diagnosis tree for "internet mati" complaints. Steps are
//! numbered the way a support script numbers them, with 1.1 as a sub-step of
//! step 1; every raw answer is appended to an audit history so a terminal
//! reply could be escalated with full context.
//!
//! Answers are matched by substring: `tidak`, `mati` and `merah` read as
//! negative, `ya`, `normal` and `hijau` as positive (step 2 also accepts
//! `bisa`). Negative checks run first, so "tidak normal" reads as negative.
//! Anything else re-asks the current question.

/// Where the script currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// 1: is the modem light on?
    ModemLight,
    /// 1.1: is the power cable plugged in?
    PowerCable,
    /// 2: does the internet work after a restart?
    AfterRestart,
    /// 3: does the internet work on another device?
    OtherDevice,
}

impl Step {
    /// Script numbering as shown to the user (1.1 is the only sub-step).
    pub fn number(self) -> f32 {
        match self {
            Step::ModemLight => 1.0,
            Step::PowerCable => 1.1,
            Step::AfterRestart => 2.0,
            Step::OtherDevice => 3.0,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Step::ModemLight => {
                "Langkah 1: Apakah lampu indikator modem Anda menyala? (ya/tidak)"
            }
            Step::PowerCable => {
                "Langkah 1.1: Apakah kabel power modem terpasang dengan benar? (ya/tidak)"
            }
            Step::AfterRestart => {
                "Langkah 2: Coba restart modem Anda (cabut power 10 detik, lalu pasang lagi). Apakah internet sudah bisa? (ya/tidak)"
            }
            Step::OtherDevice => {
                "Langkah 3: Apakah internet berfungsi normal di perangkat lain? (ya/tidak)"
            }
        }
    }
}

/// What a submitted answer did to the script.
#[derive(Debug)]
pub(crate) enum TroubleshootOutcome {
    /// Next (or repeated) question.
    Ask(String),
    /// Diagnosis reached; the session is spent and must be dropped.
    Done(String),
}

/// A running troubleshooting script.
#[derive(Debug, Clone)]
pub(crate) struct TroubleshootSession {
    /// Which script is running. Only "internet" exists today.
    flow: &'static str,
    step: Step,
    /// (step number, raw answer) per turn, in order.
    history: Vec<(f32, String)>,
}

const NEGATIVE: [&str; 3] = ["tidak", "mati", "merah"];
const POSITIVE: [&str; 3] = ["ya", "normal", "hijau"];

fn is_negative(answer: &str) -> bool {
    NEGATIVE.iter().any(|cue| answer.contains(cue))
}

fn is_positive(answer: &str) -> bool {
    POSITIVE.iter().any(|cue| answer.contains(cue))
}

impl TroubleshootSession {
    /// Start the internet script and return it with the first question.
    pub fn start() -> (Self, String) {
        let session =
            TroubleshootSession { flow: "internet", step: Step::ModemLight, history: Vec::new() };
        let first = format!(
            "Oke, mari kita periksa masalah internet Anda. {}",
            Step::ModemLight.prompt()
        );
        (session, first)
    }

    pub fn flow(&self) -> &'static str {
        self.flow
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn history(&self) -> &[(f32, String)] {
        &self.history
    }

    /// Feed `raw` to the current step and advance the script.
    pub fn answer(&mut self, raw: &str) -> TroubleshootOutcome {
        let answer = raw.trim().to_lowercase();
        self.history.push((self.step.number(), raw.to_string()));

        match self.step {
            Step::ModemLight => {
                if is_negative(&answer) {
                    self.goto(Step::PowerCable)
                } else {
                    self.goto(Step::AfterRestart)
                }
            }
            Step::PowerCable => {
                if is_positive(&answer) {
                    self.goto(Step::AfterRestart)
                } else {
                    TroubleshootOutcome::Done(
                        "Silakan pasang kabel power modem terlebih dahulu. Jika modem tetap tidak menyala, kemungkinan ada kerusakan perangkat. Hubungi penyedia layanan internet (ISP) Anda."
                            .to_string(),
                    )
                }
            }
            Step::AfterRestart => {
                if is_negative(&answer) {
                    self.goto(Step::OtherDevice)
                } else if is_positive(&answer) || answer.contains("bisa") {
                    TroubleshootOutcome::Done(
                        "Mantap, internet Anda sudah kembali normal. Senang bisa membantu!"
                            .to_string(),
                    )
                } else {
                    TroubleshootOutcome::Ask(self.step.prompt().to_string())
                }
            }
            Step::OtherDevice => {
                if is_negative(&answer) {
                    TroubleshootOutcome::Done(
                        "Kalau semua perangkat bermasalah, kemungkinan gangguan dari jaringan. Silakan hubungi ISP Anda untuk pengecekan lebih lanjut."
                            .to_string(),
                    )
                } else if is_positive(&answer) {
                    TroubleshootOutcome::Done(
                        "Berarti masalahnya ada di perangkat awal Anda. Coba lupakan jaringan Wi-Fi lalu sambungkan ulang, atau reset pengaturan jaringan perangkat tersebut."
                            .to_string(),
                    )
                } else {
                    TroubleshootOutcome::Ask(self.step.prompt().to_string())
                }
            }
        }
    }

    fn goto(&mut self, step: Step) -> TroubleshootOutcome {
        self.step = step;
        TroubleshootOutcome::Ask(step.prompt().to_string())
    }
}
