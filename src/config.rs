//! Rule-definition loading and validation.
//!
//! Rule sets are plain JSON documents: an ordered array of rule records in the
//! shape the engine consumes at startup (see `data/rules.json` for the
//! built-in Indonesian set). Two records are special:
//!
//! - exactly one rule must carry the id `"fallback"`, which answers when
//!   nothing else matches;
//! - at most one auxiliary record with id `"suggestions"` and `priority: -1`
//!   holds the suggestion strings used by the fallback handler. Records with a
//!   negative priority never participate in matching.
//!
//! Validation happens once here; the only configuration defect the engine
//! still defends against at runtime is a missing fallback rule.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Id of the rule that answers when no candidate is eligible.
pub const FALLBACK_RULE_ID: &str = "fallback";
/// Id of the auxiliary record holding the fallback suggestion list.
pub const SUGGESTIONS_RULE_ID: &str = "suggestions";

/// Named dynamic handler a rule can delegate its answer to.
///
/// This is a closed set on purpose: dispatch goes through an explicit match
/// (no string-keyed function table), and [`Handler::needs_utterance`] states
/// up front whether the handler consumes the raw utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handler {
    GreetByTime,
    GreetGeneral,
    TellDatetime,
    AskName,
    SaveName,
    AskColor,
    SaveColor,
    ReminderAdd,
    ReminderAddFreeform,
    ReminderList,
    ReminderClear,
    RepeatLast,
    FallbackWithSuggestions,
    QuizStart,
    QuizAnswer,
    TroubleshootStart,
    TroubleshootAnswer,
    DiceRoll,
    CoinFlip,
}

impl Handler {
    /// Whether dispatch must pass the raw utterance to this handler.
    ///
    /// Context-only handlers derive their reply from session state alone.
    pub fn needs_utterance(self) -> bool {
        matches!(
            self,
            Handler::SaveName
                | Handler::SaveColor
                | Handler::ReminderAdd
                | Handler::ReminderAddFreeform
                | Handler::QuizAnswer
                | Handler::TroubleshootAnswer
        )
    }
}

/// A single chat rule as supplied by the configuration.
///
/// `priority` is the primary tie-break across all candidate matches; a
/// negative priority marks an auxiliary data record (like `suggestions`)
/// that is excluded from matching entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub priority: i32,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub dynamic_answer: Option<Handler>,
    /// Context token this rule needs active to be eligible.
    #[serde(default)]
    pub required_context: Option<String>,
    /// Context token to activate after this rule answers.
    #[serde(default)]
    pub set_context: Option<String>,
    /// Clear the active context after this rule answers.
    #[serde(default)]
    pub clear_context: bool,
    /// Rule may win even while an unrelated context is active.
    #[serde(default)]
    pub can_interrupt_context: bool,
    /// Payload for auxiliary data records (suggestion strings).
    #[serde(default)]
    pub data: Vec<String>,
}

impl Rule {
    /// Whether this rule participates in matching at all.
    pub fn is_matchable(&self) -> bool {
        self.priority >= 0
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rule definitions: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate rule id '{0}'")]
    DuplicateId(String),
    #[error("rule set has no '{FALLBACK_RULE_ID}' rule")]
    MissingFallback,
    #[error("more than one '{SUGGESTIONS_RULE_ID}' record")]
    DuplicateSuggestions,
}

/// A validated, ready-to-index collection of [`Rule`]s.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

static BUILTIN: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_json_str(include_str!("../data/rules.json")).expect("builtin rule set is valid")
});

impl RuleSet {
    /// Validate a list of rule records and lowercase every keyword.
    ///
    /// Keywords are matched against an already-lowercased utterance, so the
    /// canonical lowercase form is fixed here once instead of per turn.
    pub fn from_rules(mut rules: Vec<Rule>) -> Result<Self, ConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut suggestion_records = 0usize;
        let mut has_fallback = false;

        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(ConfigError::DuplicateId(rule.id.clone()));
            }
            if rule.id == FALLBACK_RULE_ID {
                has_fallback = true;
            }
            if rule.id == SUGGESTIONS_RULE_ID {
                suggestion_records += 1;
            }
        }

        if !has_fallback {
            return Err(ConfigError::MissingFallback);
        }
        if suggestion_records > 1 {
            return Err(ConfigError::DuplicateSuggestions);
        }
        if suggestion_records == 0 {
            warn!("rule set has no '{SUGGESTIONS_RULE_ID}' record; fallback replies carry no suggestions");
        }

        for rule in &mut rules {
            for keyword in &mut rule.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
        }

        Ok(RuleSet { rules })
    }

    /// Parse and validate a rule set from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let rules: Vec<Rule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    /// Load a rule set from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The built-in Indonesian rule set embedded at compile time.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
