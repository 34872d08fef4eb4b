// src/models/round.rs

use serde::Serialize;

/// One backend's answer to the round's prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledAnswer {
    pub label: String,
    pub text: String,
}

impl LabeledAnswer {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Result of asking the player for a single position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    /// A label from the roster.
    Guessed(String),
    /// The player typed exit/quit or closed the input.
    Cancelled,
}

/// All guesses of a round, or the player's decision to drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessSheet {
    /// One roster label per presentation position.
    Complete(Vec<String>),
    Cancelled,
}

/// Per-position outcome shown after scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// 1-based presentation position.
    pub position: usize,
    pub actual: String,
    pub guessed: String,
    pub correct: bool,
}

/// Score of one completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    pub verdicts: Vec<Verdict>,
    pub correct: usize,
    pub total: usize,
}

impl RoundScore {
    /// Every position guessed right. Display only; carries no bonus.
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Terminal state of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Scored(RoundScore),
    Aborted,
}
