// src/models/round_record.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'rounds' table in the database.
/// One immutable row per completed round.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoundRecord {
    pub id: i64,

    /// Trimmed player name.
    pub player: String,

    /// Number of responses in the round.
    pub total: i64,

    /// Number of positions guessed right, in `0..=total`.
    pub correct: i64,

    /// Assigned by the database at insert time.
    pub created_at: chrono::NaiveDateTime,
}

/// Lifetime statistics of one player, aggregated from `rounds` on every query.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    pub rounds_played: i64,
    pub total_questions: i64,
    pub total_correct: i64,
}

impl PlayerSummary {
    /// Share of correct guesses, `0.0` when nothing was asked yet.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_questions as f64
    }
}
