// src/handlers/ledger.rs

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    error::AppError,
    models::round_record::{PlayerSummary, RoundRecord},
};

/// Helper struct for the per-player aggregate query.
#[derive(sqlx::FromRow)]
struct Totals {
    rounds_played: i64,
    total_questions: i64,
    total_correct: i64,
}

/// Append-only store of round results.
///
/// The ledger is the only writer of the `rounds` table. Summaries and the
/// leaderboard are recomputed from the rows on every call.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    pool: SqlitePool,
}

impl ScoreLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (and creates if missing) the SQLite database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to open score database {}: {:?}", database_url, e);
                AppError::from(e)
            })?;

        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Appends one round for `player`.
    ///
    /// * `player` must be non-empty once trimmed, and is stored trimmed.
    /// * `total` must be positive.
    /// * `correct` must lie in `0..=total`.
    ///
    /// Validation happens before touching the database.
    pub async fn record_round(&self, player: &str, total: i64, correct: i64) -> Result<(), AppError> {
        let player = validate_round(player, total, correct)?;

        sqlx::query("INSERT INTO rounds (player, total, correct) VALUES (?, ?, ?)")
            .bind(player)
            .bind(total)
            .bind(correct)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record round for {}: {:?}", player, e);
                AppError::from(e)
            })?;

        tracing::info!("Recorded round for {}: {}/{}", player, correct, total);
        Ok(())
    }

    /// Lifetime totals of `player`, or `None` if they never finished a round.
    pub async fn get_player_summary(&self, player: &str) -> Result<Option<PlayerSummary>, AppError> {
        let player = player.trim();

        let totals = sqlx::query_as::<_, Totals>(
            r#"
            SELECT
                COUNT(*) AS rounds_played,
                COALESCE(SUM(total), 0) AS total_questions,
                COALESCE(SUM(correct), 0) AS total_correct
            FROM rounds
            WHERE player = ?
            "#,
        )
        .bind(player)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch summary for {}: {:?}", player, e);
            AppError::from(e)
        })?;

        if totals.rounds_played == 0 {
            return Ok(None);
        }

        Ok(Some(PlayerSummary {
            player: player.to_string(),
            rounds_played: totals.rounds_played,
            total_questions: totals.total_questions,
            total_correct: totals.total_correct,
        }))
    }

    /// Top `limit` players by accuracy, then total correct, then rounds played.
    /// Players without any question asked never appear.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<PlayerSummary>, AppError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let leaders = sqlx::query_as::<_, PlayerSummary>(
            r#"
            SELECT
                player,
                COUNT(*) AS rounds_played,
                SUM(total) AS total_questions,
                SUM(correct) AS total_correct
            FROM rounds
            GROUP BY player
            HAVING SUM(total) > 0
            ORDER BY
                CAST(SUM(correct) AS REAL) / SUM(total) DESC,
                total_correct DESC,
                rounds_played DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch leaderboard: {:?}", e);
            AppError::from(e)
        })?;

        Ok(leaders)
    }

    /// Every recorded round of `player`, oldest first.
    pub async fn rounds_for(&self, player: &str) -> Result<Vec<RoundRecord>, AppError> {
        let rounds = sqlx::query_as::<_, RoundRecord>(
            r#"
            SELECT id, player, total, correct, created_at
            FROM rounds
            WHERE player = ?
            ORDER BY id
            "#,
        )
        .bind(player.trim())
        .fetch_all(&self.pool)
        .await?;

        Ok(rounds)
    }
}

/// Checks a round before it is written and returns the trimmed player name.
fn validate_round(player: &str, total: i64, correct: i64) -> Result<&str, AppError> {
    let player = player.trim();
    if player.is_empty() {
        return Err(AppError::InvalidPlayer);
    }
    if total <= 0 {
        return Err(AppError::InvalidTotal(total));
    }
    if correct < 0 || correct > total {
        return Err(AppError::InvalidCorrect { total, correct });
    }
    Ok(player)
}
