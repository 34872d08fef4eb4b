// src/error.rs

use thiserror::Error;

/// Global Application Error Enum.
/// Centralizes every failure a round, the ledger or the configuration can produce.
///
/// A player cancelling a round is not an error; see `RoundOutcome::Aborted`.
#[derive(Debug, Error)]
pub enum AppError {
    /// One backend of the roster failed; the whole round is dropped.
    #[error("Failed to query {label}: {cause}")]
    BackendQueryFailed { label: String, cause: String },

    #[error("player name must not be empty")]
    InvalidPlayer,

    #[error("total questions must be positive (got {0})")]
    InvalidTotal(i64),

    #[error("correct answers must be between 0 and {total} (got {correct})")]
    InvalidCorrect { total: i64, correct: i64 },

    /// Ledger storage is unreachable or a query failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the interactive loop may carry on with the next prompt.
    pub fn is_round_level(&self) -> bool {
        matches!(self, AppError::BackendQueryFailed { .. })
    }
}

/// Converts validator errors (roster checks) into `AppError::Config`.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(err.to_string())
    }
}
