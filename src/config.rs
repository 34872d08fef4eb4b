// src/config.rs

use std::env;

use dotenvy::dotenv;
use url::Url;

use crate::{
    error::AppError,
    models::backend::{Backend, Roster},
};

/// Instruction sent as the system message to every backend.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful CLI assistant. Keep answers concise unless asked otherwise.";

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://scores.db";
pub const DEFAULT_LEADERBOARD_SIZE: i64 = 5;

/// Roster used when `GUESS_MODELS` is not set: (label, model id).
pub const DEFAULT_MODELS: [(&str, &str); 4] = [
    ("grok-fast", "x-ai/grok-code-fast-1"),
    ("google/gemini-2.5-flash", "google/gemini-2.5-flash"),
    ("openrouter/polaris-alpha", "openrouter/polaris-alpha"),
    ("openai/gpt-5-mini", "openai/gpt-5-mini"),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_key: String,
    pub base_url: Url,
    /// Optional `HTTP-Referer` attribution header.
    pub referer: Option<String>,
    /// Optional `X-Title` attribution header.
    pub title: Option<String>,
    pub roster: Roster,
    pub leaderboard_size: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let api_key = non_empty_var("OPENROUTER_API_KEY")
            .or_else(|| non_empty_var("openRouter"))
            .ok_or_else(|| {
                AppError::Config(
                    "Missing OpenRouter API key. Add OPENROUTER_API_KEY=<key> to your .env file."
                        .to_string(),
                )
            })?;

        let base_url = non_empty_var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| AppError::Config(format!("OPENROUTER_BASE_URL is invalid: {}", e)))?;

        let database_url =
            non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let roster = match non_empty_var("GUESS_MODELS") {
            Some(spec) => Roster::parse(&spec)?,
            None => default_roster()?,
        };

        let leaderboard_size = match non_empty_var("LEADERBOARD_SIZE") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                AppError::Config(format!("LEADERBOARD_SIZE must be an integer, got '{}'", raw))
            })?,
            None => DEFAULT_LEADERBOARD_SIZE,
        };

        Ok(Self {
            database_url,
            api_key,
            base_url,
            referer: non_empty_var("OPENROUTER_REFERER"),
            title: non_empty_var("OPENROUTER_TITLE"),
            roster,
            leaderboard_size,
        })
    }
}

pub fn default_roster() -> Result<Roster, AppError> {
    Roster::new(
        DEFAULT_MODELS
            .iter()
            .map(|(label, model_id)| Backend::new(*label, *model_id))
            .collect(),
    )
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|v| !v.is_empty())
}
