// tests/common/mod.rs

#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use guess_the_model::{
    config::Config,
    handlers::ledger::ScoreLedger,
    models::backend::Roster,
    state::AppState,
    utils::{console::Console, openrouter::ModelBackend},
};
use sqlx::sqlite::SqlitePoolOptions;

/// Console fed from a fixed list of lines; records everything printed.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

/// Backend answering from a model-id keyed table; unknown ids fail.
pub struct FakeBackend {
    replies: HashMap<String, String>,
    pub calls: AtomicUsize,
    systems: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new(replies: &[(&str, &str)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
            systems: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// System instructions received, one per call.
    pub fn systems(&self) -> Vec<String> {
        self.systems.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for FakeBackend {
    async fn complete(&self, model_id: &str, system: &str, prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.systems.lock().unwrap().push(system.to_string());
        match self.replies.get(model_id) {
            Some(text) => Ok(format!("  {} -> {}\n", text, prompt)),
            None => anyhow::bail!("model {} is unavailable", model_id),
        }
    }
}

pub fn roster() -> Roster {
    Roster::parse("alpha=vendor/alpha,beta=vendor/beta,gamma=vendor/gamma").unwrap()
}

/// Ledger on a private in-memory database.
pub async fn memory_ledger() -> ScoreLedger {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    let ledger = ScoreLedger::new(pool);
    ledger.migrate().await.expect("Failed to migrate database");
    ledger
}

pub async fn app_state(backend: Arc<dyn ModelBackend>) -> AppState {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        api_key: "test-key".to_string(),
        base_url: url::Url::parse("http://127.0.0.1:9/api/v1").unwrap(),
        referer: None,
        title: None,
        roster: roster(),
        leaderboard_size: 5,
    };

    AppState {
        config,
        ledger: memory_ledger().await,
        backend,
    }
}
