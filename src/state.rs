// src/state.rs

use std::sync::Arc;

use crate::{config::Config, handlers::ledger::ScoreLedger, utils::openrouter::ModelBackend};

/// Everything a game session needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub ledger: ScoreLedger,
    pub backend: Arc<dyn ModelBackend>,
}
