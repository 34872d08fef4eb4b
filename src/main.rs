// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use guess_the_model::{
    config::{Config, DEFAULT_DATABASE_URL, DEFAULT_LEADERBOARD_SIZE},
    handlers::{
        game::{self, show_history, show_leaderboard},
        ledger::ScoreLedger,
    },
    state::AppState,
    utils::{console::StdConsole, openrouter::OpenRouterClient},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Guess which language model wrote which answer.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Player name used for the ledger (asked interactively if omitted).
    #[arg(long, env = "GUESS_PLAYER")]
    player: Option<String>,

    /// SQLite database holding the round ledger.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Number of leaderboard rows to show.
    #[arg(long, env = "LEADERBOARD_SIZE", default_value_t = DEFAULT_LEADERBOARD_SIZE)]
    limit: i64,

    /// Print the leaderboard and exit.
    #[arg(long)]
    leaderboard: bool,

    /// Print the rounds recorded for --player and exit.
    #[arg(long, requires = "player")]
    history: bool,

    /// Log filter, e.g. `info` or `guess_the_model=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present) before clap reads env fallbacks
    dotenv().ok();
    let cli = Cli::parse();

    let file_appender = tracing_appender::rolling::daily("logs", "guess.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&cli.log);
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    let ledger = ScoreLedger::connect(&cli.database_url)
        .await
        .with_context(|| format!("could not open score database {}", cli.database_url))?;
    ledger
        .migrate()
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Score ledger ready at {}", cli.database_url);

    let mut console = StdConsole::new();

    if cli.leaderboard {
        show_leaderboard(&ledger, &mut console, cli.limit).await?;
        return Ok(());
    }
    if cli.history {
        if let Some(player) = cli.player.as_deref() {
            show_history(&ledger, &mut console, player).await?;
        }
        return Ok(());
    }

    let mut config = Config::from_env()?;
    config.database_url = cli.database_url.clone();
    config.leaderboard_size = cli.limit;

    let backend = Arc::new(OpenRouterClient::from_config(&config));
    let state = AppState {
        config,
        ledger,
        backend,
    };

    let mut rng = rand::rng();
    game::run(&state, &mut console, &mut rng, cli.player.as_deref()).await?;

    Ok(())
}
