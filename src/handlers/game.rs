// src/handlers/game.rs

use rand::Rng;

use crate::{
    config::SYSTEM_PROMPT,
    error::AppError,
    handlers::{collector::gather_responses, ledger::ScoreLedger, round::play_round},
    models::round::{RoundOutcome, RoundScore},
    state::AppState,
    utils::console::{Console, is_quit},
};

/// Runs the interactive game until the player quits.
///
/// * Asks for a player name unless one is given.
/// * Each prompt is sent to every backend; a failing backend only drops that round.
/// * Scored rounds are recorded, then lifetime totals and the leaderboard are shown.
/// * Cancelled rounds leave the ledger untouched.
pub async fn run<R: Rng + ?Sized>(
    state: &AppState,
    console: &mut dyn Console,
    rng: &mut R,
    player: Option<&str>,
) -> Result<(), AppError> {
    console.say("OpenRouter Multi-Model Guessing Game")?;
    console.say("Type 'exit' or press Ctrl+D to quit.")?;
    console.say("")?;

    let player = match player.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.to_string(),
        None => match ask_player_name(console)? {
            Some(p) => p,
            None => return say_goodbye(console),
        },
    };

    loop {
        let Some(prompt) = console.read_line("Enter a prompt: ")? else {
            console.say("")?;
            return say_goodbye(console);
        };

        let prompt = prompt.trim();
        if prompt.is_empty() {
            continue;
        }
        if is_quit(prompt) {
            return say_goodbye(console);
        }

        let answers = match gather_responses(
            state.backend.as_ref(),
            &state.config.roster,
            SYSTEM_PROMPT,
            prompt,
        )
        .await
        {
            Ok(answers) => answers,
            Err(e) if e.is_round_level() => {
                console.say(&format!("[Error] {}", e))?;
                continue;
            }
            Err(e) => return Err(e),
        };

        match play_round(console, &state.config.roster, answers, rng)? {
            RoundOutcome::Aborted => {
                tracing::info!("Round aborted by {}", player);
                console.say("")?;
                console.say("Guessing aborted. Returning to main menu.")?;
                console.say("")?;
                continue;
            }
            RoundOutcome::Scored(score) => {
                report_score(console, &score)?;
                state
                    .ledger
                    .record_round(&player, score.total as i64, score.correct as i64)
                    .await?;
                show_summary(&state.ledger, console, &player).await?;
                show_leaderboard(&state.ledger, console, state.config.leaderboard_size).await?;
            }
        }

        console.say("")?;
        let again = console.read_line("Play another round? (y/n): ")?;
        let again = again.map(|a| a.trim().to_lowercase());
        if !matches!(again.as_deref(), Some("y") | Some("yes")) {
            return say_goodbye(console);
        }
        console.say("")?;
    }
}

/// Prompts until a non-empty name is given. `None` if the player quits.
fn ask_player_name(console: &mut dyn Console) -> Result<Option<String>, AppError> {
    loop {
        let Some(name) = console.read_line("Enter your player name: ")? else {
            return Ok(None);
        };
        let name = name.trim();
        if is_quit(name) {
            return Ok(None);
        }
        if !name.is_empty() {
            return Ok(Some(name.to_string()));
        }
    }
}

fn say_goodbye(console: &mut dyn Console) -> Result<(), AppError> {
    console.say("Goodbye!")?;
    Ok(())
}

fn report_score(console: &mut dyn Console, score: &RoundScore) -> Result<(), AppError> {
    console.say("")?;
    console.say("Results:")?;
    for v in &score.verdicts {
        let status = if v.correct { "[OK]" } else { "[X]" };
        console.say(&format!(
            "{} - Response {} was {} (you guessed {})",
            status, v.position, v.actual, v.guessed
        ))?;
    }

    if score.is_perfect() {
        console.say("Perfect round!")?;
    } else {
        console.say(&format!(
            "You matched {}/{} correctly.",
            score.correct, score.total
        ))?;
    }
    Ok(())
}

/// Prints the lifetime totals of `player`.
pub async fn show_summary(
    ledger: &ScoreLedger,
    console: &mut dyn Console,
    player: &str,
) -> Result<(), AppError> {
    match ledger.get_player_summary(player).await? {
        Some(s) => console.say(&format!(
            "Lifetime for {}: {} rounds, {}/{} correct ({:.1}%)",
            s.player,
            s.rounds_played,
            s.total_correct,
            s.total_questions,
            s.accuracy() * 100.0
        ))?,
        None => console.say(&format!("No rounds recorded for {} yet.", player.trim()))?,
    }
    Ok(())
}

/// Prints the top `limit` players.
pub async fn show_leaderboard(
    ledger: &ScoreLedger,
    console: &mut dyn Console,
    limit: i64,
) -> Result<(), AppError> {
    let leaders = ledger.leaderboard(limit).await?;
    if leaders.is_empty() {
        console.say("Leaderboard is empty.")?;
        return Ok(());
    }

    console.say("Leaderboard:")?;
    for (rank, s) in leaders.iter().enumerate() {
        console.say(&format!(
            "{}. {} - {:.1}% ({}/{} over {} rounds)",
            rank + 1,
            s.player,
            s.accuracy() * 100.0,
            s.total_correct,
            s.total_questions,
            s.rounds_played
        ))?;
    }
    Ok(())
}

/// Prints every recorded round of `player`, oldest first.
pub async fn show_history(
    ledger: &ScoreLedger,
    console: &mut dyn Console,
    player: &str,
) -> Result<(), AppError> {
    let rounds = ledger.rounds_for(player).await?;
    if rounds.is_empty() {
        console.say(&format!("No rounds recorded for {} yet.", player.trim()))?;
        return Ok(());
    }

    for r in &rounds {
        console.say(&format!(
            "{}  {}/{}",
            r.created_at.format("%Y-%m-%d %H:%M:%S"),
            r.correct,
            r.total
        ))?;
    }
    show_summary(ledger, console, player).await
}
