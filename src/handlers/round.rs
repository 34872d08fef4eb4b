// src/handlers/round.rs

use rand::{Rng, seq::SliceRandom};

use crate::{
    error::AppError,
    models::{
        backend::Roster,
        round::{Guess, GuessSheet, LabeledAnswer, RoundOutcome, RoundScore, Verdict},
    },
    utils::console::{Console, is_quit},
};

const RULE_WIDTH: usize = 40;

/// Returns the answers in a uniformly random order (Fisher-Yates).
pub fn shuffle_answers<R: Rng + ?Sized>(
    mut answers: Vec<LabeledAnswer>,
    rng: &mut R,
) -> Vec<LabeledAnswer> {
    answers.shuffle(rng);
    answers
}

/// Asks for the label behind one presentation position.
///
/// Keeps asking until the input resolves to a roster label (index or exact
/// label). `exit`/`quit` or closed input yields `Guess::Cancelled`.
pub fn prompt_for_guess(
    console: &mut dyn Console,
    roster: &Roster,
    position: usize,
) -> Result<Guess, AppError> {
    loop {
        let prompt = format!("Enter model # for response {}: ", position);
        let Some(input) = console.read_line(&prompt)? else {
            return Ok(Guess::Cancelled);
        };

        if is_quit(&input) {
            return Ok(Guess::Cancelled);
        }
        if let Some(label) = roster.resolve(&input) {
            return Ok(Guess::Guessed(label.to_string()));
        }

        console.say(&format!(
            "Unknown choice. Pick one of: {}",
            roster.choices_hint()
        ))?;
    }
}

/// Collects a guess for positions `1..=count`, stopping at the first cancel.
pub fn collect_guesses(
    console: &mut dyn Console,
    roster: &Roster,
    count: usize,
) -> Result<GuessSheet, AppError> {
    let mut guesses = Vec::with_capacity(count);
    for position in 1..=count {
        match prompt_for_guess(console, roster, position)? {
            Guess::Guessed(label) => guesses.push(label),
            Guess::Cancelled => return Ok(GuessSheet::Cancelled),
        }
    }
    Ok(GuessSheet::Complete(guesses))
}

/// Compares each guess with the true label at the same position.
/// Matching is exact and case-sensitive.
pub fn score_round(shuffled: &[LabeledAnswer], guesses: &[String]) -> RoundScore {
    let verdicts: Vec<Verdict> = shuffled
        .iter()
        .zip(guesses)
        .enumerate()
        .map(|(idx, (answer, guessed))| Verdict {
            position: idx + 1,
            actual: answer.label.clone(),
            guessed: guessed.clone(),
            correct: *guessed == answer.label,
        })
        .collect();

    let correct = verdicts.iter().filter(|v| v.correct).count();

    RoundScore {
        verdicts,
        correct,
        total: shuffled.len(),
    }
}

/// Runs one guessing round over already collected answers.
///
/// * Shuffles the answers and shows them without their labels.
/// * Lists the full roster with the numbers the player may type.
/// * Collects one guess per position and scores them.
///
/// Returns `RoundOutcome::Aborted` if the player cancels at any position.
pub fn play_round<R: Rng + ?Sized>(
    console: &mut dyn Console,
    roster: &Roster,
    answers: Vec<LabeledAnswer>,
    rng: &mut R,
) -> Result<RoundOutcome, AppError> {
    let shuffled = shuffle_answers(answers, rng);
    let rule = "-".repeat(RULE_WIDTH);

    console.say("")?;
    console.say("Model responses (order randomized):")?;
    for (idx, answer) in shuffled.iter().enumerate() {
        console.say("")?;
        console.say(&format!("Response {}:", idx + 1))?;
        console.say(&rule)?;
        console.say(&answer.text)?;
        console.say(&rule)?;
    }

    console.say("")?;
    console.say("Available models:")?;
    for (idx, label) in roster.labels().enumerate() {
        console.say(&format!("{}. {}", idx + 1, label))?;
    }

    match collect_guesses(console, roster, shuffled.len())? {
        GuessSheet::Complete(guesses) => Ok(RoundOutcome::Scored(score_round(&shuffled, &guesses))),
        GuessSheet::Cancelled => Ok(RoundOutcome::Aborted),
    }
}
