// tests/game_tests.rs

mod common;

use std::sync::Arc;

use common::{FakeBackend, ScriptedConsole, app_state};
use guess_the_model::handlers::game;
use rand::{SeedableRng, rngs::StdRng};

fn healthy_backend() -> Arc<FakeBackend> {
    Arc::new(FakeBackend::new(&[
        ("vendor/alpha", "from alpha"),
        ("vendor/beta", "from beta"),
        ("vendor/gamma", "from gamma"),
    ]))
}

#[tokio::test]
async fn scored_round_is_recorded_and_reported() {
    // Arrange
    let state = app_state(healthy_backend()).await;
    let mut console = ScriptedConsole::new(&["alice", "what is rust?", "1", "1", "1", "n"]);
    let mut rng = StdRng::seed_from_u64(1);

    // Act
    game::run(&state, &mut console, &mut rng, None).await.unwrap();

    // Assert
    let summary = state
        .ledger
        .get_player_summary("alice")
        .await
        .unwrap()
        .expect("round should be recorded");
    assert_eq!(summary.rounds_played, 1);
    assert_eq!(summary.total_questions, 3);
    assert_eq!(summary.total_correct, 1);

    assert!(console.printed("You matched 1/3 correctly."));
    assert!(console.printed("Lifetime for alice: 1 rounds, 1/3 correct (33.3%)"));
    assert!(console.printed("1. alice - 33.3% (1/3 over 1 rounds)"));
    assert_eq!(console.output.last().map(String::as_str), Some("Goodbye!"));
}

#[tokio::test]
async fn player_flag_skips_the_name_prompt() {
    let state = app_state(healthy_backend()).await;
    let mut console = ScriptedConsole::new(&["hello", "2", "2", "2", "no"]);
    let mut rng = StdRng::seed_from_u64(2);

    game::run(&state, &mut console, &mut rng, Some("  bob ")).await.unwrap();

    assert!(!console.prompts.iter().any(|p| p.contains("player name")));
    let summary = state.ledger.get_player_summary("bob").await.unwrap().unwrap();
    assert_eq!(summary.total_correct, 1);
}

#[tokio::test]
async fn aborted_round_writes_nothing() {
    // Arrange
    let state = app_state(healthy_backend()).await;
    let mut console = ScriptedConsole::new(&["alice", "hello", "1", "exit", "quit"]);
    let mut rng = StdRng::seed_from_u64(3);

    // Act
    game::run(&state, &mut console, &mut rng, None).await.unwrap();

    // Assert
    assert!(console.printed("Guessing aborted. Returning to main menu."));
    assert!(state.ledger.get_player_summary("alice").await.unwrap().is_none());
    assert!(state.ledger.leaderboard(5).await.unwrap().is_empty());
    assert_eq!(console.output.last().map(String::as_str), Some("Goodbye!"));
}

#[tokio::test]
async fn backend_failure_skips_the_round_and_keeps_playing() {
    // Arrange: gamma has no reply, so every round fails at the third backend.
    let backend = Arc::new(FakeBackend::new(&[
        ("vendor/alpha", "from alpha"),
        ("vendor/beta", "from beta"),
    ]));
    let state = app_state(backend.clone()).await;
    let mut console = ScriptedConsole::new(&["alice", "first", "second"]);
    let mut rng = StdRng::seed_from_u64(4);

    // Act
    game::run(&state, &mut console, &mut rng, None).await.unwrap();

    // Assert
    let errors = console
        .output
        .iter()
        .filter(|l| l.starts_with("[Error] Failed to query gamma"))
        .count();
    assert_eq!(errors, 2);
    assert_eq!(backend.call_count(), 6);
    assert!(state.ledger.get_player_summary("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn blank_prompts_are_ignored_and_rounds_accumulate() {
    // Arrange
    let state = app_state(healthy_backend()).await;
    let mut console = ScriptedConsole::new(&[
        "carol", "   ", "one", "3", "3", "3", "yes", "two", "3", "3", "3", "y", "quit",
    ]);
    let mut rng = StdRng::seed_from_u64(5);

    // Act
    game::run(&state, &mut console, &mut rng, None).await.unwrap();

    // Assert
    let summary = state.ledger.get_player_summary("carol").await.unwrap().unwrap();
    assert_eq!(summary.rounds_played, 2);
    assert_eq!(summary.total_questions, 6);
    assert_eq!(summary.total_correct, 2);
    assert_eq!(state.ledger.rounds_for("carol").await.unwrap().len(), 2);
}

#[tokio::test]
async fn end_of_input_at_any_point_exits_cleanly() {
    let state = app_state(healthy_backend()).await;
    let mut rng = StdRng::seed_from_u64(6);

    let mut no_name = ScriptedConsole::new(&[]);
    game::run(&state, &mut no_name, &mut rng, None).await.unwrap();
    assert_eq!(no_name.output.last().map(String::as_str), Some("Goodbye!"));

    let mut mid_round = ScriptedConsole::new(&["dave", "hello", "1"]);
    game::run(&state, &mut mid_round, &mut rng, None).await.unwrap();
    assert!(mid_round.printed("Guessing aborted. Returning to main menu."));
    assert!(state.ledger.get_player_summary("dave").await.unwrap().is_none());
}

#[tokio::test]
async fn leaderboard_and_history_views() {
    // Arrange
    let state = app_state(healthy_backend()).await;
    state.ledger.record_round("alice", 4, 4).await.unwrap();
    state.ledger.record_round("bob", 10, 8).await.unwrap();
    let mut console = ScriptedConsole::new(&[]);

    // Act
    game::show_leaderboard(&state.ledger, &mut console, 5).await.unwrap();
    game::show_history(&state.ledger, &mut console, "bob").await.unwrap();
    game::show_history(&state.ledger, &mut console, "zoe").await.unwrap();

    // Assert
    assert!(console.printed("1. alice - 100.0% (4/4 over 1 rounds)"));
    assert!(console.printed("2. bob - 80.0% (8/10 over 1 rounds)"));
    assert!(console.printed("  8/10"));
    assert!(console.printed("Lifetime for bob: 1 rounds, 8/10 correct (80.0%)"));
    assert!(console.printed("No rounds recorded for zoe yet."));
}
