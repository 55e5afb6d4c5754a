use std::{collections::HashMap, time::Duration};

use eyecons::{
    CellIndex, Command, Game, GameEvent, Placement, SymbolId, VariantConfig, driver::run_session,
};
use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

const SECOND: Duration = Duration::from_secs(1);

fn tiny(duration: u32) -> VariantConfig {
    VariantConfig {
        cell_count: 4,
        symbol_count: 2,
        copies_per_symbol: 2,
        max_stack_depth: 1,
        round_duration_seconds: duration,
        placement: Placement::Scatter,
    }
}

fn spawn_session() -> (
    UnboundedSender<Command>,
    UnboundedReceiver<GameEvent>,
    JoinHandle<Game>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(42);
        run_session(&mut game, command_rx, event_tx, SECOND, &mut rng).await;
        game
    });
    (command_tx, event_rx, handle)
}

/// Start a round and return where each symbol landed.
async fn start(
    commands: &UnboundedSender<Command>,
    events: &mut UnboundedReceiver<GameEvent>,
    config: VariantConfig,
) -> HashMap<SymbolId, Vec<CellIndex>> {
    commands.send(Command::StartRound { config }).unwrap();
    assert!(matches!(
        events.recv().await,
        Some(GameEvent::RoundStarted { .. })
    ));

    let mut cells: HashMap<SymbolId, Vec<CellIndex>> = HashMap::new();
    for _ in 0..config.tile_count() {
        match events.recv().await {
            Some(GameEvent::TilePlaced { cell, symbol, .. }) => {
                cells.entry(symbol).or_default().push(cell)
            }
            other => panic!("expected tile_placed, got {other:?}"),
        }
    }
    cells
}

fn tick(remaining_seconds: u32) -> Option<GameEvent> {
    Some(GameEvent::TimeTick { remaining_seconds })
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_out() {
    let (commands, mut events, handle) = spawn_session();
    start(&commands, &mut events, tiny(5)).await;

    for remaining in [4, 3, 2, 1, 0] {
        assert_eq!(events.recv().await, tick(remaining));
    }
    assert_eq!(events.recv().await, Some(GameEvent::RoundLost));

    tokio::time::sleep(10 * SECOND).await;
    assert!(events.try_recv().is_err());

    drop(commands);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn pause_holds_the_remaining_time() {
    let (commands, mut events, handle) = spawn_session();
    start(&commands, &mut events, tiny(5)).await;

    assert_eq!(events.recv().await, tick(4));
    assert_eq!(events.recv().await, tick(3));

    commands.send(Command::Pause).unwrap();
    assert_eq!(events.recv().await, Some(GameEvent::RoundPaused));

    tokio::time::sleep(30 * SECOND).await;
    assert!(events.try_recv().is_err());

    commands.send(Command::Resume).unwrap();
    assert_eq!(events.recv().await, Some(GameEvent::RoundResumed));
    for remaining in [2, 1, 0] {
        assert_eq!(events.recv().await, tick(remaining));
    }
    assert_eq!(events.recv().await, Some(GameEvent::RoundLost));

    drop(commands);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn winning_stops_the_clock() {
    let (commands, mut events, handle) = spawn_session();
    let cells = start(&commands, &mut events, tiny(30)).await;

    assert_eq!(events.recv().await, tick(29));

    for symbol in [1, 2] {
        for &cell in &cells[&symbol] {
            commands.send(Command::Click { cell }).unwrap();
        }
    }

    let mut won = None;
    while let Some(event) = events.recv().await {
        if let GameEvent::RoundWon { elapsed_seconds } = event {
            won = Some(elapsed_seconds);
            break;
        }
    }
    assert_eq!(won, Some(1));

    tokio::time::sleep(60 * SECOND).await;
    assert!(events.try_recv().is_err());

    drop(commands);
    let game = handle.await.unwrap();
    assert_eq!(game.state().unwrap().remaining_pairs, 0);
}

#[tokio::test(start_paused = true)]
async fn restarting_cancels_the_pending_tick() {
    let (commands, mut events, handle) = spawn_session();
    start(&commands, &mut events, tiny(5)).await;
    assert_eq!(events.recv().await, tick(4));

    tokio::time::sleep(SECOND / 2).await;
    start(&commands, &mut events, tiny(5)).await;

    // The old schedule was half way to its next tick; the new round still gets a full second.
    let started = tokio::time::Instant::now();
    assert_eq!(events.recv().await, tick(4));
    assert_eq!(started.elapsed(), SECOND);

    drop(commands);
    handle.await.unwrap();
}
