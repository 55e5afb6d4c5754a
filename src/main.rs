use eyecons::{
    Command, Game,
    config::Settings,
    driver::{read_commands, run_session, write_events},
};
use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    io::{self, BufReader},
    sync::mpsc,
};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let settings = Settings::from_env();
    info!(
        "🧩 Starting eyecons: {} cells, {} symbols x{}, {}s rounds",
        settings.variant.cell_count,
        settings.variant.symbol_count,
        settings.variant.copies_per_symbol,
        settings.variant.round_duration_seconds
    );

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let _ = command_tx.send(Command::StartRound {
        config: settings.variant,
    });

    let reader = tokio::spawn(read_commands(BufReader::new(io::stdin()), command_tx));
    let writer = tokio::spawn(write_events(io::stdout(), event_rx));

    let mut game = Game::new();
    run_session(&mut game, command_rx, event_tx, settings.tick, &mut rng).await;

    reader.abort();
    let _ = writer.await;
}
