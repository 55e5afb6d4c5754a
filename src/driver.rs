use std::time::Duration;

use eyecons_common::protocol::{Command, GameEvent};
use rand::Rng;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::logic::Game;

fn forward(events: &mpsc::UnboundedSender<GameEvent>, batch: Vec<GameEvent>) {
    for event in batch {
        let _ = events.send(event);
    }
}

/// Serve one player until the command channel closes.
///
/// Commands and timer ticks are handled one at a time on the calling task, so the
/// round is never touched concurrently. Whenever the countdown is (re)scheduled the
/// interval restarts, which puts the first tick a full `period` after the start or resume.
pub async fn run_session<R: Rng + ?Sized>(
    game: &mut Game,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<GameEvent>,
    period: Duration,
    rng: &mut R,
) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut scheduled = None;

    info!("Session started: ticking every {:?}", period);

    loop {
        let token = game.token();
        if token != scheduled {
            interval.reset();
            scheduled = token;
        }

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                debug!("Command: {:?}", command);
                match game.apply(command, rng) {
                    Ok(batch) => forward(&events, batch),
                    Err(err) => warn!("Rejected command: {}", err),
                }
            }
            _ = interval.tick(), if scheduled.is_some() => {
                if let Some(token) = scheduled {
                    forward(&events, game.tick(token));
                }
            }
        }
    }

    info!("Session closed");
}

/// Parse JSON-line commands until EOF or until the session hangs up.
pub async fn read_commands<I>(input: I, commands: mpsc::UnboundedSender<Command>)
where
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!("Failed to read command: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Command>(&line) {
            Ok(command) => {
                if commands.send(command).is_err() {
                    break;
                }
            }
            Err(err) => warn!("Ignoring malformed command {:?}: {}", line, err),
        }
    }
}

/// Write every event as one JSON line.
pub async fn write_events<O>(mut output: O, mut events: mpsc::UnboundedReceiver<GameEvent>)
where
    O: AsyncWrite + Unpin,
{
    while let Some(event) = events.recv().await {
        let Ok(mut text) = serde_json::to_string(&event) else {
            continue;
        };
        text.push('\n');
        if let Err(err) = output.write_all(text.as_bytes()).await {
            warn!("Failed to write event: {}", err);
            break;
        }
        if let Err(err) = output.flush().await {
            warn!("Failed to flush events: {}", err);
            break;
        }
    }
}
