pub mod generate;
pub mod matching;
pub mod timer;

use eyecons_common::{
    models::{CellIndex, CellView, VariantConfig},
    protocol::{Command, GameEvent},
};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    data::{Board, RoundState, RoundStatus, Selection},
    error::Result,
};
use matching::{ClickOutcome, IgnoreReason};
use timer::{CountdownTimer, Tick, TickToken, TimerState};

struct Round {
    config: VariantConfig,
    board: Board,
    state: RoundState,
    timer: CountdownTimer,
}

/// One player's table: at most one live round at a time.
#[derive(Default)]
pub struct Game {
    round: Option<Round>,
}

impl Round {
    fn elapsed_seconds(&self) -> u32 {
        self.config
            .round_duration_seconds
            .saturating_sub(self.timer.remaining())
    }

    fn teardown(&mut self) {
        self.timer.clear();
        self.board.clear();
        self.state.selection = Selection::Idle;
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> Option<&Board> {
        self.round.as_ref().map(|round| &round.board)
    }

    pub fn state(&self) -> Option<&RoundState> {
        self.round.as_ref().map(|round| &round.state)
    }

    pub fn timer_state(&self) -> TimerState {
        self.round
            .as_ref()
            .map_or(TimerState::Stopped, |round| round.timer.state())
    }

    /// Token the tick driver should present, while the countdown is running.
    pub fn token(&self) -> Option<TickToken> {
        self.round.as_ref().and_then(|round| round.timer.token())
    }

    pub fn snapshot(&self) -> Vec<CellView> {
        self.board().map(Board::views).unwrap_or_default()
    }

    /// Replace the current round. On error nothing changes.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        config: VariantConfig,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>> {
        let board = generate::generate(&config, rng)?;

        if let Some(previous) = self.round.as_mut() {
            previous.teardown();
        }

        let total_pairs = config.total_pairs();
        let mut events = Vec::with_capacity(board.tiles.len() + 1);
        events.push(GameEvent::RoundStarted {
            cell_count: config.cell_count,
            total_pairs,
            duration_seconds: config.round_duration_seconds,
        });
        events.extend(board.tiles.iter().map(|tile| GameEvent::TilePlaced {
            cell: tile.cell,
            depth: tile.depth,
            symbol: tile.symbol,
        }));

        let mut timer = CountdownTimer::new(config.round_duration_seconds);
        timer.start(config.round_duration_seconds);

        info!(
            "Round started: {} pairs on {} cells, {}s on the clock",
            total_pairs, config.cell_count, config.round_duration_seconds
        );

        self.round = Some(Round {
            state: RoundState::new(total_pairs, config.round_duration_seconds),
            config,
            board,
            timer,
        });
        Ok(events)
    }

    /// Resolve a click on `cell` to its top tile and feed it to the pairing engine.
    pub fn on_tile_clicked(&mut self, cell: CellIndex) -> Vec<GameEvent> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };

        let outcome = match round.board.top(cell).map(|tile| tile.id) {
            Some(tile) => matching::on_tile_clicked(&mut round.board, &mut round.state, tile),
            None => ClickOutcome::Ignored(IgnoreReason::EmptyCell),
        };

        let cell_of = |board: &Board, id| board.tile(id).map_or(cell, |tile| tile.cell);
        match outcome {
            ClickOutcome::Ignored(reason) => {
                debug!("Ignored click on cell {}: {:?}", cell, reason);
                Vec::new()
            }
            ClickOutcome::Selected(_) => vec![GameEvent::TileSelected { cell }],
            ClickOutcome::Deselected(_) => vec![GameEvent::TileDeselected { cell }],
            ClickOutcome::Mismatched { first, .. } => vec![GameEvent::TilesMismatched {
                first: cell_of(&round.board, first),
                second: cell,
            }],
            ClickOutcome::Matched { first, won, .. } => {
                let mut events = vec![GameEvent::TilesMatched {
                    first: cell_of(&round.board, first),
                    second: cell,
                    remaining_pairs: round.state.remaining_pairs,
                }];
                if won {
                    let elapsed_seconds = round.elapsed_seconds();
                    round.timer.clear();
                    info!("Round won after {}s", elapsed_seconds);
                    events.push(GameEvent::RoundWon { elapsed_seconds });
                }
                events
            }
        }
    }

    /// Toggle: pauses a running countdown, resumes a paused one.
    pub fn pause(&mut self) -> Vec<GameEvent> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        if round.state.is_terminal() {
            return Vec::new();
        }

        match round.timer.state() {
            TimerState::Running => {
                round.timer.pause();
                round.state.paused = true;
                vec![GameEvent::RoundPaused]
            }
            TimerState::Paused => self.resume(),
            TimerState::Stopped => Vec::new(),
        }
    }

    pub fn resume(&mut self) -> Vec<GameEvent> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        if round.state.is_terminal() || round.timer.resume().is_none() {
            return Vec::new();
        }
        round.state.paused = false;
        vec![GameEvent::RoundResumed]
    }

    /// One second of countdown, if `token` belongs to the live schedule.
    pub fn tick(&mut self, token: TickToken) -> Vec<GameEvent> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };

        match round.timer.tick(token) {
            Tick::Stale => Vec::new(),
            Tick::Remaining(remaining_seconds) => {
                round.state.time_remaining_seconds = remaining_seconds;
                vec![GameEvent::TimeTick { remaining_seconds }]
            }
            Tick::Expired => {
                round.state.time_remaining_seconds = 0;
                let mut events = vec![GameEvent::TimeTick {
                    remaining_seconds: 0,
                }];
                if round.state.remaining_pairs > 0 {
                    round.state.status = RoundStatus::Lost;
                    round.state.selection = Selection::Idle;
                    round.board.clear();
                    info!(
                        "Round lost with {} pairs left",
                        round.state.remaining_pairs
                    );
                    events.push(GameEvent::RoundLost);
                }
                events
            }
        }
    }

    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        command: Command,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>> {
        match command {
            Command::StartRound { config } => self.start_round(config, rng),
            Command::Click { cell } => Ok(self.on_tile_clicked(cell)),
            Command::Pause => Ok(self.pause()),
            Command::Resume => Ok(self.resume()),
        }
    }
}
