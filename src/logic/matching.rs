use tracing::debug;

use crate::data::{Board, RoundState, RoundStatus, Selection, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyCell,
    Covered,
    Removed,
    Paused,
    RoundOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    Selected(TileId),
    Deselected(TileId),
    /// The earlier selection first. `won` is set on the pair that empties the board.
    Matched {
        first: TileId,
        second: TileId,
        won: bool,
    },
    Mismatched {
        first: TileId,
        second: TileId,
    },
}

/// Advance the pairing state machine for a click on `tile`.
pub fn on_tile_clicked(board: &mut Board, state: &mut RoundState, tile: TileId) -> ClickOutcome {
    if state.is_terminal() || state.remaining_pairs == 0 {
        return ClickOutcome::Ignored(IgnoreReason::RoundOver);
    }
    if state.paused {
        return ClickOutcome::Ignored(IgnoreReason::Paused);
    }

    let Some(clicked) = board.tile(tile) else {
        return ClickOutcome::Ignored(IgnoreReason::EmptyCell);
    };
    if !clicked.alive {
        return ClickOutcome::Ignored(IgnoreReason::Removed);
    }
    if !board.is_top(tile) {
        return ClickOutcome::Ignored(IgnoreReason::Covered);
    }
    let symbol = clicked.symbol;

    match state.selection {
        Selection::Idle => {
            state.selection = Selection::OneSelected(tile);
            ClickOutcome::Selected(tile)
        }
        Selection::OneSelected(previous) if previous == tile => {
            state.selection = Selection::Idle;
            ClickOutcome::Deselected(tile)
        }
        Selection::OneSelected(previous) => {
            state.selection = Selection::Idle;

            let same_symbol = board.tile(previous).is_some_and(|prev| prev.symbol == symbol);
            if !same_symbol {
                return ClickOutcome::Mismatched {
                    first: previous,
                    second: tile,
                };
            }

            board.remove(previous);
            board.remove(tile);
            state.remaining_pairs -= 1;
            debug!(
                "Matched symbol {}, {} pairs left",
                symbol, state.remaining_pairs
            );

            let won = state.remaining_pairs == 0;
            if won {
                state.status = RoundStatus::Won;
            }
            ClickOutcome::Matched {
                first: previous,
                second: tile,
                won,
            }
        }
    }
}
