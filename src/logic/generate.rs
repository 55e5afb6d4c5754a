use eyecons_common::models::{CellIndex, Placement, SymbolId, VariantConfig};
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, warn};

use crate::{
    data::Board,
    error::{GameError, Result},
};

/// Rejected draws allowed per cell before a tile falls back to a linear scan.
const RETRIES_PER_CELL: usize = 8;

/// Chance that a cell receives a tile on each layered pass, indexed by depth - 1.
/// Deeper passes reuse the last value.
const LAYER_GATES: [f64; 3] = [0.82, 0.80, 0.78];

/// Largest board a round may allocate.
pub const MAX_CELLS: usize = 1024;
pub const MAX_STACK_DEPTH: usize = 16;

pub fn validate(config: &VariantConfig) -> Result<()> {
    if config.cell_count == 0 {
        return Err(GameError::InvalidConfig("cell_count must be positive"));
    }
    if config.max_stack_depth == 0 {
        return Err(GameError::InvalidConfig("max_stack_depth must be positive"));
    }
    if config.symbol_count == 0 {
        return Err(GameError::InvalidConfig("symbol_count must be positive"));
    }
    if config.copies_per_symbol == 0 || config.copies_per_symbol % 2 != 0 {
        return Err(GameError::InvalidConfig(
            "copies_per_symbol must be a positive even number",
        ));
    }
    if config.round_duration_seconds == 0 {
        return Err(GameError::InvalidConfig(
            "round_duration_seconds must be positive",
        ));
    }
    if config.cell_count > MAX_CELLS {
        return Err(GameError::InvalidConfig("cell_count is too large"));
    }
    if config.max_stack_depth > MAX_STACK_DEPTH {
        return Err(GameError::InvalidConfig("max_stack_depth is too large"));
    }

    // Both bounds above keep the capacity product small.
    let capacity = config.cell_count * config.max_stack_depth;
    let required = config
        .symbol_count
        .checked_mul(config.copies_per_symbol)
        .unwrap_or(usize::MAX);
    if capacity < required {
        return Err(GameError::InsufficientCapacity { required, capacity });
    }
    Ok(())
}

/// Lay out `copies_per_symbol` tiles of every symbol `1..=symbol_count`.
pub fn generate<R: Rng + ?Sized>(config: &VariantConfig, rng: &mut R) -> Result<Board> {
    validate(config)?;

    let mut board = Board::empty(config.cell_count, config.max_stack_depth);
    match config.placement {
        Placement::Scatter => scatter(&mut board, config, rng),
        Placement::Layered => layered(&mut board, config, rng),
    }

    debug!(
        "Generated board: {} tiles over {} cells ({:?})",
        board.tiles.len(),
        config.cell_count,
        config.placement
    );
    Ok(board)
}

fn round_robin(config: &VariantConfig) -> impl Iterator<Item = SymbolId> {
    let symbols = config.symbol_count as SymbolId;
    (0..config.copies_per_symbol).flat_map(move |_| 1..=symbols)
}

fn scatter<R: Rng + ?Sized>(board: &mut Board, config: &VariantConfig, rng: &mut R) {
    let max_draws = config.cell_count * RETRIES_PER_CELL;

    for symbol in round_robin(config) {
        let drawn = (0..max_draws)
            .map(|_| rng.random_range(0..config.cell_count))
            .find(|&cell| board.has_room(cell));

        let cell = match drawn {
            Some(cell) => cell,
            None => {
                warn!(
                    "No free cell after {} draws for symbol {}, scanning",
                    max_draws, symbol
                );
                first_with_room(board)
            }
        };
        board.push(cell, symbol);
    }
}

fn layered<R: Rng + ?Sized>(board: &mut Board, config: &VariantConfig, rng: &mut R) {
    let mut pending: Vec<SymbolId> = round_robin(config).collect();
    pending.shuffle(rng);
    let mut pending = pending.into_iter();

    'layers: for depth in 1..=config.max_stack_depth {
        let gate = LAYER_GATES[(depth - 1).min(LAYER_GATES.len() - 1)];
        for cell in 0..config.cell_count {
            if board.cells[cell].stack.len() != depth - 1 || !rng.random_bool(gate) {
                continue;
            }
            match pending.next() {
                Some(symbol) => {
                    board.push(cell, symbol);
                }
                None => break 'layers,
            }
        }
    }

    // Whatever the gates skipped goes on the lowest stacks first.
    for symbol in pending {
        let cell = lowest_with_room(board);
        board.push(cell, symbol);
    }
}

fn first_with_room(board: &Board) -> CellIndex {
    // Capacity was validated, so some cell always has room.
    (0..board.cells.len())
        .find(|&cell| board.has_room(cell))
        .unwrap_or_default()
}

fn lowest_with_room(board: &Board) -> CellIndex {
    (0..board.cells.len())
        .filter(|&cell| board.has_room(cell))
        .min_by_key(|&cell| board.cells[cell].stack.len())
        .unwrap_or_default()
}
