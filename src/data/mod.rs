use eyecons_common::models::{CellIndex, CellView, SymbolId};

/// Index of a tile in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub symbol: SymbolId,
    pub cell: CellIndex,
    /// 1-based layer inside the cell, bottom first.
    pub depth: usize,
    pub alive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Bottom to top.
    pub stack: Vec<TileId>,
}

#[derive(Debug)]
pub struct Board {
    pub max_stack_depth: usize,
    pub tiles: Vec<Tile>,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    OneSelected(TileId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Debug)]
pub struct RoundState {
    pub selection: Selection,
    pub remaining_pairs: usize,
    pub time_remaining_seconds: u32,
    pub paused: bool,
    pub status: RoundStatus,
}

impl Board {
    pub fn empty(cell_count: usize, max_stack_depth: usize) -> Self {
        Self {
            max_stack_depth,
            tiles: Vec::new(),
            cells: vec![Cell::default(); cell_count],
        }
    }

    /// Stack `symbol` on top of `cell`. The caller guarantees the cell has room.
    pub fn push(&mut self, cell: CellIndex, symbol: SymbolId) -> TileId {
        let id = TileId(self.tiles.len());
        let stack = &mut self.cells[cell].stack;
        stack.push(id);
        self.tiles.push(Tile {
            id,
            symbol,
            cell,
            depth: stack.len(),
            alive: true,
        });
        id
    }

    pub fn has_room(&self, cell: CellIndex) -> bool {
        self.cells[cell].stack.len() < self.max_stack_depth
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// The highest live tile of `cell`, the only one a player can pick.
    pub fn top(&self, cell: CellIndex) -> Option<&Tile> {
        self.cells
            .get(cell)?
            .stack
            .iter()
            .rev()
            .map(|id| &self.tiles[id.0])
            .find(|tile| tile.alive)
    }

    pub fn is_top(&self, id: TileId) -> bool {
        self.tile(id)
            .is_some_and(|tile| self.top(tile.cell).map(|top| top.id) == Some(id))
    }

    pub fn remove(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.get_mut(id.0) {
            tile.alive = false;
        }
    }

    pub fn live_tiles(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.alive).count()
    }

    pub fn live_in(&self, cell: CellIndex) -> usize {
        self.cells.get(cell).map_or(0, |cell| {
            cell.stack
                .iter()
                .filter(|id| self.tiles[id.0].alive)
                .count()
        })
    }

    /// Mark every tile dead; used when the round is torn down.
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.alive = false;
        }
    }

    pub fn views(&self) -> Vec<CellView> {
        (0..self.cells.len())
            .map(|cell| CellView {
                live: self.live_in(cell),
                top: self.top(cell).map(|tile| tile.symbol),
            })
            .collect()
    }
}

impl RoundState {
    pub fn new(total_pairs: usize, duration_seconds: u32) -> Self {
        Self {
            selection: Selection::Idle,
            remaining_pairs: total_pairs,
            time_remaining_seconds: duration_seconds,
            paused: false,
            status: RoundStatus::Playing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != RoundStatus::Playing
    }
}
