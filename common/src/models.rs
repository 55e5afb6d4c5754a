use serde::{Deserialize, Serialize};

/// Identifier of a matchable image. Symbols are numbered from 1.
pub type SymbolId = u32;

/// Position of a stack on the board.
pub type CellIndex = usize;

/// How the generator distributes tiles over the cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Placement {
    /// Round-robin symbols, each copy dropped on a uniformly random cell with room.
    #[default]
    #[serde(rename = "scatter")]
    Scatter,
    /// Shuffled copies filled layer by layer behind a per-cell probability gate.
    #[serde(rename = "layered")]
    Layered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VariantConfig {
    pub cell_count: usize,
    pub symbol_count: usize,
    pub copies_per_symbol: usize,
    pub max_stack_depth: usize,
    pub round_duration_seconds: u32,
    pub placement: Placement,
}

impl VariantConfig {
    /// 48 stacks holding four copies of 25 images, filled layer by layer.
    pub const fn classic() -> Self {
        Self {
            cell_count: 48,
            symbol_count: 25,
            copies_per_symbol: 4,
            max_stack_depth: 3,
            round_duration_seconds: 120,
            placement: Placement::Layered,
        }
    }

    /// 56 stacks holding 50 pairs scattered at random.
    pub const fn quickie() -> Self {
        Self {
            cell_count: 56,
            symbol_count: 50,
            copies_per_symbol: 2,
            max_stack_depth: 3,
            round_duration_seconds: 120,
            placement: Placement::Scatter,
        }
    }

    /// Saturates at `usize::MAX` for configs that could never be laid out.
    pub fn tile_count(&self) -> usize {
        self.symbol_count.saturating_mul(self.copies_per_symbol)
    }

    pub fn capacity(&self) -> usize {
        self.cell_count.saturating_mul(self.max_stack_depth)
    }

    pub fn total_pairs(&self) -> usize {
        self.tile_count() / 2
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::quickie()
    }
}

/// What the UI needs to redraw one stack: how many tiles are left and which
/// symbol is clickable on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CellView {
    pub live: usize,
    pub top: Option<SymbolId>,
}
