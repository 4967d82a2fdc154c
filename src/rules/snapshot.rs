//! Read-only views of a run for renderers and tools.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Category, CategoryMap, GridPos, PieceId, RunStatus, TurnRecord};

/// One placed piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub id: PieceId,
    pub pos: GridPos,
    pub variations: CategoryMap<u8>,
    pub is_final_target: bool,
}

/// Everything a renderer needs to redraw a run from scratch.
///
/// Cloning is cheap for the history, which shares structure with the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    // === Board ===
    pub cols: usize,
    pub rows: usize,
    /// `usable[col][row]`, row 0 at the bottom.
    pub usable: Vec<Vec<bool>>,
    /// Placed pieces, column by column, bottom-up.
    pub pieces: Vec<PieceView>,
    /// Current chain, head first.
    pub chain: Vec<PieceId>,

    // === Targeting ===
    pub target_category: Category,
    pub target_value: u8,
    pub selection_category: Category,
    pub progress: CategoryMap<u32>,
    pub completed: CategoryMap<bool>,
    pub completion_threshold: u32,

    // === Totals ===
    pub score: u64,
    pub lives: u32,
    pub max_lives: u32,
    pub life_progress: u32,
    pub pieces_per_extra_life: u32,
    pub status: RunStatus,
    pub turn: u32,
    pub history: Vector<TurnRecord>,
}

impl RunSnapshot {
    /// Piece in a cell, if any.
    #[must_use]
    pub fn piece_at(&self, pos: GridPos) -> Option<&PieceView> {
        self.pieces.iter().find(|p| p.pos == pos)
    }

    /// Is the final target on the board?
    #[must_use]
    pub fn final_target_on_board(&self) -> bool {
        self.pieces.iter().any(|p| p.is_final_target)
    }
}
