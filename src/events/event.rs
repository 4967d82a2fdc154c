//! Presentation events.
//!
//! The engine never draws, animates or plays sounds. Everything a renderer
//! or audio layer needs to react to is reported as a `GameEvent` through the
//! run's `EventSink`, in the order the state changed.
//!
//! ## Event groups
//!
//! - Board: `PiecePlaced`, `PieceRemoved`
//! - Selection: `SelectionChanged`, `ChainPath`
//! - HUD: `ScoreChanged`, `LivesChanged`, `CategoryProgress`,
//!   `TargetChanged`, `SelectionCategoryChanged`, `Mugshot`
//! - Lifecycle: `RunEnded`

use serde::{Deserialize, Serialize};

use crate::core::{Category, CategoryMap, GridPos, PieceId};

/// How a piece should be highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionState {
    /// First piece of the chain.
    StartOfChain,
    /// Any later piece of the chain.
    PartOfChain,
    /// Not in the chain.
    Unselected,
    /// Hovered next to the chain, but does not match.
    Ineligible,
}

/// Something the presentation layer may want to show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece settled in a cell (new, or moved by gravity).
    PiecePlaced { piece: PieceId, pos: GridPos },
    /// A piece left the board for good.
    PieceRemoved { piece: PieceId },
    /// A piece's highlight changed.
    SelectionChanged { piece: PieceId, state: SelectionState },
    /// Cells of the current chain, head first. Empty when the chain is gone.
    ChainPath { points: Vec<GridPos> },
    /// New total score.
    ScoreChanged { score: u64 },
    /// Lives and progress toward the next one.
    LivesChanged { lives: u32, progress: u32, per_life: u32 },
    /// Progress of the target category.
    CategoryProgress {
        category: Category,
        progress: u32,
        threshold: u32,
    },
    /// A new target category was spun.
    TargetChanged { category: Category, value: u8 },
    /// Chains are now matched by another category.
    SelectionCategoryChanged { category: Category },
    /// What is known about the target so far.
    ///
    /// `variations` are the target's variations; only categories flagged in
    /// `completed` have been revealed. A variation index doubles as a colour
    /// index for renderers without art.
    Mugshot {
        variations: CategoryMap<u8>,
        completed: CategoryMap<bool>,
        target_category: Category,
        all_complete: bool,
    },
    /// The run reached a terminal state.
    RunEnded { victory: bool },
}

impl GameEvent {
    /// Piece the event is about, if any.
    #[must_use]
    pub fn piece(&self) -> Option<PieceId> {
        match self {
            GameEvent::PiecePlaced { piece, .. }
            | GameEvent::PieceRemoved { piece }
            | GameEvent::SelectionChanged { piece, .. } => Some(*piece),
            _ => None,
        }
    }
}
