//! # lineup-engine
//!
//! Rule engine for a grid-based matching puzzle. Players drag chains of
//! adjacent pieces that share the currently selectable attribute; the
//! engine scores the chain, manages a life pool, rotates the attribute to
//! match and refills the board. Once every attribute category has been
//! completed a unique final-target piece appears, and capturing it wins the
//! run.
//!
//! ## Design Principles
//!
//! 1. **Presentation-free**: Rendering, audio and animation live outside the
//!    crate. The engine reports state changes as `GameEvent`s to an
//!    `EventSink` and never waits on them.
//!
//! 2. **Decisions return values**: Rejected input (`ExtendOutcome`) and a
//!    full board (`false`) are plain results. Only configuration problems
//!    and precondition violations are `EngineError`s.
//!
//! 3. **Reproducible**: All randomness goes through the seeded `GameRng`, so
//!    a run is fully determined by its configuration and seed.
//!
//! ## Modules
//!
//! - `core`: Ids, coordinates, categories, RNG, configuration, errors, run state
//! - `grid`: Board shape and piece occupancy with gravity
//! - `pieces`: Piece descriptors and target-aware generation
//! - `wheel`: The attribute wheel
//! - `selection`: The player's chain
//! - `events`: Presentation events and sinks
//! - `rules`: The `Run` orchestrator and snapshots

pub mod core;
pub mod grid;
pub mod pieces;
pub mod wheel;
pub mod selection;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    PieceId, GridPos,
    Category, CategoryMap, CATEGORY_COUNT,
    GameRng, GameRngState,
    RunConfig, EngineError, Result,
    RunState, RunStatus, TurnRecord,
};

pub use crate::grid::{GridOccupancy, GridTopology, CellLinks, MAX_GRID_EDGE};

pub use crate::pieces::{Piece, PieceDescriptor, PieceGenerator};

pub use crate::wheel::AttributeWheel;

pub use crate::selection::{ExtendOutcome, SelectionChain, MIN_CHAIN_LEN};

pub use crate::events::{EventSink, GameEvent, NullSink, RecordingSink, SelectionState};

pub use crate::rules::{PieceView, Run, RunSnapshot, SubmitOutcome, TurnOutcome};
