//! Core engine types: ids, coordinates, categories, RNG, configuration,
//! errors and run state.
//!
//! Everything here is independent of the grid and the selection rules;
//! the other modules build on these types.

pub mod entity;
pub mod category;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{GridPos, PieceId};
pub use category::{Category, CategoryMap, CATEGORY_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::RunConfig;
pub use error::{EngineError, Result};
pub use state::{RunState, RunStatus, TurnRecord};
