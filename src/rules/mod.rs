//! Turn rules and the run orchestrator.
//!
//! - [`Run`]: owns a game in progress and drives its turns
//! - [`TurnOutcome`], [`SubmitOutcome`]: what a turn or a submit did
//! - [`RunSnapshot`]: serializable view for renderers

pub mod engine;
pub mod snapshot;

pub use engine::{Run, SubmitOutcome, TurnOutcome};
pub use snapshot::{PieceView, RunSnapshot};
