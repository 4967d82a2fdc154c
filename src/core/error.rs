//! Engine error type.
//!
//! Only configuration problems and precondition violations are errors.
//! Expected gameplay rejections (a non-adjacent piece, a full grid) are
//! reported as plain values such as `ExtendOutcome` or `false`.

use thiserror::Error;

use super::entity::PieceId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed grid mask: {0}")]
    MalformedMask(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Spun the attribute wheel with no categories left on it")]
    EmptyWheel,

    #[error("Submitted a selection with no active chain")]
    NoActiveChain,

    #[error("Unknown piece: {0}")]
    UnknownPiece(PieceId),

    #[error("The run is over")]
    RunOver,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
