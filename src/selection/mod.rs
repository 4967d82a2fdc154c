//! Chain selection: the player's in-progress chain and its rules.

pub mod chain;

pub use chain::{ChainPieces, ExtendOutcome, SelectionChain, MIN_CHAIN_LEN};
