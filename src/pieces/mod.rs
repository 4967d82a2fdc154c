//! Pieces: descriptors, records and generation.
//!
//! ## Key Types
//!
//! - `PieceDescriptor`: One variation per category, final-target flag, location
//! - `Piece`: A descriptor with its run-unique `PieceId`
//! - `PieceGenerator`: Random descriptors that never duplicate the hidden target

pub mod descriptor;
pub mod generator;

pub use descriptor::{Piece, PieceDescriptor};
pub use generator::PieceGenerator;
