//! Board model: static topology and mutable occupancy.
//!
//! ## Key Types
//!
//! - `GridTopology`: Usable/disabled cells and fall links, fixed per level
//! - `GridOccupancy`: Which piece is in which cell, placement and gravity

pub mod topology;
pub mod occupancy;

pub use topology::{CellLinks, GridTopology, MAX_GRID_EDGE};
pub use occupancy::GridOccupancy;
