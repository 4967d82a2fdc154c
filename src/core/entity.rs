//! Piece identification and grid coordinates.
//!
//! Every piece placed during a run gets a unique `PieceId`. Ids are never
//! reused within a run, so a renderer can key its sprites by id and treat a
//! `PieceRemoved` event as final.
//!
//! ## Coordinates
//!
//! `GridPos` is `(col, row)` with row 0 at the bottom of a column. Adjacency
//! is 8-directional: two positions are adjacent when both axes differ by at
//! most one (Chebyshev distance ≤ 1).
//!
//! ```
//! use lineup_engine::core::GridPos;
//!
//! let a = GridPos::new(2, 2);
//! assert!(a.is_adjacent(GridPos::new(3, 3)));
//! assert!(!a.is_adjacent(GridPos::new(4, 2)));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a piece within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PieceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// A cell coordinate: column, then row counted from the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub col: u8,
    pub row: u8,
}

impl GridPos {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Chebyshev distance (max of the per-axis distances).
    #[must_use]
    pub fn chebyshev(self, other: GridPos) -> u8 {
        self.col.abs_diff(other.col).max(self.row.abs_diff(other.row))
    }

    /// True when `other` is one of the eight surrounding cells.
    ///
    /// A position is not adjacent to itself.
    #[must_use]
    pub fn is_adjacent(self, other: GridPos) -> bool {
        self != other && self.chebyshev(other) <= 1
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(col {}, row {})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_id() {
        let id = PieceId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(PieceId::from(7), id);
        assert_eq!(format!("{}", id), "Piece(7)");
    }

    #[test]
    fn test_chebyshev() {
        let origin = GridPos::new(0, 0);
        assert_eq!(origin.chebyshev(GridPos::new(0, 0)), 0);
        assert_eq!(origin.chebyshev(GridPos::new(1, 1)), 1);
        assert_eq!(origin.chebyshev(GridPos::new(2, 1)), 2);
        assert_eq!(GridPos::new(4, 1).chebyshev(GridPos::new(1, 3)), 3);
    }

    #[test]
    fn test_adjacency_includes_diagonals() {
        let center = GridPos::new(4, 4);

        for col in 3..=5u8 {
            for row in 3..=5u8 {
                let pos = GridPos::new(col, row);
                assert_eq!(center.is_adjacent(pos), pos != center);
            }
        }

        assert!(!center.is_adjacent(GridPos::new(6, 4)));
        assert!(!center.is_adjacent(GridPos::new(4, 2)));
    }

    #[test]
    fn test_serialization() {
        let pos = GridPos::new(3, 5);
        let json = serde_json::to_string(&pos).unwrap();
        let deserialized: GridPos = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, deserialized);
    }
}
