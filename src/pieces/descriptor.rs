//! Piece descriptors and piece records.
//!
//! `PieceDescriptor` is what a piece looks like: one variation per category,
//! whether it is the final target, and where it currently sits. `Piece` pairs
//! a descriptor with the run-unique `PieceId`.
//!
//! Two descriptors are *equivalent* when every category has the same
//! variation; location and the final-target flag are ignored.

use serde::{Deserialize, Serialize};

use crate::core::{Category, CategoryMap, GridPos, PieceId};

/// Attribute makeup of a piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceDescriptor {
    /// Selected variation index per category.
    pub variations: CategoryMap<u8>,

    /// Is this the hidden final target?
    pub is_final_target: bool,

    /// Current cell, once placed.
    pub location: Option<GridPos>,
}

impl PieceDescriptor {
    /// Create an ordinary, unplaced descriptor.
    #[must_use]
    pub fn new(variations: CategoryMap<u8>) -> Self {
        Self {
            variations,
            is_final_target: false,
            location: None,
        }
    }

    /// Mark as the final target.
    #[must_use]
    pub fn as_final_target(mut self) -> Self {
        self.is_final_target = true;
        self
    }

    /// Variation in one category.
    #[must_use]
    pub fn variation(&self, category: Category) -> u8 {
        self.variations[category]
    }

    /// Same variation in every category.
    #[must_use]
    pub fn is_equivalent(&self, other: &PieceDescriptor) -> bool {
        self.variations == other.variations
    }
}

/// A piece on (or headed for) the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Run-unique id.
    pub id: PieceId,
    /// Attributes and location.
    pub descriptor: PieceDescriptor,
}

impl Piece {
    #[must_use]
    pub fn new(id: PieceId, descriptor: PieceDescriptor) -> Self {
        Self { id, descriptor }
    }

    /// Shortcut for `descriptor.is_final_target`.
    #[must_use]
    pub fn is_final_target(&self) -> bool {
        self.descriptor.is_final_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalence_ignores_location_and_flag() {
        let a = PieceDescriptor::new(CategoryMap::from_array([1, 2, 3, 0, 1]));
        let mut b = a.clone().as_final_target();
        b.location = Some(GridPos::new(2, 4));

        assert!(a.is_equivalent(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_single_difference_breaks_equivalence() {
        let a = PieceDescriptor::new(CategoryMap::from_array([1, 2, 3, 0, 1]));
        let mut b = a.clone();
        b.variations[Category::Shirt] = 2;

        assert!(!a.is_equivalent(&b));
    }

    #[test]
    fn test_variation_lookup() {
        let desc = PieceDescriptor::new(CategoryMap::from_array([4, 3, 2, 1, 0]));

        assert_eq!(desc.variation(Category::Hairstyle), 4);
        assert_eq!(desc.variation(Category::Shirt), 0);
    }

    #[test]
    fn test_piece() {
        let desc = PieceDescriptor::new(CategoryMap::with_value(0)).as_final_target();
        let piece = Piece::new(PieceId(3), desc);

        assert!(piece.is_final_target());
        assert_eq!(piece.id, PieceId(3));
    }
}
