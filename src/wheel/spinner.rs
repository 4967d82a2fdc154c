//! The attribute wheel.
//!
//! The wheel holds the categories that can currently come up. The run
//! deletes completed categories (and, for a selection spin, the current
//! target category) before spinning, and resets it to every category once
//! all of them are completed.

use serde::{Deserialize, Serialize};

use crate::core::{Category, CategoryMap, EngineError, GameRng, Result};

/// Remaining-category wheel.
///
/// ```
/// use lineup_engine::wheel::AttributeWheel;
/// use lineup_engine::core::{Category, GameRng};
///
/// let mut wheel = AttributeWheel::new();
/// let mut rng = GameRng::new(42);
///
/// for category in [Category::Hairstyle, Category::Eyes, Category::Nose, Category::Mouth] {
///     wheel.delete_category(category);
/// }
/// assert_eq!(wheel.spin(&mut rng).unwrap(), Category::Shirt);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeWheel {
    slots: CategoryMap<bool>,
}

impl Default for AttributeWheel {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeWheel {
    /// A wheel with every category on it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: CategoryMap::with_value(true),
        }
    }

    /// Put every category back, completed ones included.
    pub fn reset(&mut self) {
        self.slots = CategoryMap::with_value(true);
    }

    /// Take a category off the wheel. No-op if it is already gone.
    pub fn delete_category(&mut self, category: Category) {
        self.slots[category] = false;
    }

    /// Is the category still on the wheel?
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.slots[category]
    }

    /// Categories still on the wheel, in declaration order.
    #[must_use]
    pub fn remaining(&self) -> Vec<Category> {
        self.slots
            .iter()
            .filter(|(_, &present)| present)
            .map(|(category, _)| category)
            .collect()
    }

    /// True when no category is left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.slots.values().any(|&present| present)
    }

    /// Pick one of the remaining categories uniformly.
    ///
    /// Spinning an empty wheel is a caller bug and returns
    /// `EngineError::EmptyWheel`.
    pub fn spin(&self, rng: &mut GameRng) -> Result<Category> {
        let remaining = self.remaining();
        rng.choose(&remaining).copied().ok_or(EngineError::EmptyWheel)
    }
}
