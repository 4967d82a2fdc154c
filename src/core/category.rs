//! Attribute categories and per-category data storage.
//!
//! ## Category
//!
//! The fixed set of attribute dimensions every piece has exactly one
//! variation for.
//!
//! ## CategoryMap
//!
//! A complete mapping with one entry per category, backed by a fixed-size
//! array. There is no way to build a partial map, so "every category is
//! populated" holds by construction.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of attribute categories.
pub const CATEGORY_COUNT: usize = 5;

/// An attribute dimension of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Hairstyle,
    Eyes,
    Nose,
    Mouth,
    Shirt,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Hairstyle,
        Category::Eyes,
        Category::Nose,
        Category::Mouth,
        Category::Shirt,
    ];

    /// Get the category index (0-based, declaration order).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category for an index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Category> {
        Self::ALL.get(index).copied()
    }

    /// Iterate over every category.
    pub fn all() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter()
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Hairstyle => "Hairstyle",
            Category::Eyes => "Eyes",
            Category::Nose => "Nose",
            Category::Mouth => "Mouth",
            Category::Shirt => "Shirt",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-category data with O(1) access.
///
/// Serializes as a plain array in category order, which keeps TOML
/// configuration short (`variation_counts = [4, 4, 4, 4, 4]`).
///
/// ```
/// use lineup_engine::core::{Category, CategoryMap};
///
/// let mut progress: CategoryMap<u32> = CategoryMap::with_value(0);
/// progress[Category::Eyes] += 3;
/// assert_eq!(progress[Category::Eyes], 3);
/// assert_eq!(progress[Category::Nose], 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap<T> {
    data: [T; CATEGORY_COUNT],
}

impl<T> CategoryMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl FnMut(Category) -> T) -> Self {
        Self {
            data: Category::ALL.map(factory),
        }
    }

    /// Create a map from an array in category order.
    #[must_use]
    pub const fn from_array(data: [T; CATEGORY_COUNT]) -> Self {
        Self { data }
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a category's entry.
    #[must_use]
    pub fn get(&self, category: Category) -> &T {
        &self.data[category.index()]
    }

    /// Get a mutable reference to a category's entry.
    pub fn get_mut(&mut self, category: Category) -> &mut T {
        &mut self.data[category.index()]
    }

    /// Iterate over (Category, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over the values in category order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Borrow the backing array.
    #[must_use]
    pub fn as_array(&self) -> &[T; CATEGORY_COUNT] {
        &self.data
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: Category) -> &Self::Output {
        self.get(category)
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    fn index_mut(&mut self, category: Category) -> &mut Self::Output {
        self.get_mut(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_index_roundtrip() {
        for (i, category) in Category::all().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(Category::from_index(i), Some(category));
        }
        assert_eq!(Category::from_index(CATEGORY_COUNT), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Category::Hairstyle), "Hairstyle");
        assert_eq!(format!("{}", Category::Shirt), "Shirt");
    }

    #[test]
    fn test_category_map_new() {
        let map = CategoryMap::new(|c| c.index() * 10);

        assert_eq!(map[Category::Hairstyle], 0);
        assert_eq!(map[Category::Eyes], 10);
        assert_eq!(map[Category::Shirt], 40);
    }

    #[test]
    fn test_category_map_mutation() {
        let mut map: CategoryMap<bool> = CategoryMap::default();
        map[Category::Mouth] = true;

        let set: Vec<_> = map.iter().filter(|(_, &v)| v).map(|(c, _)| c).collect();
        assert_eq!(set, vec![Category::Mouth]);
    }

    #[test]
    fn test_category_map_serializes_as_array() {
        let map = CategoryMap::from_array([1u8, 2, 3, 4, 5]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[1,2,3,4,5]");

        let deserialized: CategoryMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_category_map_rejects_partial() {
        let result: Result<CategoryMap<u8>, _> = serde_json::from_str("[1,2,3]");
        assert!(result.is_err());
    }
}
