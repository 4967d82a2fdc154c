//! Run configuration.
//!
//! A level is configured once at startup:
//! - Life pool (`starting_lives`, `max_lives`, `pieces_per_extra_life`)
//! - Progress and scoring (`pieces_per_completed_category`,
//!   `points_per_piece`, `target_variation_multiplier`)
//! - Board shape (`grid_mask`) and piece variety (`variation_counts`)
//!
//! Configs can be built in code with the `with_*` builders or loaded from
//! TOML. Missing TOML keys fall back to the defaults.
//!
//! ```
//! use lineup_engine::core::RunConfig;
//!
//! let config = RunConfig::from_toml_str(r#"
//!     starting_lives = 4
//!     grid_mask = ["OOO", "O.O", "OOO"]
//! "#).unwrap();
//!
//! assert_eq!(config.starting_lives, 4);
//! assert_eq!(config.max_lives, 5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryMap};
use super::error::{EngineError, Result};

/// Complete configuration for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Lives at the start of the run.
    pub starting_lives: u32,

    /// Upper bound on lives; extra-life progress stops at this count.
    pub max_lives: u32,

    /// Pieces cleared per extra life.
    pub pieces_per_extra_life: u32,

    /// Target-value matches needed to complete a category.
    pub pieces_per_completed_category: u32,

    /// Base points per piece in a submitted chain.
    pub points_per_piece: u64,

    /// Applied once per piece that carries the target value.
    pub target_variation_multiplier: f64,

    /// One string per row, top row first. `O` is a usable cell.
    pub grid_mask: Vec<String>,

    /// Number of variations per category.
    pub variation_counts: CategoryMap<u8>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            max_lives: 5,
            pieces_per_extra_life: 10,
            pieces_per_completed_category: 10,
            points_per_piece: 10,
            target_variation_multiplier: 2.0,
            grid_mask: vec!["OOOOOOO".to_string(); 7],
            variation_counts: CategoryMap::with_value(4),
        }
    }
}

impl RunConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check that the numeric settings describe a playable run.
    ///
    /// The grid mask itself is checked when the topology is built.
    pub fn validate(&self) -> Result<()> {
        if self.starting_lives == 0 {
            return Err(EngineError::InvalidConfig("starting_lives must be at least 1".into()));
        }
        if self.max_lives < self.starting_lives {
            return Err(EngineError::InvalidConfig(format!(
                "max_lives ({}) is below starting_lives ({})",
                self.max_lives, self.starting_lives
            )));
        }
        if self.pieces_per_extra_life == 0 {
            return Err(EngineError::InvalidConfig("pieces_per_extra_life must be at least 1".into()));
        }
        if self.pieces_per_completed_category == 0 {
            return Err(EngineError::InvalidConfig(
                "pieces_per_completed_category must be at least 1".into(),
            ));
        }
        if !self.target_variation_multiplier.is_finite() || self.target_variation_multiplier < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "target_variation_multiplier must be a finite non-negative number, got {}",
                self.target_variation_multiplier
            )));
        }
        if let Some((category, _)) = self.variation_counts.iter().find(|(_, &n)| n == 0) {
            return Err(EngineError::InvalidConfig(format!("{} has no variations", category)));
        }
        if self.variation_counts.values().all(|&n| n == 1) {
            // Only one descriptor exists and it is reserved for the target.
            return Err(EngineError::InvalidConfig(
                "every category has a single variation, so no piece can differ from the target".into(),
            ));
        }
        Ok(())
    }

    /// Set the starting life count.
    #[must_use]
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Set the life cap.
    #[must_use]
    pub fn with_max_lives(mut self, lives: u32) -> Self {
        self.max_lives = lives;
        self
    }

    /// Set how many cleared pieces earn an extra life.
    #[must_use]
    pub fn with_pieces_per_extra_life(mut self, pieces: u32) -> Self {
        self.pieces_per_extra_life = pieces;
        self
    }

    /// Set how many target matches complete a category.
    #[must_use]
    pub fn with_pieces_per_completed_category(mut self, pieces: u32) -> Self {
        self.pieces_per_completed_category = pieces;
        self
    }

    /// Set the base points per piece.
    #[must_use]
    pub fn with_points_per_piece(mut self, points: u64) -> Self {
        self.points_per_piece = points;
        self
    }

    /// Set the per-match score multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.target_variation_multiplier = multiplier;
        self
    }

    /// Set the grid mask from row strings, top row first.
    #[must_use]
    pub fn with_grid_mask<S: Into<String>>(mut self, rows: impl IntoIterator<Item = S>) -> Self {
        self.grid_mask = rows.into_iter().map(Into::into).collect();
        self
    }

    /// Set the variation count of one category.
    #[must_use]
    pub fn with_variation_count(mut self, category: Category, count: u8) -> Self {
        self.variation_counts[category] = count;
        self
    }

    /// Set every category's variation count at once.
    #[must_use]
    pub fn with_variation_counts(mut self, counts: CategoryMap<u8>) -> Self {
        self.variation_counts = counts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_mask.len(), 7);
    }

    #[test]
    fn test_builder() {
        let config = RunConfig::new()
            .with_starting_lives(2)
            .with_max_lives(4)
            .with_pieces_per_extra_life(6)
            .with_pieces_per_completed_category(8)
            .with_points_per_piece(25)
            .with_multiplier(1.5)
            .with_grid_mask(["OOO", "OOO"])
            .with_variation_count(Category::Nose, 6);

        assert_eq!(config.starting_lives, 2);
        assert_eq!(config.max_lives, 4);
        assert_eq!(config.pieces_per_extra_life, 6);
        assert_eq!(config.pieces_per_completed_category, 8);
        assert_eq!(config.points_per_piece, 25);
        assert_eq!(config.target_variation_multiplier, 1.5);
        assert_eq!(config.grid_mask, vec!["OOO".to_string(), "OOO".to_string()]);
        assert_eq!(config.variation_counts[Category::Nose], 6);
        assert_eq!(config.variation_counts[Category::Eyes], 4);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = RunConfig::from_toml_str(
            r#"
            points_per_piece = 5
            variation_counts = [2, 3, 4, 5, 6]
            "#,
        )
        .unwrap();

        assert_eq!(config.points_per_piece, 5);
        assert_eq!(config.variation_counts[Category::Hairstyle], 2);
        assert_eq!(config.variation_counts[Category::Shirt], 6);
        assert_eq!(config.starting_lives, RunConfig::default().starting_lives);
    }

    #[test]
    fn test_from_toml_unknown_key() {
        let result = RunConfig::from_toml_str("lives = 3");
        assert!(matches!(result, Err(EngineError::Toml(_))));
    }

    #[test]
    fn test_validate_rejects_zero_lives() {
        let config = RunConfig::new().with_starting_lives(0);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_cap_below_start() {
        let config = RunConfig::new().with_starting_lives(5).with_max_lives(3);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let config = RunConfig::new().with_variation_count(Category::Mouth, 0);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_single_descriptor() {
        let config = RunConfig::new().with_variation_counts(CategoryMap::with_value(1));
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        // One category with two variations leaves room for ordinary pieces
        let config = config.with_variation_count(Category::Eyes, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_multiplier() {
        let config = RunConfig::new().with_multiplier(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = RunConfig::load("definitely/not/here.toml");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
