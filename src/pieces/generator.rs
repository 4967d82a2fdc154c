//! Piece generation with a unique hidden target.
//!
//! At the start of a run the generator draws the target descriptor. From
//! then on every ordinary descriptor is redrawn until it differs from the
//! target in at least one category, so the target's exact combination
//! exists only once: on the final-target piece, after it is spawned.
//!
//! ## Final target spawn
//!
//! Once every category is completed the run arms the spawn. The next
//! `fill_grid` puts the target at a uniformly random index of the refill.
//! The target is handed out once; later requests get ordinary pieces.

use crate::core::{CategoryMap, EngineError, GameRng, Result};

use super::descriptor::PieceDescriptor;

/// Draws piece descriptors for a run.
#[derive(Clone, Debug)]
pub struct PieceGenerator {
    variation_counts: CategoryMap<u8>,
    target: Option<PieceDescriptor>,
    spawn_armed: bool,
    target_spawned: bool,
}

impl PieceGenerator {
    /// Create a generator for the given per-category variation counts.
    ///
    /// Fails if a category has no variations or if only one descriptor is
    /// possible (it would be reserved for the target).
    pub fn new(variation_counts: CategoryMap<u8>) -> Result<Self> {
        if variation_counts.values().any(|&n| n == 0) {
            return Err(EngineError::InvalidConfig("a category has no variations".into()));
        }
        if variation_counts.values().all(|&n| n == 1) {
            return Err(EngineError::InvalidConfig(
                "only one descriptor is possible and it belongs to the target".into(),
            ));
        }

        Ok(Self {
            variation_counts,
            target: None,
            spawn_armed: false,
            target_spawned: false,
        })
    }

    /// Variation counts per category.
    #[must_use]
    pub fn variation_counts(&self) -> &CategoryMap<u8> {
        &self.variation_counts
    }

    /// Draw and store the hidden target.
    ///
    /// Replaces any previous target and clears the spawn state.
    pub fn generate_target(&mut self, rng: &mut GameRng) -> PieceDescriptor {
        let target = self.random_descriptor(rng).as_final_target();
        self.target = Some(target.clone());
        self.spawn_armed = false;
        self.target_spawned = false;
        target
    }

    /// The hidden target, once generated.
    #[must_use]
    pub fn target(&self) -> Option<&PieceDescriptor> {
        self.target.as_ref()
    }

    /// Draw a descriptor.
    ///
    /// With `as_target`, returns the stored target the first time it is asked
    /// for; any further request falls through to an ordinary draw. Ordinary
    /// draws are never equivalent to the target.
    pub fn generate(&mut self, as_target: bool, rng: &mut GameRng) -> PieceDescriptor {
        if as_target && !self.target_spawned {
            if let Some(target) = &self.target {
                self.target_spawned = true;
                return target.clone();
            }
        }

        loop {
            let candidate = self.random_descriptor(rng);
            match &self.target {
                Some(target) if target.is_equivalent(&candidate) => continue,
                _ => return candidate,
            }
        }
    }

    /// Ask the next `fill_grid` to include the final target.
    pub fn arm_final_target(&mut self) {
        self.spawn_armed = true;
    }

    /// Is a final-target spawn pending?
    #[must_use]
    pub fn spawn_pending(&self) -> bool {
        self.spawn_armed && !self.target_spawned
    }

    /// Has the final target been handed out?
    #[must_use]
    pub fn target_spawned(&self) -> bool {
        self.target_spawned
    }

    /// Descriptors for `open_slots` empty cells.
    ///
    /// When a spawn is pending and there is room, exactly one of them is the
    /// target, at a uniformly random index.
    pub fn fill_grid(&mut self, open_slots: usize, rng: &mut GameRng) -> Vec<PieceDescriptor> {
        let target_index = if self.spawn_pending() && open_slots > 0 {
            Some(rng.gen_index(open_slots))
        } else {
            None
        };

        (0..open_slots)
            .map(|i| self.generate(Some(i) == target_index, rng))
            .collect()
    }

    fn random_descriptor(&self, rng: &mut GameRng) -> PieceDescriptor {
        let counts = self.variation_counts;
        PieceDescriptor::new(CategoryMap::new(|category| rng.gen_variation(counts[category])))
    }
}
