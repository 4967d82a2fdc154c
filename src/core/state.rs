//! Run state: score, lives, per-category progress, current target.
//!
//! `RunState` holds the counters of one run and the arithmetic of a turn
//! (score, lives, category progress). It does not know about the grid or the
//! wheel; `rules::Run` sequences these steps and feeds them the chain.
//!
//! ## Target vs selection category
//!
//! - The **target category** is the category currently being completed.
//!   Pieces whose variation in it equals the target value (taken from the
//!   hidden target descriptor) score the multiplier, spare a life, and add
//!   progress.
//! - The **selection category** is the category chains are matched by. It
//!   equals the target category right after a new target is spun and is
//!   re-spun among the other categories after every ordinary turn.
//!
//! Turn history is kept in an `im::Vector` so snapshots stay cheap to clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryMap};
use super::config::RunConfig;
use crate::pieces::PieceDescriptor;

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// Turns are accepted.
    Active,
    /// The final target was captured.
    Victory,
    /// Lives reached zero.
    Defeat,
}

impl RunStatus {
    /// True for `Victory` and `Defeat`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Active)
    }
}

/// One completed turn, as recorded in the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (starts at 1).
    pub turn: u32,
    /// Category that was the target during the turn.
    pub target_category: Category,
    /// Pieces in the submitted chain.
    pub chain_len: usize,
    /// Pieces carrying the target value.
    pub matches: usize,
    /// Points awarded for the chain.
    pub chain_score: u64,
    /// Lives after the turn.
    pub lives_after: u32,
}

/// Mutable counters of a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunState {
    // === Rules ===
    max_lives: u32,
    pieces_per_extra_life: u32,
    completion_threshold: u32,
    points_per_piece: u64,
    multiplier: f64,

    // === Targeting ===
    /// Category being completed.
    pub target_category: Category,

    /// Variation of the hidden target in `target_category`.
    pub target_value: u8,

    /// Category chains are currently matched by.
    pub selection_category: Category,

    // === Progress ===
    /// Target matches collected per category, clamped at the threshold.
    pub progress: CategoryMap<u32>,

    /// Categories whose progress reached the threshold.
    pub completed: CategoryMap<bool>,

    // === Totals ===
    /// Cumulative score.
    pub score: u64,

    /// Current lives, never above the cap.
    pub lives: u32,

    /// Pieces cleared toward the next extra life.
    pub life_progress: u32,

    /// Run lifecycle.
    pub status: RunStatus,

    /// Number of completed turns.
    pub turn: u32,

    /// Every completed turn, oldest first.
    pub history: Vector<TurnRecord>,
}

impl RunState {
    /// Create the state for a new run with its first target.
    #[must_use]
    pub fn new(config: &RunConfig, target_category: Category, target_value: u8) -> Self {
        Self {
            max_lives: config.max_lives,
            pieces_per_extra_life: config.pieces_per_extra_life,
            completion_threshold: config.pieces_per_completed_category,
            points_per_piece: config.points_per_piece,
            multiplier: config.target_variation_multiplier,
            target_category,
            target_value,
            selection_category: target_category,
            progress: CategoryMap::with_value(0),
            completed: CategoryMap::with_value(false),
            score: 0,
            lives: config.starting_lives.min(config.max_lives),
            life_progress: 0,
            status: RunStatus::Active,
            turn: 0,
            history: Vector::new(),
        }
    }

    /// Life cap.
    #[must_use]
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Pieces per extra life.
    #[must_use]
    pub fn pieces_per_extra_life(&self) -> u32 {
        self.pieces_per_extra_life
    }

    /// Matches needed to complete a category.
    #[must_use]
    pub fn completion_threshold(&self) -> u32 {
        self.completion_threshold
    }

    // === Targeting ===

    /// Switch to a new target category; selection follows it.
    pub fn set_target(&mut self, category: Category, value: u8) {
        self.target_category = category;
        self.target_value = value;
        self.selection_category = category;
    }

    /// Change only the category chains are matched by.
    pub fn set_selection(&mut self, category: Category) {
        self.selection_category = category;
    }

    /// Does this piece carry the target value in the target category?
    #[must_use]
    pub fn matches_target(&self, descriptor: &PieceDescriptor) -> bool {
        descriptor.variation(self.target_category) == self.target_value
    }

    /// Is the category completed?
    #[must_use]
    pub fn is_completed(&self, category: Category) -> bool {
        self.completed[category]
    }

    /// True once every category is completed.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.completed.values().all(|&done| done)
    }

    // === Turn arithmetic ===

    /// Points for a chain of `chain_len` pieces with `matches` target pieces.
    ///
    /// The base score is multiplied once per matching piece and rounded to
    /// the nearest integer after each multiplication. Saturates at
    /// `u64::MAX`.
    #[must_use]
    pub fn chain_score(&self, chain_len: usize, matches: usize) -> u64 {
        let mut score = (chain_len as u64).saturating_mul(self.points_per_piece);
        for _ in 0..matches {
            // Float-to-int casts saturate.
            score = (score as f64 * self.multiplier).round() as u64;
        }
        score
    }

    /// Add a chain's points to the total and return them.
    pub fn apply_score(&mut self, chain_len: usize, matches: usize) -> u64 {
        let points = self.chain_score(chain_len, matches);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Update lives for a chain. Returns true if the run is now lost.
    ///
    /// Below the cap, every cleared piece counts toward extra lives. A chain
    /// with no target match costs one life.
    pub fn apply_lives(&mut self, chain_len: usize, matches: usize) -> bool {
        if self.lives < self.max_lives {
            self.life_progress = self
                .life_progress
                .saturating_add(u32::try_from(chain_len).unwrap_or(u32::MAX));

            if self.life_progress >= self.pieces_per_extra_life {
                let gained = self.life_progress / self.pieces_per_extra_life;
                self.lives = self.lives.saturating_add(gained).min(self.max_lives);
                self.life_progress = if self.lives >= self.max_lives {
                    0
                } else {
                    self.life_progress % self.pieces_per_extra_life
                };
            }
        }

        if matches == 0 {
            self.lives = self.lives.saturating_sub(1);
        }

        if self.lives == 0 {
            self.status = RunStatus::Defeat;
            return true;
        }
        false
    }

    /// Add target matches to the target category.
    ///
    /// Returns true if the category became completed on this call.
    pub fn apply_progress(&mut self, matches: usize) -> bool {
        let category = self.target_category;
        let added = u32::try_from(matches).unwrap_or(u32::MAX);
        let progress = self.progress[category].saturating_add(added);

        if progress >= self.completion_threshold {
            self.progress[category] = self.completion_threshold;
            let newly = !self.completed[category];
            self.completed[category] = true;
            newly
        } else {
            self.progress[category] = progress;
            false
        }
    }

    /// Record a finished turn.
    pub fn record_turn(&mut self, chain_len: usize, matches: usize, chain_score: u64) {
        self.turn += 1;
        self.history.push_back(TurnRecord {
            turn: self.turn,
            target_category: self.target_category,
            chain_len,
            matches,
            chain_score,
            lives_after: self.lives,
        });
    }
}
