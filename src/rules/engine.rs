//! The run orchestrator.
//!
//! `Run` owns every component of a game in progress (board, generator,
//! wheel, chain, counters, RNG) and the event sink. It maps player input to
//! component calls and drives the turn sequence.
//!
//! ## Input
//!
//! - `pointer_down(piece)` starts a chain at the piece.
//! - `pointer_enter(piece)` offers the piece to the chain.
//! - `pointer_up()` submits the chain. Chains shorter than
//!   [`MIN_CHAIN_LEN`] are dropped without touching the counters.
//! - `clear_selection()` abandons the chain.
//! - `skip_turn()` submits an empty chain when the board is stuck.
//!
//! ## Turn sequence
//!
//! `complete_chain` runs, in order:
//! 1. take the target category off the wheel
//! 2. score
//! 3. lives (defeat stops here)
//! 4. target category progress
//! 5. final-target capture (victory stops here)
//! 6. every category complete: arm the final target, reset the wheel and
//!    spin a selection category
//! 7. otherwise spin a new target category if this turn completed one, or
//!    a new selection category if not
//!
//! A submitted chain is then removed from the board, survivors fall, and
//! the board is refilled.
//!
//! ## Example
//!
//! ```
//! use lineup_engine::core::RunConfig;
//! use lineup_engine::events::RecordingSink;
//! use lineup_engine::rules::{Run, SubmitOutcome};
//!
//! let config = RunConfig::new().with_grid_mask(["OOOO", "OOOO", "OOOO", "OOOO"]);
//! let mut run = Run::new(config, 42, RecordingSink::new()).unwrap();
//!
//! if let Some(chain) = run.find_chain_hint() {
//!     run.pointer_down(chain[0]).unwrap();
//!     for &piece in &chain[1..] {
//!         run.pointer_enter(piece).unwrap();
//!     }
//!     let outcome = run.pointer_up().unwrap();
//!     assert!(matches!(outcome, SubmitOutcome::Completed(_)));
//!     assert_eq!(run.state().turn, 1);
//! }
//! assert_eq!(run.grid().open_slot_count(), 0);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    Category, EngineError, GameRng, PieceId, Result, RunConfig, RunState, RunStatus,
};
use crate::events::{EventSink, GameEvent, NullSink, SelectionState};
use crate::grid::{GridOccupancy, GridTopology};
use crate::pieces::{Piece, PieceDescriptor, PieceGenerator};
use crate::selection::{ExtendOutcome, SelectionChain, MIN_CHAIN_LEN};
use crate::wheel::AttributeWheel;

use super::snapshot::{PieceView, RunSnapshot};

/// What one `complete_chain` call did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Pieces in the chain.
    pub chain_len: usize,
    /// Pieces carrying the target value.
    pub matches: usize,
    /// Points awarded.
    pub chain_score: u64,
    /// Lives after the turn.
    pub lives: u32,
    /// Category completed by this turn, if any.
    pub completed_category: Option<Category>,
    /// Run status after the turn.
    pub status: RunStatus,
}

/// Result of `pointer_up`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// Fewer than `MIN_CHAIN_LEN` pieces; the chain was dropped.
    TooShort,
    /// The chain was scored and removed.
    Completed(TurnOutcome),
}

/// A game in progress.
pub struct Run<S: EventSink = NullSink> {
    config: RunConfig,
    grid: GridOccupancy,
    generator: PieceGenerator,
    wheel: AttributeWheel,
    chain: SelectionChain,
    state: RunState,
    /// Hidden target, kept for target values and the mugshot.
    target: PieceDescriptor,
    pieces: FxHashMap<PieceId, Piece>,
    rng: GameRng,
    sink: S,
    next_id: u32,
}

impl<S: EventSink> Run<S> {
    /// Start a run: draw the target, spin the first target category, fill
    /// the board and report the initial state to the sink.
    pub fn new(config: RunConfig, seed: u64, sink: S) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected run configuration");
            return Err(err);
        }
        let topology = GridTopology::from_rows(&config.grid_mask)?;
        let mut generator = PieceGenerator::new(config.variation_counts)?;
        let mut rng = GameRng::new(seed);

        let target = generator.generate_target(&mut rng);
        let wheel = AttributeWheel::new();
        let first = wheel.spin(&mut rng)?;
        let state = RunState::new(&config, first, target.variation(first));

        let mut run = Self {
            grid: GridOccupancy::new(topology),
            generator,
            wheel,
            chain: SelectionChain::new(),
            state,
            target,
            pieces: FxHashMap::default(),
            rng,
            sink,
            next_id: 0,
            config,
        };

        run.refill();
        info!(
            seed,
            pieces = run.pieces.len(),
            target_category = %run.state.target_category,
            "run started"
        );

        run.emit(GameEvent::TargetChanged {
            category: run.state.target_category,
            value: run.state.target_value,
        });
        run.emit(GameEvent::SelectionCategoryChanged {
            category: run.state.selection_category,
        });
        run.emit(GameEvent::ScoreChanged { score: run.state.score });
        run.emit_lives();
        run.emit_progress();
        run.emit_mugshot();

        Ok(run)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Counters and targeting.
    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    #[must_use]
    pub fn grid(&self) -> &GridOccupancy {
        &self.grid
    }

    #[must_use]
    pub fn chain(&self) -> &SelectionChain {
        &self.chain
    }

    #[must_use]
    pub fn wheel(&self) -> &AttributeWheel {
        &self.wheel
    }

    #[must_use]
    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    /// The hidden target descriptor.
    #[must_use]
    pub fn target(&self) -> &PieceDescriptor {
        &self.target
    }

    /// Look up a live piece.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Every live piece, in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the run and hand back its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // === Input ===

    /// Start a new chain at `piece`, dropping any chain in progress.
    pub fn pointer_down(&mut self, piece: PieceId) -> Result<()> {
        self.ensure_active()?;
        let descriptor = &self.piece_or_err(piece)?.descriptor;
        let category = self.state.selection_category;
        let value = descriptor.variation(category);

        let previous = self.chain.start(piece, category, value);
        for old in previous.into_iter().filter(|&old| old != piece) {
            self.emit(GameEvent::SelectionChanged {
                piece: old,
                state: SelectionState::Unselected,
            });
        }
        self.emit(GameEvent::SelectionChanged {
            piece,
            state: SelectionState::StartOfChain,
        });
        self.emit_chain_path();
        debug!(%piece, %category, value, "chain started");
        Ok(())
    }

    /// Offer a hovered piece to the chain.
    ///
    /// Without an active chain this is `Rejected` and emits nothing.
    pub fn pointer_enter(&mut self, piece: PieceId) -> Result<ExtendOutcome> {
        self.ensure_active()?;
        self.piece_or_err(piece)?;

        let pieces = &self.pieces;
        let outcome = self
            .chain
            .try_extend(piece, |id| pieces.get(&id).map(|p| &p.descriptor));

        match &outcome {
            ExtendOutcome::Added => {
                self.emit(GameEvent::SelectionChanged {
                    piece,
                    state: SelectionState::PartOfChain,
                });
                self.emit_chain_path();
            }
            ExtendOutcome::Backtracked { removed } => {
                for &old in removed {
                    self.emit(GameEvent::SelectionChanged {
                        piece: old,
                        state: SelectionState::Unselected,
                    });
                }
                self.emit_chain_path();
            }
            ExtendOutcome::Ineligible => {
                self.emit(GameEvent::SelectionChanged {
                    piece,
                    state: SelectionState::Ineligible,
                });
            }
            ExtendOutcome::Rejected if !self.chain.is_empty() => {
                // Clears a stale ineligible highlight
                self.emit(GameEvent::SelectionChanged {
                    piece,
                    state: SelectionState::Unselected,
                });
            }
            ExtendOutcome::Rejected | ExtendOutcome::Unchanged => {}
        }

        Ok(outcome)
    }

    /// Submit the chain.
    pub fn pointer_up(&mut self) -> Result<SubmitOutcome> {
        self.ensure_active()?;
        if self.chain.is_empty() {
            return Err(EngineError::NoActiveChain);
        }

        if self.chain.len() < MIN_CHAIN_LEN {
            debug!(len = self.chain.len(), "chain too short, dropped");
            self.clear_selection();
            return Ok(SubmitOutcome::TooShort);
        }

        let members: Vec<PieceId> = self.chain.pieces().to_vec();
        let outcome = self.complete_chain(&members)?;

        self.chain.clear();
        self.emit_chain_path();
        self.remove_pieces(&members)?;
        if !self.state.status.is_terminal() {
            self.refill();
        }

        Ok(SubmitOutcome::Completed(outcome))
    }

    /// Abandon the chain and unhighlight its pieces.
    pub fn clear_selection(&mut self) {
        let cleared = self.chain.clear();
        if cleared.is_empty() {
            return;
        }
        for piece in cleared {
            self.emit(GameEvent::SelectionChanged {
                piece,
                state: SelectionState::Unselected,
            });
        }
        self.emit_chain_path();
    }

    /// Submit an empty chain to get past a board with no valid chain.
    ///
    /// Scores nothing and costs a life, but still spins the wheel.
    pub fn skip_turn(&mut self) -> Result<TurnOutcome> {
        self.ensure_active()?;
        self.clear_selection();
        info!(turn = self.state.turn + 1, "turn skipped");
        self.complete_chain(&[])
    }

    // === Turn sequence ===

    /// Run the turn sequence for a chain.
    ///
    /// Updates counters, targeting and the wheel. Does not touch the board;
    /// `pointer_up` removes and refills afterwards.
    pub fn complete_chain(&mut self, chain: &[PieceId]) -> Result<TurnOutcome> {
        self.ensure_active()?;
        let mut matches = 0;
        let mut captured = false;
        for &id in chain {
            let piece = self.piece_or_err(id)?;
            if self.state.matches_target(&piece.descriptor) {
                matches += 1;
            }
            captured |= piece.is_final_target();
        }
        let len = chain.len();

        self.wheel.delete_category(self.state.target_category);

        let chain_score = self.state.apply_score(len, matches);
        debug!(len, matches, chain_score, "chain scored");
        self.emit(GameEvent::ScoreChanged { score: self.state.score });

        let defeated = self.state.apply_lives(len, matches);
        self.emit_lives();
        if defeated {
            return Ok(self.finish_turn(len, matches, chain_score, None));
        }

        let newly_completed = self.state.apply_progress(matches);
        self.emit_progress();
        let completed_category = newly_completed.then_some(self.state.target_category);
        if let Some(category) = completed_category {
            info!(%category, "category completed");
        }

        if captured {
            self.state.status = RunStatus::Victory;
            return Ok(self.finish_turn(len, matches, chain_score, completed_category));
        }

        if self.state.all_completed() {
            if !self.generator.target_spawned() {
                self.generator.arm_final_target();
            }
            self.wheel.reset();
            self.spin_selection()?;
        } else if newly_completed {
            self.spin_target()?;
        } else {
            self.wheel.reset();
            self.wheel.delete_category(self.state.target_category);
            self.spin_selection()?;
        }

        self.emit_mugshot();
        Ok(self.finish_turn(len, matches, chain_score, completed_category))
    }

    fn finish_turn(
        &mut self,
        len: usize,
        matches: usize,
        chain_score: u64,
        completed_category: Option<Category>,
    ) -> TurnOutcome {
        self.state.record_turn(len, matches, chain_score);
        let status = self.state.status;
        if status.is_terminal() {
            let victory = status == RunStatus::Victory;
            info!(victory, score = self.state.score, turns = self.state.turn, "run ended");
            self.emit(GameEvent::RunEnded { victory });
        }
        TurnOutcome {
            chain_len: len,
            matches,
            chain_score,
            lives: self.state.lives,
            completed_category,
            status,
        }
    }

    /// New target category among the ones not yet completed.
    fn spin_target(&mut self) -> Result<()> {
        self.wheel.reset();
        for category in Category::all().filter(|&c| self.state.is_completed(c)) {
            self.wheel.delete_category(category);
        }
        let category = self.wheel.spin(&mut self.rng)?;
        let value = self.target.variation(category);
        self.state.set_target(category, value);
        debug!(%category, value, "new target category");
        self.emit(GameEvent::TargetChanged { category, value });
        self.emit(GameEvent::SelectionCategoryChanged { category });
        Ok(())
    }

    /// New selection category from whatever is on the wheel.
    fn spin_selection(&mut self) -> Result<()> {
        let category = self.wheel.spin(&mut self.rng)?;
        self.state.set_selection(category);
        debug!(%category, "new selection category");
        self.emit(GameEvent::SelectionCategoryChanged { category });
        Ok(())
    }

    // === Board ===

    fn remove_pieces(&mut self, ids: &[PieceId]) -> Result<()> {
        if let Some(&missing) = ids.iter().find(|&&id| !self.grid.contains(id)) {
            return Err(EngineError::UnknownPiece(missing));
        }
        self.grid.remove_all(ids);
        for &id in ids {
            self.pieces.remove(&id);
            self.emit(GameEvent::PieceRemoved { piece: id });
        }
        self.sync_locations();
        Ok(())
    }

    /// Fill every open cell and report moved and new pieces.
    fn refill(&mut self) {
        let open = self.grid.open_slot_count();
        let descriptors = self.generator.fill_grid(open, &mut self.rng);
        self.admit(descriptors);
    }

    /// Give fresh descriptors ids and drop them onto the board.
    ///
    /// Returns `false` and leaves the arena untouched when the board cannot
    /// take all of them.
    fn admit(&mut self, descriptors: Vec<PieceDescriptor>) -> bool {
        let first_id = self.next_id;
        let mut ids = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let id = PieceId::new(self.next_id);
            self.next_id += 1;
            self.pieces.insert(id, Piece::new(id, descriptor));
            ids.push(id);
        }

        if !self.grid.place_all(&ids, &mut self.rng) {
            warn!(
                pieces = ids.len(),
                open = self.grid.open_slot_count(),
                "refill does not fit the board, discarded"
            );
            for id in &ids {
                self.pieces.remove(id);
            }
            self.next_id = first_id;
            return false;
        }
        if let Some(id) = ids.iter().find(|&&id| self.pieces[&id].is_final_target()) {
            info!(%id, "final target spawned");
        }
        self.sync_locations();
        true
    }

    fn sync_locations(&mut self) {
        let mut moved = Vec::new();
        for (id, pos) in self.grid.pieces() {
            if let Some(piece) = self.pieces.get_mut(&id) {
                if piece.descriptor.location != Some(pos) {
                    piece.descriptor.location = Some(pos);
                    moved.push(GameEvent::PiecePlaced { piece: id, pos });
                }
            }
        }
        for event in moved {
            self.emit(event);
        }
    }

    // === Queries ===

    /// A scoring chain under the current selection category, if the board
    /// has one.
    #[must_use]
    pub fn find_chain_hint(&self) -> Option<Vec<PieceId>> {
        let category = self.state.selection_category;
        let value_of = |id: PieceId| self.pieces.get(&id).map(|p| p.descriptor.variation(category));

        for (first, first_pos) in self.grid.pieces() {
            let Some(value) = value_of(first) else { continue };
            for second in self.grid.neighbors(first_pos) {
                if value_of(second) != Some(value) {
                    continue;
                }
                let Some(second_pos) = self.pieces.get(&second).and_then(|p| p.descriptor.location) else {
                    continue;
                };
                let third = self
                    .grid
                    .neighbors(second_pos)
                    .find(|&third| third != first && value_of(third) == Some(value));
                if let Some(third) = third {
                    return Some(vec![first, second, third]);
                }
            }
        }
        None
    }

    /// Serializable view of the whole run.
    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        let topology = self.grid.topology();
        let pieces = self
            .grid
            .pieces()
            .filter_map(|(id, pos)| {
                self.pieces.get(&id).map(|piece| PieceView {
                    id,
                    pos,
                    variations: piece.descriptor.variations,
                    is_final_target: piece.is_final_target(),
                })
            })
            .collect();

        RunSnapshot {
            cols: topology.cols(),
            rows: topology.rows(),
            usable: (0..topology.cols()).map(|col| topology.column_cells(col).to_vec()).collect(),
            pieces,
            chain: self.chain.pieces().to_vec(),
            target_category: self.state.target_category,
            target_value: self.state.target_value,
            selection_category: self.state.selection_category,
            progress: self.state.progress,
            completed: self.state.completed,
            completion_threshold: self.state.completion_threshold(),
            score: self.state.score,
            lives: self.state.lives,
            max_lives: self.state.max_lives(),
            life_progress: self.state.life_progress,
            pieces_per_extra_life: self.state.pieces_per_extra_life(),
            status: self.state.status,
            turn: self.state.turn,
            history: self.state.history.clone(),
        }
    }

    // === Helpers ===

    fn ensure_active(&self) -> Result<()> {
        if self.state.status.is_terminal() {
            return Err(EngineError::RunOver);
        }
        Ok(())
    }

    fn piece_or_err(&self, id: PieceId) -> Result<&Piece> {
        self.pieces.get(&id).ok_or(EngineError::UnknownPiece(id))
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.emit(event);
    }

    fn emit_lives(&mut self) {
        self.emit(GameEvent::LivesChanged {
            lives: self.state.lives,
            progress: self.state.life_progress,
            per_life: self.state.pieces_per_extra_life(),
        });
    }

    fn emit_progress(&mut self) {
        let category = self.state.target_category;
        self.emit(GameEvent::CategoryProgress {
            category,
            progress: self.state.progress[category],
            threshold: self.state.completion_threshold(),
        });
    }

    fn emit_mugshot(&mut self) {
        self.emit(GameEvent::Mugshot {
            variations: self.target.variations,
            completed: self.state.completed,
            target_category: self.state.target_category,
            all_complete: self.state.all_completed(),
        });
    }

    fn emit_chain_path(&mut self) {
        let points = self
            .chain
            .pieces()
            .iter()
            .filter_map(|id| self.pieces.get(id).and_then(|p| p.descriptor.location))
            .collect();
        self.emit(GameEvent::ChainPath { points });
    }
}
