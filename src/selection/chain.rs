//! The player's in-progress chain.
//!
//! A chain is an ordered list of distinct pieces. Its matching category and
//! value are bound when it starts: the category is the run's selection
//! category, the value is the first piece's variation in it. Every later
//! piece must
//! - sit next to the current tail (8-directional), and
//! - share the bound value.
//!
//! Hovering a piece already in the chain backtracks to it.
//!
//! `try_extend` is a pure decision plus mutation; it returns an
//! `ExtendOutcome` and leaves presentation to the caller.

use smallvec::SmallVec;

use crate::core::{Category, PieceId};
use crate::pieces::PieceDescriptor;

/// Shortest chain that scores.
pub const MIN_CHAIN_LEN: usize = 3;

/// Chain storage; a 9×9 board rarely yields chains past 16 pieces.
pub type ChainPieces = SmallVec<[PieceId; 16]>;

/// Result of offering a piece to the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtendOutcome {
    /// Appended as the new tail.
    Added,
    /// The piece was already in the chain; everything after it was dropped.
    Backtracked {
        /// Pieces removed from the end, in chain order.
        removed: ChainPieces,
    },
    /// The piece is already the tail.
    Unchanged,
    /// Not adjacent to the tail, unknown, or no chain is active.
    Rejected,
    /// Adjacent, but does not carry the bound value.
    Ineligible,
}

impl ExtendOutcome {
    /// Did the chain change?
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, ExtendOutcome::Added | ExtendOutcome::Backtracked { .. })
    }
}

/// Selection chain state.
#[derive(Clone, Debug, Default)]
pub struct SelectionChain {
    pieces: ChainPieces,
    binding: Option<(Category, u8)>,
}

impl SelectionChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new chain at `head`, matching `value` in `category`.
    ///
    /// Returns the pieces of the previous chain, if one was active.
    pub fn start(&mut self, head: PieceId, category: Category, value: u8) -> ChainPieces {
        let previous = self.clear();
        self.binding = Some((category, value));
        self.pieces.push(head);
        previous
    }

    /// Offer a piece to the chain.
    ///
    /// `lookup` resolves piece ids to descriptors; locations are read from
    /// the descriptors.
    pub fn try_extend<'a, F>(&mut self, piece: PieceId, lookup: F) -> ExtendOutcome
    where
        F: Fn(PieceId) -> Option<&'a PieceDescriptor>,
    {
        let (Some((category, value)), Some(&tail)) = (self.binding, self.pieces.last()) else {
            return ExtendOutcome::Rejected;
        };

        if let Some(index) = self.pieces.iter().position(|&p| p == piece) {
            if index + 1 == self.pieces.len() {
                return ExtendOutcome::Unchanged;
            }
            let removed = self.pieces.drain(index + 1..).collect();
            return ExtendOutcome::Backtracked { removed };
        }

        let (Some(candidate), Some(tail_desc)) = (lookup(piece), lookup(tail)) else {
            return ExtendOutcome::Rejected;
        };

        let adjacent = match (candidate.location, tail_desc.location) {
            (Some(a), Some(b)) => a.is_adjacent(b),
            _ => false,
        };
        if !adjacent {
            return ExtendOutcome::Rejected;
        }

        if candidate.variation(category) != value {
            return ExtendOutcome::Ineligible;
        }

        self.pieces.push(piece);
        ExtendOutcome::Added
    }

    /// Empty the chain and return its former members.
    pub fn clear(&mut self) -> ChainPieces {
        self.binding = None;
        std::mem::take(&mut self.pieces)
    }

    /// Pieces in chain order.
    #[must_use]
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Long enough to submit for a score?
    #[must_use]
    pub fn is_scoring(&self) -> bool {
        self.pieces.len() >= MIN_CHAIN_LEN
    }

    #[must_use]
    pub fn contains(&self, piece: PieceId) -> bool {
        self.pieces.contains(&piece)
    }

    /// Last piece of the chain.
    #[must_use]
    pub fn tail(&self) -> Option<PieceId> {
        self.pieces.last().copied()
    }

    /// Bound matching category, while a chain is active.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.binding.map(|(category, _)| category)
    }

    /// Bound matching value, while a chain is active.
    #[must_use]
    pub fn value(&self) -> Option<u8> {
        self.binding.map(|(_, value)| value)
    }
}
