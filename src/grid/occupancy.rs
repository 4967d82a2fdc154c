//! Piece locations on the board.
//!
//! `GridOccupancy` maps pieces to cells of a `GridTopology` and handles:
//! - Random placement into the lowest open cell of a random column
//! - Removal by piece identity
//! - Gravity compaction (pieces settle into the lowest usable cells of their
//!   column, keeping their order; they never change column)
//!
//! Batch operations (`place_all`, `remove_all`) either fully succeed or leave
//! the board untouched.

use crate::core::{GameRng, GridPos, PieceId};

use super::topology::GridTopology;

/// Manages which piece sits in which cell.
///
/// ## Usage
///
/// ```
/// use lineup_engine::grid::{GridOccupancy, GridTopology};
/// use lineup_engine::core::{GameRng, PieceId};
///
/// let mut grid = GridOccupancy::new(GridTopology::full(3, 3).unwrap());
/// let mut rng = GameRng::new(42);
///
/// assert_eq!(grid.open_slot_count(), 9);
/// assert!(grid.place_all(&[PieceId(1), PieceId(2)], &mut rng));
/// assert_eq!(grid.open_slot_count(), 7);
///
/// assert!(grid.remove_all(&[PieceId(1)]));
/// assert!(!grid.contains(PieceId(1)));
/// ```
#[derive(Clone, Debug)]
pub struct GridOccupancy {
    topology: GridTopology,
    /// `cells[col][row]`, row 0 at the bottom.
    cells: Vec<Vec<Option<PieceId>>>,
}

impl GridOccupancy {
    /// Create an empty board over the given topology.
    #[must_use]
    pub fn new(topology: GridTopology) -> Self {
        let cells = vec![vec![None; topology.rows()]; topology.cols()];
        Self { topology, cells }
    }

    /// The board shape.
    #[must_use]
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Number of usable cells without a piece.
    #[must_use]
    pub fn open_slot_count(&self) -> usize {
        (0..self.topology.cols()).map(|col| self.open_in_column(col)).sum()
    }

    /// Number of usable, empty cells in one column.
    #[must_use]
    pub fn open_in_column(&self, col: usize) -> usize {
        self.topology
            .column_cells(col)
            .iter()
            .zip(&self.cells[col])
            .filter(|(&usable, cell)| usable && cell.is_none())
            .count()
    }

    /// Place a piece in the lowest open cell of a random column.
    ///
    /// The column is drawn uniformly among columns with at least one open
    /// cell. Returns false, with no change, if the board is full.
    ///
    /// Panics if the piece is already on the board.
    pub fn place(&mut self, piece: PieceId, rng: &mut GameRng) -> bool {
        if self.contains(piece) {
            panic!("{} is already on the grid", piece);
        }

        let open_cols: Vec<usize> = (0..self.topology.cols())
            .filter(|&col| self.open_in_column(col) > 0)
            .collect();

        let Some(&col) = rng.choose(&open_cols) else {
            return false;
        };
        let Some(row) = self.lowest_open_row(col) else {
            return false;
        };

        self.cells[col][row] = Some(piece);
        true
    }

    /// Place pieces in order, then compact.
    ///
    /// Fails without placing anything when the pieces do not all fit.
    pub fn place_all(&mut self, pieces: &[PieceId], rng: &mut GameRng) -> bool {
        if pieces.len() > self.open_slot_count() {
            return false;
        }

        for &piece in pieces {
            if !self.place(piece, rng) {
                return false;
            }
        }

        self.compact();
        true
    }

    /// Remove a piece. Returns false if it is not on the board.
    pub fn remove(&mut self, piece: PieceId) -> bool {
        for column in &mut self.cells {
            if let Some(cell) = column.iter_mut().find(|cell| **cell == Some(piece)) {
                *cell = None;
                return true;
            }
        }
        false
    }

    /// Remove pieces, then compact.
    ///
    /// Fails without removing anything if any piece is missing from the
    /// board.
    pub fn remove_all(&mut self, pieces: &[PieceId]) -> bool {
        if !pieces.iter().all(|&piece| self.contains(piece)) {
            return false;
        }

        for &piece in pieces {
            self.remove(piece);
        }

        self.compact();
        true
    }

    /// Let every column settle under gravity.
    ///
    /// Pieces keep their relative order and fill the lowest usable cells;
    /// disabled cells are skipped. Compacting a settled board changes
    /// nothing.
    pub fn compact(&mut self) {
        for col in 0..self.topology.cols() {
            let usable = self.topology.column_cells(col);
            let column = &mut self.cells[col];

            let settled: Vec<PieceId> = column.iter_mut().filter_map(Option::take).collect();
            let mut settled = settled.into_iter();

            for (row, &is_usable) in usable.iter().enumerate() {
                if !is_usable {
                    continue;
                }
                match settled.next() {
                    Some(piece) => column[row] = Some(piece),
                    None => break,
                }
            }
        }
    }

    fn lowest_open_row(&self, col: usize) -> Option<usize> {
        self.topology
            .column_cells(col)
            .iter()
            .zip(&self.cells[col])
            .position(|(&usable, cell)| usable && cell.is_none())
    }

    // === Lookup ===

    /// Is the piece on the board?
    #[must_use]
    pub fn contains(&self, piece: PieceId) -> bool {
        self.position_of(piece).is_some()
    }

    /// Cell holding the piece.
    #[must_use]
    pub fn position_of(&self, piece: PieceId) -> Option<GridPos> {
        self.pieces()
            .find(|&(id, _)| id == piece)
            .map(|(_, pos)| pos)
    }

    /// Piece in a cell, if any.
    #[must_use]
    pub fn piece_at(&self, pos: GridPos) -> Option<PieceId> {
        if !self.topology.contains(pos) {
            return None;
        }
        self.cells[pos.col as usize][pos.row as usize]
    }

    /// Every placed piece with its cell, column by column, bottom-up.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, GridPos)> + '_ {
        self.cells.iter().enumerate().flat_map(|(col, column)| {
            column.iter().enumerate().filter_map(move |(row, cell)| {
                cell.map(|piece| (piece, GridPos::new(col as u8, row as u8)))
            })
        })
    }

    /// Pieces in the up-to-eight cells around `pos`.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = PieceId> + '_ {
        let (col, row) = (pos.col as i16, pos.row as i16);
        (-1i16..=1)
            .flat_map(move |dc| (-1i16..=1).map(move |dr| (col + dc, row + dr)))
            .filter(move |&(c, r)| (c, r) != (col, row) && c >= 0 && r >= 0)
            .filter_map(move |(c, r)| self.piece_at(GridPos::new(c as u8, r as u8)))
    }

    /// Number of placed pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces().count()
    }

    /// True when no piece is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none()
    }
}
