//! Static board shape.
//!
//! A `GridTopology` is built once per level from a rectangular mask and never
//! changes. It records which cells are usable and, for every usable cell, the
//! nearest usable cells above (`previous`) and below (`next`) in the same
//! column. Those links describe how pieces fall past disabled cells.
//!
//! ## Mask format
//!
//! One string per row, top row first. `O` marks a usable cell; any other
//! character (`.` and `X` by convention) marks a disabled one. Rows are
//! transposed into columns, and row indices count up from the bottom:
//!
//! ```
//! use lineup_engine::grid::GridTopology;
//! use lineup_engine::core::GridPos;
//!
//! let topology = GridTopology::from_rows(&["OOO", "O.O", "OOO"]).unwrap();
//!
//! assert_eq!(topology.cols(), 3);
//! assert!(!topology.is_usable(GridPos::new(1, 1)));
//! // The middle column falls straight from the top cell to the bottom one
//! assert_eq!(topology.next(GridPos::new(1, 2)), Some(GridPos::new(1, 0)));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GridPos, Result};

/// Largest supported board edge.
pub const MAX_GRID_EDGE: usize = 9;

/// A usable cell's fall links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLinks {
    /// Nearest usable row strictly above.
    pub previous: Option<u8>,
    /// Nearest usable row strictly below.
    pub next: Option<u8>,
}

/// Usable/disabled cells of a board, stored column-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTopology {
    cols: usize,
    rows: usize,
    /// `usable[col][row]`, row 0 at the bottom.
    usable: Vec<Vec<bool>>,
    /// Links for usable cells; `None` for disabled ones.
    links: Vec<Vec<Option<CellLinks>>>,
}

impl GridTopology {
    /// A fully usable `cols × rows` board.
    pub fn full(cols: usize, rows: usize) -> Result<Self> {
        let row = "O".repeat(cols);
        let mask: Vec<&str> = std::iter::repeat(row.as_str()).take(rows).collect();
        Self::from_rows(&mask)
    }

    /// Parse a multi-line mask. Blank lines are skipped and each line is
    /// trimmed, so indented TOML strings work.
    pub fn from_mask_str(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    /// Build from row strings, top row first.
    pub fn from_rows<S: AsRef<str>>(mask: &[S]) -> Result<Self> {
        let rows = mask.len();
        if rows == 0 || rows > MAX_GRID_EDGE {
            return Err(EngineError::MalformedMask(format!(
                "expected 1..={} rows, got {}",
                MAX_GRID_EDGE, rows
            )));
        }

        let cols = mask[0].as_ref().chars().count();
        if cols == 0 || cols > MAX_GRID_EDGE {
            return Err(EngineError::MalformedMask(format!(
                "expected 1..={} columns, got {}",
                MAX_GRID_EDGE, cols
            )));
        }

        let mut usable = vec![vec![false; rows]; cols];
        for (mask_row, line) in mask.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != cols {
                return Err(EngineError::MalformedMask(format!(
                    "row {} has {} columns, expected {}",
                    mask_row, width, cols
                )));
            }

            // Mask rows run top to bottom; grid rows count from the bottom.
            let row = rows - 1 - mask_row;
            for (col, cell) in line.chars().enumerate() {
                usable[col][row] = cell == 'O';
            }
        }

        if !usable.iter().flatten().any(|&u| u) {
            return Err(EngineError::MalformedMask("no usable cells".into()));
        }

        let links = usable.iter().map(|column| Self::link_column(column)).collect();

        Ok(Self {
            cols,
            rows,
            usable,
            links,
        })
    }

    fn link_column(column: &[bool]) -> Vec<Option<CellLinks>> {
        (0..column.len())
            .map(|row| {
                if !column[row] {
                    return None;
                }
                let previous = (row + 1..column.len()).find(|&r| column[r]).map(|r| r as u8);
                let next = (0..row).rev().find(|&r| column[r]).map(|r| r as u8);
                Some(CellLinks { previous, next })
            })
            .collect()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Is the position inside the board?
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        (pos.col as usize) < self.cols && (pos.row as usize) < self.rows
    }

    /// Is the cell inside the board and usable?
    #[must_use]
    pub fn is_usable(&self, pos: GridPos) -> bool {
        self.contains(pos) && self.usable[pos.col as usize][pos.row as usize]
    }

    /// Usable flags of one column, bottom to top.
    #[must_use]
    pub fn column_cells(&self, col: usize) -> &[bool] {
        &self.usable[col]
    }

    /// Total usable cells.
    #[must_use]
    pub fn usable_count(&self) -> usize {
        self.usable.iter().flatten().filter(|&&u| u).count()
    }

    /// Fall links of a usable cell.
    #[must_use]
    pub fn links(&self, pos: GridPos) -> Option<CellLinks> {
        if !self.contains(pos) {
            return None;
        }
        self.links[pos.col as usize][pos.row as usize]
    }

    /// Nearest usable cell above `pos` in its column.
    #[must_use]
    pub fn previous(&self, pos: GridPos) -> Option<GridPos> {
        let row = self.links(pos)?.previous?;
        Some(GridPos::new(pos.col, row))
    }

    /// Nearest usable cell below `pos` in its column.
    #[must_use]
    pub fn next(&self, pos: GridPos) -> Option<GridPos> {
        let row = self.links(pos)?.next?;
        Some(GridPos::new(pos.col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_grid() {
        let topology = GridTopology::full(3, 4).unwrap();

        assert_eq!(topology.cols(), 3);
        assert_eq!(topology.rows(), 4);
        assert_eq!(topology.usable_count(), 12);
        assert!(topology.is_usable(GridPos::new(2, 3)));
        assert!(!topology.is_usable(GridPos::new(3, 0)));
    }

    #[test]
    fn test_rows_are_flipped() {
        // Top row has a hole in the left column
        let topology = GridTopology::from_rows(&[".OO", "OOO"]).unwrap();

        assert!(topology.is_usable(GridPos::new(0, 0)));
        assert!(!topology.is_usable(GridPos::new(0, 1)));
        assert!(topology.is_usable(GridPos::new(1, 1)));
        assert_eq!(topology.column_cells(0), &[true, false]);
    }

    #[test]
    fn test_links_skip_disabled_cells() {
        let topology = GridTopology::from_rows(&["O", "X", "X", "O", "O"]).unwrap();

        // Rows bottom-up: 0 usable, 1 usable, 2 and 3 disabled, 4 usable
        assert_eq!(topology.previous(GridPos::new(0, 1)), Some(GridPos::new(0, 4)));
        assert_eq!(topology.next(GridPos::new(0, 4)), Some(GridPos::new(0, 1)));
        assert_eq!(topology.next(GridPos::new(0, 0)), None);
        assert_eq!(topology.previous(GridPos::new(0, 4)), None);
        assert_eq!(topology.links(GridPos::new(0, 2)), None);
    }

    #[test]
    fn test_from_mask_str_trims() {
        let topology = GridTopology::from_mask_str(
            "
            OOO
            O.O
            ",
        )
        .unwrap();

        assert_eq!(topology.rows(), 2);
        assert_eq!(topology.usable_count(), 5);
        assert!(!topology.is_usable(GridPos::new(1, 0)));
    }

    #[test]
    fn test_ragged_mask_rejected() {
        let result = GridTopology::from_rows(&["OOO", "OO"]);
        assert!(matches!(result, Err(EngineError::MalformedMask(_))));
    }

    #[test]
    fn test_oversized_mask_rejected() {
        assert!(GridTopology::full(10, 3).is_err());
        assert!(GridTopology::full(3, 10).is_err());
        assert!(GridTopology::full(9, 9).is_ok());
    }

    #[test]
    fn test_empty_mask_rejected() {
        let empty: [&str; 0] = [];
        assert!(GridTopology::from_rows(&empty).is_err());
        assert!(GridTopology::from_rows(&[""]).is_err());
        assert!(GridTopology::from_rows(&["..", "XX"]).is_err());
    }
}
