//! Board tests.
//!
//! Placement, removal and gravity on masked boards through the public
//! `grid` API.

use lineup_engine::core::{GameRng, GridPos, PieceId};
use lineup_engine::grid::{GridOccupancy, GridTopology};

fn ids(n: u32) -> Vec<PieceId> {
    (0..n).map(PieceId::new).collect()
}

/// Test that a mask with holes fills exactly its usable cells.
#[test]
fn test_fill_masked_board() {
    let topology = GridTopology::from_mask_str(
        "
        OOOOO
        O.O.O
        OOOOO
        ..O..
        ",
    )
    .unwrap();
    let usable = topology.usable_count();
    let mut grid = GridOccupancy::new(topology);
    let mut rng = GameRng::new(17);

    assert_eq!(usable, 14);
    assert!(grid.place_all(&ids(14), &mut rng));
    assert_eq!(grid.open_slot_count(), 0);
    assert!(!grid.place_all(&[PieceId(100)], &mut rng));
}

/// Test that removal from the bottom drops the column past a hole.
#[test]
fn test_column_falls_past_hole() {
    // Column 0 bottom-up: usable, disabled, usable, usable
    let topology = GridTopology::from_rows(&["OO", "OO", ".O", "OO"]).unwrap();
    let mut grid = GridOccupancy::new(topology);
    let mut rng = GameRng::new(2);
    assert!(grid.place_all(&ids(7), &mut rng));

    let bottom = grid.piece_at(GridPos::new(0, 0)).unwrap();
    let middle = grid.piece_at(GridPos::new(0, 2)).unwrap();
    let top = grid.piece_at(GridPos::new(0, 3)).unwrap();

    assert!(grid.remove_all(&[bottom]));

    assert_eq!(grid.position_of(middle), Some(GridPos::new(0, 0)));
    assert_eq!(grid.position_of(top), Some(GridPos::new(0, 2)));
    assert_eq!(grid.piece_at(GridPos::new(0, 1)), None);
    assert_eq!(grid.open_in_column(0), 1);
}

/// Test that columns never exchange pieces under gravity.
#[test]
fn test_gravity_keeps_columns() {
    let mut grid = GridOccupancy::new(GridTopology::full(4, 5).unwrap());
    let mut rng = GameRng::new(4);
    assert!(grid.place_all(&ids(20), &mut rng));
    let columns: Vec<(PieceId, u8)> = grid.pieces().map(|(id, pos)| (id, pos.col)).collect();

    let removed: Vec<PieceId> = grid.pieces().filter(|(_, pos)| pos.row % 2 == 0).map(|(id, _)| id).collect();
    assert!(grid.remove_all(&removed));

    for (id, col) in columns {
        if let Some(pos) = grid.position_of(id) {
            assert_eq!(pos.col, col);
        }
    }
    for col in 0..4 {
        // Survivors sit at the bottom of each column
        assert_eq!(grid.open_in_column(col), 3);
        assert!(grid.piece_at(GridPos::new(col as u8, 0)).is_some());
        assert!(grid.piece_at(GridPos::new(col as u8, 1)).is_some());
    }
}

/// Test that placement spreads across columns.
#[test]
fn test_placement_uses_every_column() {
    let mut seen = [false; 5];

    for seed in 0..100 {
        let mut grid = GridOccupancy::new(GridTopology::full(5, 5).unwrap());
        let mut rng = GameRng::new(seed);
        assert!(grid.place(PieceId(0), &mut rng));
        let pos = grid.position_of(PieceId(0)).unwrap();
        assert_eq!(pos.row, 0);
        seen[pos.col as usize] = true;
    }

    assert!(seen.iter().all(|&s| s));
}

/// Test the fall links of a ragged column.
#[test]
fn test_links_describe_fall_path() {
    let topology = GridTopology::from_rows(&["O", ".", ".", "O", ".", "O"]).unwrap();

    let mut path = vec![GridPos::new(0, 5)];
    while let Some(next) = topology.next(*path.last().unwrap()) {
        path.push(next);
    }

    assert_eq!(path, vec![GridPos::new(0, 5), GridPos::new(0, 2), GridPos::new(0, 0)]);
    assert_eq!(topology.previous(GridPos::new(0, 0)), Some(GridPos::new(0, 2)));
}
