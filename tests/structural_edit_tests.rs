//! Structural edit tests
//!
//! Row/column insertion and removal must remap the sparse store, the dimension
//! table and the selection with the same index shift, without losing or
//! duplicating any value.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use proptest::prelude::*;
use std::collections::BTreeMap;
use test_case::test_case;
use vgrid::{Axis, CellPos, Grid, GridError};

fn contents(grid: &Grid) -> BTreeMap<(u32, u32), String> {
    grid.cells()
        .iter()
        .map(|(row, col, value)| ((row, col), value.to_string()))
        .collect()
}

fn populated(rows: u32, cols: u32, cells: &[(u32, u32, String)]) -> Grid {
    let mut grid = Grid::with_size(rows, cols).unwrap();
    for (row, col, value) in cells {
        grid.set_cell_value(*row, *col, value.as_str());
    }
    grid
}

#[test]
fn test_insert_row_in_large_grid() {
    let mut grid = Grid::with_size(100_000, 500).unwrap();
    grid.set_cell_value(5, 3, "X");
    grid.insert_row(2).unwrap();
    assert_eq!(grid.cell_value(6, 3), "X");
    assert_eq!(grid.cell_value(5, 3), "");
    assert_eq!(grid.cells().len(), 1);
    assert_eq!(grid.row_count(), 100_001);
}

#[test]
fn test_insert_column_at_populated_index() {
    let mut grid = Grid::with_size(101, 27).unwrap();
    for col in 1..=10 {
        grid.set_cell_value(7, col, format!("c{col}"));
    }
    grid.insert_column(4).unwrap();

    assert_eq!(grid.cell_value(7, 4), "");
    assert_eq!(grid.cell_value(7, 5), "c4");
    for col in 1..4 {
        assert_eq!(grid.cell_value(7, col), format!("c{col}"));
    }
    for col in 5..=10 {
        assert_eq!(grid.cell_value(7, col + 1), format!("c{col}"));
    }
    assert_eq!(grid.cells().len(), 10);
}

#[test]
fn test_dense_block_survives_row_shift() {
    // Adjacent rows are where a naive ascending insert would clobber values.
    let mut grid = Grid::with_size(51, 6).unwrap();
    for row in 1..=50 {
        grid.set_cell_value(row, 1, row.to_string());
    }
    grid.insert_row(1).unwrap();
    assert_eq!(grid.cell_value(1, 1), "");
    for row in 1..=50 {
        assert_eq!(grid.cell_value(row + 1, 1), row.to_string());
    }

    grid.remove_row(1).unwrap();
    grid.remove_row(1).unwrap();
    for row in 2..=50 {
        assert_eq!(grid.cell_value(row - 1, 1), row.to_string());
    }
    assert_eq!(grid.cells().len(), 49);
}

#[test]
fn test_insert_uses_default_size_and_remove_restores_widths() {
    let mut grid = Grid::with_size(11, 11).unwrap();
    grid.resize_column(3, 150.0);
    grid.resize_column(4, 40.0);
    let before = grid.dims().track(Axis::Column).sizes().to_vec();

    grid.insert_column(4).unwrap();
    assert_eq!(grid.dims().width_of(3), Some(150.0));
    assert_eq!(grid.dims().width_of(4), Some(80.0));
    assert_eq!(grid.dims().width_of(5), Some(40.0));

    grid.remove_column(4).unwrap();
    assert_eq!(grid.dims().track(Axis::Column).sizes(), before.as_slice());
}

#[test_case(Axis::Row, 0 ; "header row")]
#[test_case(Axis::Column, 0 ; "header column")]
fn test_header_index_is_reserved(axis: Axis, index: u32) {
    let mut grid = Grid::with_size(11, 11).unwrap();
    grid.set_cell_value(1, 1, "keep");
    assert!(matches!(
        grid.insert_track(axis, index),
        Err(GridError::ReservedIndex { .. })
    ));
    assert!(matches!(
        grid.remove_track(axis, index),
        Err(GridError::ReservedIndex { .. })
    ));
    assert_eq!(grid.cell_value(1, 1), "keep");
    assert_eq!(grid.row_count(), 11);
    assert_eq!(grid.col_count(), 11);
}

#[test]
fn test_failed_edit_leaves_grid_untouched() {
    let mut grid = Grid::with_size(11, 11).unwrap();
    grid.set_cell_value(3, 3, "v");
    grid.select_cell(3, 3);
    assert!(grid.remove_row(11).is_err());
    assert!(grid.insert_column(12).is_err());
    assert_eq!(grid.cell_value(3, 3), "v");
    assert_eq!(grid.selection().active(), Some(CellPos::new(3, 3)));
}

#[test]
fn test_selection_follows_inserted_rows() {
    let mut grid = Grid::with_size(101, 27).unwrap();
    grid.select_cell(10, 4);
    grid.extend_selection(12, 6);
    grid.insert_row(3).unwrap();
    grid.insert_column(5).unwrap();

    let state = *grid.selection().state().unwrap();
    assert_eq!(state.anchor, CellPos::new(11, 4));
    assert_eq!(state.end, CellPos::new(13, 7));
    assert!(grid.selection().is_consistent());
}

fn cell_strategy(rows: u32, cols: u32) -> impl Strategy<Value = Vec<(u32, u32, String)>> {
    prop::collection::vec((1..rows, 1..cols, "[a-z]{1,4}"), 0..80)
}

proptest! {
    #[test]
    fn prop_insert_then_remove_column_is_identity(
        cells in cell_strategy(41, 21),
        widths in prop::collection::vec((1u32..21, 24.0f32..200.0), 0..8),
        k in 1u32..=21,
    ) {
        let mut grid = populated(41, 21, &cells);
        for (col, width) in &widths {
            grid.resize_column(*col, *width);
        }
        let before = contents(&grid);
        let before_widths = grid.dims().track(Axis::Column).sizes().to_vec();

        grid.insert_column(k).unwrap();
        grid.remove_column(k).unwrap();

        prop_assert_eq!(contents(&grid), before);
        prop_assert_eq!(grid.dims().track(Axis::Column).sizes(), before_widths.as_slice());
    }

    #[test]
    fn prop_insert_then_remove_row_is_identity(
        cells in cell_strategy(41, 21),
        k in 1u32..=41,
    ) {
        let mut grid = populated(41, 21, &cells);
        let before = contents(&grid);
        grid.insert_row(k).unwrap();
        grid.remove_row(k).unwrap();
        prop_assert_eq!(contents(&grid), before);
        prop_assert_eq!(grid.row_count(), 41);
    }

    #[test]
    fn prop_insert_column_shifts_exactly(
        cells in cell_strategy(41, 21),
        k in 1u32..=21,
    ) {
        let mut grid = populated(41, 21, &cells);
        let expected: BTreeMap<(u32, u32), String> = contents(&grid)
            .into_iter()
            .map(|((row, col), value)| ((row, if col >= k { col + 1 } else { col }), value))
            .collect();
        grid.insert_column(k).unwrap();
        prop_assert_eq!(contents(&grid), expected);
    }

    #[test]
    fn prop_remove_row_drops_only_target(
        cells in cell_strategy(41, 21),
        k in 1u32..41,
    ) {
        let mut grid = populated(41, 21, &cells);
        let expected: BTreeMap<(u32, u32), String> = contents(&grid)
            .into_iter()
            .filter(|((row, _), _)| *row != k)
            .map(|((row, col), value)| ((if row > k { row - 1 } else { row }, col), value))
            .collect();
        grid.remove_row(k).unwrap();
        prop_assert_eq!(contents(&grid), expected);
    }
}
