//! Selection model tests
//!
//! Anchor, active cell and end must stay inside the data extent and the active cell
//! must stay inside the anchor/end rectangle through any mix of selection gestures,
//! navigation and structural edits.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use proptest::prelude::*;
use vgrid::{CellPos, CellRange, Grid, KeyCommand, SelectionKind};

#[test]
fn test_extend_to_from_single_cell() {
    let mut grid = Grid::with_size(101, 27).unwrap();
    grid.select_cell(10, 10);
    grid.extend_selection(15, 12);

    let sel = grid.selection();
    assert_eq!(sel.anchor(), Some(CellPos::new(10, 10)));
    assert_eq!(sel.active(), Some(CellPos::new(15, 12)));
    assert_eq!(
        sel.range(),
        Some(CellRange {
            top: 10,
            left: 10,
            bottom: 15,
            right: 12,
        })
    );
    assert_eq!(grid.selection_kind(), Some(SelectionKind::CellRange));
}

#[test]
fn test_row_selection_kind_survives_column_insert() {
    let mut grid = Grid::with_size(101, 27).unwrap();
    grid.start_row_selection(7);
    assert_eq!(grid.selection_kind(), Some(SelectionKind::RowRange));

    grid.insert_column(3).unwrap();
    assert_eq!(grid.selection_kind(), Some(SelectionKind::RowRange));
    assert_eq!(grid.selection().end(), Some(CellPos::new(7, 27)));
}

#[test]
fn test_column_selection_kind_survives_row_remove() {
    let mut grid = Grid::with_size(101, 27).unwrap();
    grid.start_column_selection(4);
    grid.remove_row(50).unwrap();
    assert_eq!(grid.selection_kind(), Some(SelectionKind::ColumnRange));
    assert_eq!(grid.selection().end(), Some(CellPos::new(99, 4)));
}

#[test]
fn test_shift_navigation_extends_from_end() {
    let mut grid = Grid::with_size(101, 27).unwrap();
    grid.select_cell(5, 5);
    grid.navigate(KeyCommand::Down, true);
    grid.navigate(KeyCommand::Right, true);

    let sel = grid.selection();
    assert_eq!(sel.anchor(), Some(CellPos::new(5, 5)));
    assert_eq!(sel.end(), Some(CellPos::new(6, 6)));
    assert!(sel.is_consistent());
}

#[test]
fn test_clear_selection() {
    let mut grid = Grid::with_size(11, 11).unwrap();
    grid.select_all();
    assert!(grid.clear_selection());
    assert!(grid.selection().is_empty());
    assert!(!grid.clear_selection());
}

#[derive(Debug, Clone)]
enum Op {
    Select(u32, u32),
    Extend(u32, u32),
    Row(u32),
    Column(u32),
    All,
    Key(KeyCommand, bool),
    InsertRow(u32),
    RemoveRow(u32),
    InsertColumn(u32),
    RemoveColumn(u32),
}

fn key_strategy() -> impl Strategy<Value = KeyCommand> {
    prop_oneof![
        Just(KeyCommand::Up),
        Just(KeyCommand::Down),
        Just(KeyCommand::Left),
        Just(KeyCommand::Right),
        Just(KeyCommand::Home),
        Just(KeyCommand::End),
        Just(KeyCommand::PageUp),
        Just(KeyCommand::PageDown),
        Just(KeyCommand::Enter),
        Just(KeyCommand::Tab),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..40, 1u32..40).prop_map(|(r, c)| Op::Select(r, c)),
        (1u32..40, 1u32..40).prop_map(|(r, c)| Op::Extend(r, c)),
        (1u32..40).prop_map(Op::Row),
        (1u32..40).prop_map(Op::Column),
        Just(Op::All),
        (key_strategy(), any::<bool>()).prop_map(|(k, s)| Op::Key(k, s)),
        (1u32..40).prop_map(Op::InsertRow),
        (1u32..40).prop_map(Op::RemoveRow),
        (1u32..40).prop_map(Op::InsertColumn),
        (1u32..40).prop_map(Op::RemoveColumn),
    ]
}

fn apply(grid: &mut Grid, op: &Op) {
    let last_row = grid.last_row();
    let last_col = grid.last_col();
    let row = |r: u32| r.min(last_row);
    let col = |c: u32| c.min(last_col);
    match *op {
        Op::Select(r, c) => {
            grid.select_cell(row(r), col(c));
        }
        Op::Extend(r, c) => {
            grid.extend_selection(row(r), col(c));
        }
        Op::Row(r) => {
            grid.start_row_selection(row(r));
        }
        Op::Column(c) => {
            grid.start_column_selection(col(c));
        }
        Op::All => {
            grid.select_all();
        }
        Op::Key(key, shift) => {
            grid.navigate(key, shift);
        }
        // Rejected edits (last data row/column) are part of the sequence too.
        Op::InsertRow(r) => {
            let _ = grid.insert_row(row(r));
        }
        Op::RemoveRow(r) => {
            let _ = grid.remove_row(row(r));
        }
        Op::InsertColumn(c) => {
            let _ = grid.insert_column(col(c));
        }
        Op::RemoveColumn(c) => {
            let _ = grid.remove_column(col(c));
        }
    }
}

proptest! {
    #[test]
    fn prop_selection_stays_consistent(
        rows in 2u32..30,
        cols in 2u32..30,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut grid = Grid::with_size(rows, cols).unwrap();
        for op in &ops {
            apply(&mut grid, op);

            let sel = grid.selection();
            prop_assert!(sel.is_consistent(), "inconsistent after {:?}", op);
            if let Some(state) = sel.state() {
                for pos in [state.anchor, state.active, state.end] {
                    prop_assert!((1..=grid.last_row()).contains(&pos.row), "{:?} after {:?}", pos, op);
                    prop_assert!((1..=grid.last_col()).contains(&pos.col), "{:?} after {:?}", pos, op);
                }
            }
        }
    }
}
