//! Row and column insertion/removal.
//!
//! Every structural edit applies the same index shift to three places, in order: the
//! sparse cell store, the dimension table and the selection. The store is remapped
//! first because its ordering rules are the ones that can corrupt data.

use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::types::{last_data_index, ActionRecord, Axis, SelectionKind, SelectionState};

impl Grid {
    /// Insert an empty row before `row` (`row == row_count` appends).
    ///
    /// # Errors
    /// Fails for the header row or an index past the end.
    pub fn insert_row(&mut self, row: u32) -> Result<ActionRecord> {
        self.insert_track(Axis::Row, row)
    }

    /// Remove `row`, dropping its values and shifting later rows up.
    ///
    /// # Errors
    /// Fails for the header row, an index past the end, or the last data row.
    pub fn remove_row(&mut self, row: u32) -> Result<ActionRecord> {
        self.remove_track(Axis::Row, row)
    }

    /// Insert an empty column before `col` (`col == col_count` appends).
    ///
    /// # Errors
    /// Fails for the header column or an index past the end.
    pub fn insert_column(&mut self, col: u32) -> Result<ActionRecord> {
        self.insert_track(Axis::Column, col)
    }

    /// Remove `col`, dropping its values and shifting later columns left.
    ///
    /// # Errors
    /// Fails for the header column, an index past the end, or the last data column.
    pub fn remove_column(&mut self, col: u32) -> Result<ActionRecord> {
        self.remove_track(Axis::Column, col)
    }

    /// Insert a track of the configured default size at `index` along `axis`.
    ///
    /// # Errors
    /// See [`Grid::insert_row`].
    pub fn insert_track(&mut self, axis: Axis, index: u32) -> Result<ActionRecord> {
        let len = self.dims.track(axis).len();
        if index == 0 {
            log::warn!("refusing to insert at header {axis}");
            return Err(GridError::ReservedIndex { axis, index });
        }
        if index > len {
            log::warn!("refusing to insert {axis} {index} past len {len}");
            return Err(GridError::OutOfRange { axis, index, len });
        }

        let kind = self.selection_kind();
        self.cells.shift_for_insert(axis, index);
        let size = self.default_size(axis);
        self.dims.track_mut(axis).insert(index, size);
        if let Some(mut state) = self.selection.state().copied() {
            shift_state_for_insert(&mut state, axis, index);
            self.selection.replace(Some(state));
        }
        self.finish_structural_edit(kind);

        log::debug!("inserted {axis} {index} ({} populated cells)", self.cells.len());
        Ok(ActionRecord::insert(axis, index))
    }

    /// Remove the track at `index` along `axis`.
    ///
    /// # Errors
    /// See [`Grid::remove_row`].
    pub fn remove_track(&mut self, axis: Axis, index: u32) -> Result<ActionRecord> {
        let len = self.dims.track(axis).len();
        if index == 0 {
            log::warn!("refusing to remove header {axis}");
            return Err(GridError::ReservedIndex { axis, index });
        }
        if index >= len {
            log::warn!("refusing to remove {axis} {index} past len {len}");
            return Err(GridError::OutOfRange { axis, index, len });
        }
        if len <= 2 {
            log::warn!("refusing to remove the only data {axis}");
            return Err(GridError::LastDataIndex { axis });
        }

        let kind = self.selection_kind();
        let dropped = self.cells.shift_for_remove(axis, index);
        self.dims.track_mut(axis).remove(index);
        if let Some(mut state) = self.selection.state().copied() {
            shift_state_for_remove(&mut state, axis, index);
            self.selection.replace(Some(state));
        }
        self.finish_structural_edit(kind);

        log::debug!("removed {axis} {index}, dropped {dropped} cells");
        Ok(ActionRecord::remove(axis, index))
    }

    fn default_size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.config.default_row_height,
            Axis::Column => self.config.default_col_width,
        }
    }

    /// Re-pin stretched selections, clamp scroll and schedule a repaint.
    fn finish_structural_edit(&mut self, kind_before: Option<SelectionKind>) {
        if let (Some(kind), Some(mut state)) = (kind_before, self.selection.state().copied()) {
            let last_row = last_data_index(self.row_count());
            let last_col = last_data_index(self.col_count());
            if matches!(kind, SelectionKind::RowRange | SelectionKind::All) {
                pin_axis(&mut state, Axis::Column, last_col);
            }
            if matches!(kind, SelectionKind::ColumnRange | SelectionKind::All) {
                pin_axis(&mut state, Axis::Row, last_row);
            }
            self.selection.replace(Some(state));
        }
        self.viewport.clamp_scroll(&self.dims);
        self.request_redraw();
    }
}

/// Every index at or beyond the insertion point moves outward by one.
fn shift_state_for_insert(state: &mut SelectionState, axis: Axis, index: u32) {
    for pos in [&mut state.anchor, &mut state.active, &mut state.end] {
        let i = pos.on(axis);
        if i >= index {
            pos.set_on(axis, i + 1);
        }
    }
}

/// Indices beyond the removal point move inward by one.
///
/// An edge sitting on the removed index collapses inward: the low edge keeps its
/// index (the successor slides into place), the high edge decrements, and a span of
/// only the removed index moves to its predecessor (never past index 1).
fn shift_state_for_remove(state: &mut SelectionState, axis: Axis, index: u32) {
    let anchor = state.anchor.on(axis);
    let end = state.end.on(axis);
    let (low, high) = (anchor.min(end), anchor.max(end));

    let (low, high) = if low == index && high == index {
        let i = index.saturating_sub(1).max(1);
        (i, i)
    } else {
        let low = if low > index { low - 1 } else { low };
        let high = if high >= index { high - 1 } else { high };
        (low, high.max(low))
    };

    if anchor <= end {
        state.anchor.set_on(axis, low);
        state.end.set_on(axis, high);
    } else {
        state.anchor.set_on(axis, high);
        state.end.set_on(axis, low);
    }

    let active = state.active.on(axis);
    let active = if active > index { active - 1 } else { active };
    state.active.set_on(axis, active.clamp(low, high));
}

/// Stretch `axis` back over the full data extent `[1, last]`.
fn pin_axis(state: &mut SelectionState, axis: Axis, last: u32) {
    if state.anchor.on(axis) <= state.end.on(axis) {
        state.anchor.set_on(axis, 1);
        state.end.set_on(axis, last);
    } else {
        state.anchor.set_on(axis, last);
        state.end.set_on(axis, 1);
    }
    let active = state.active.on(axis).clamp(1, last);
    state.active.set_on(axis, active);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{ActionType, CellPos};

    fn grid() -> Grid {
        Grid::with_size(101, 27).unwrap()
    }

    #[test]
    fn test_insert_column_moves_value_right() {
        let mut grid = grid();
        grid.set_cell_value(4, 3, "v");
        grid.set_cell_value(4, 2, "left");
        grid.set_cell_value(4, 5, "right");

        let record = grid.insert_column(3).unwrap();
        assert_eq!(record.action, ActionType::InsertColumn);
        assert_eq!(grid.cell_value(4, 3), "");
        assert_eq!(grid.cell_value(4, 4), "v");
        assert_eq!(grid.cell_value(4, 2), "left");
        assert_eq!(grid.cell_value(4, 6), "right");
        assert_eq!(grid.col_count(), 28);
        assert_eq!(grid.dims().width_of(3), Some(80.0));
    }

    #[test]
    fn test_remove_row_drops_and_shifts() {
        let mut grid = grid();
        grid.set_cell_value(3, 1, "gone");
        grid.set_cell_value(4, 1, "up");
        grid.resize_row(4, 40.0);

        grid.remove_row(3).unwrap();
        assert_eq!(grid.cell_value(3, 1), "up");
        assert_eq!(grid.cell_value(4, 1), "");
        assert_eq!(grid.cells().len(), 1);
        assert_eq!(grid.dims().height_of(3), Some(40.0));
        assert_eq!(grid.row_count(), 100);
    }

    #[test]
    fn test_header_and_out_of_range_are_rejected() {
        let mut grid = grid();
        assert!(matches!(
            grid.insert_row(0),
            Err(GridError::ReservedIndex { axis: Axis::Row, index: 0 })
        ));
        assert!(matches!(
            grid.remove_column(0),
            Err(GridError::ReservedIndex { .. })
        ));
        assert!(matches!(
            grid.remove_row(101),
            Err(GridError::OutOfRange { len: 101, .. })
        ));
        assert!(matches!(grid.insert_column(28), Err(GridError::OutOfRange { .. })));
        // Appending at len is allowed.
        assert!(grid.insert_column(27).is_ok());
        assert_eq!(grid.col_count(), 28);
    }

    #[test]
    fn test_last_data_row_cannot_be_removed() {
        let mut grid = Grid::with_size(2, 5).unwrap();
        assert!(matches!(
            grid.remove_row(1),
            Err(GridError::LastDataIndex { axis: Axis::Row })
        ));
    }

    #[test]
    fn test_insert_shifts_selection_at_or_after_point() {
        let mut grid = grid();
        grid.select_cell(5, 5);
        grid.extend_selection(8, 6);
        grid.insert_row(6).unwrap();
        let state = *grid.selection().state().unwrap();
        assert_eq!(state.anchor, CellPos::new(5, 5));
        assert_eq!(state.end, CellPos::new(9, 6));
        assert_eq!(state.active, CellPos::new(9, 6));

        grid.insert_row(5).unwrap();
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(6, 5)));
    }

    #[test]
    fn test_remove_collapses_high_edge_inward() {
        let mut grid = grid();
        grid.select_cell(3, 2);
        grid.extend_selection(6, 2);
        grid.remove_row(6).unwrap();
        let range = grid.selection().range().unwrap();
        assert_eq!((range.top, range.bottom), (3, 5));
        assert!(grid.selection().is_consistent());
    }

    #[test]
    fn test_remove_keeps_low_edge_on_removed_index() {
        let mut grid = grid();
        grid.select_cell(7, 2);
        grid.extend_selection(3, 2);
        grid.remove_row(3).unwrap();
        let state = *grid.selection().state().unwrap();
        assert_eq!(state.anchor.row, 6);
        assert_eq!(state.end.row, 3);
        assert_eq!(state.active.row, 3);
        assert!(grid.selection().is_consistent());
    }

    #[test]
    fn test_remove_single_cell_row_moves_to_predecessor() {
        let mut grid = grid();
        grid.select_cell(4, 4);
        grid.remove_row(4).unwrap();
        assert_eq!(grid.selection().active(), Some(CellPos::new(3, 4)));

        grid.select_cell(1, 4);
        grid.remove_row(1).unwrap();
        assert_eq!(grid.selection().active(), Some(CellPos::new(1, 4)));
    }

    #[test]
    fn test_full_row_selection_stays_pinned() {
        let mut grid = grid();
        grid.start_row_selection(5);
        grid.insert_column(1).unwrap();
        let range = grid.selection().range().unwrap();
        assert_eq!((range.left, range.right), (1, 27));
        assert_eq!(grid.selection_kind(), Some(SelectionKind::RowRange));

        grid.remove_column(27).unwrap();
        grid.remove_column(4).unwrap();
        let range = grid.selection().range().unwrap();
        assert_eq!((range.left, range.right), (1, 25));
        assert_eq!(grid.selection_kind(), Some(SelectionKind::RowRange));
    }

    #[test]
    fn test_select_all_survives_edits() {
        let mut grid = grid();
        grid.select_all();
        grid.insert_row(50).unwrap();
        grid.remove_column(2).unwrap();
        assert_eq!(grid.selection_kind(), Some(SelectionKind::All));
        let range = grid.selection().range().unwrap();
        assert_eq!((range.bottom, range.right), (101, 25));
    }

    #[test]
    fn test_removing_rows_clamps_scroll() {
        let mut grid = Grid::with_size(40, 5).unwrap();
        grid.set_scroll(0.0, 10_000.0);
        let (_, before) = grid.max_scroll();
        assert_eq!(grid.viewport().scroll_y, before);
        grid.remove_row(10).unwrap();
        let (_, after) = grid.max_scroll();
        assert_eq!(after, before - 24.0);
        assert_eq!(grid.viewport().scroll_y, after);
    }
}
