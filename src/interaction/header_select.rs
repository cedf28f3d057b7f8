//! Row-number and column-label clicks select whole rows or columns.
//!
//! One handler type serves both header bands: [`HeaderSelectHandler::rows`] owns the
//! row-number gutter, [`HeaderSelectHandler::columns`] the column-label band. Dragging
//! extends the selection along the header while the other axis stays pinned to the
//! full data extent.

use super::{AutoScrollMode, GestureHandler};
use crate::grid::Grid;
use crate::types::{ActionRecord, Axis, Cursor, PointerEvent, SelectionKind};

#[derive(Debug)]
pub struct HeaderSelectHandler {
    axis: Axis,
}

impl HeaderSelectHandler {
    /// Row-header (gutter) selection.
    pub fn rows() -> Self {
        Self { axis: Axis::Row }
    }

    /// Column-header selection.
    pub fn columns() -> Self {
        Self { axis: Axis::Column }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Header index under the pointer, if it is in this handler's band.
    fn header_hit(&self, grid: &Grid, event: &PointerEvent) -> Option<u32> {
        let row = grid.screen_to_row(event.y)?;
        let col = grid.screen_to_col(event.x)?;
        match self.axis {
            Axis::Row => (col == 0 && row > 0).then_some(row),
            Axis::Column => (row == 0 && col > 0).then_some(col),
        }
    }

    fn extend_to(&self, grid: &mut Grid, index: u32) {
        match self.axis {
            Axis::Row => {
                let last = grid.last_col();
                grid.extend_selection(index, last);
            }
            Axis::Column => {
                let last = grid.last_row();
                grid.extend_selection(last, index);
            }
        }
    }
}

impl GestureHandler for HeaderSelectHandler {
    fn name(&self) -> &'static str {
        match self.axis {
            Axis::Row => "row-select",
            Axis::Column => "column-select",
        }
    }

    fn hit_test(&self, grid: &Grid, event: &PointerEvent) -> bool {
        self.header_hit(grid, event).is_some()
    }

    fn cursor(&self, _grid: &Grid, _event: &PointerEvent) -> Cursor {
        match self.axis {
            Axis::Row => Cursor::RowSelect,
            Axis::Column => Cursor::ColSelect,
        }
    }

    fn handle_down(&mut self, grid: &mut Grid, event: &PointerEvent) {
        let Some(index) = self.header_hit(grid, event) else {
            return;
        };
        let same_kind = match self.axis {
            Axis::Row => SelectionKind::RowRange,
            Axis::Column => SelectionKind::ColumnRange,
        };
        if event.shift && grid.selection_kind() == Some(same_kind) {
            self.extend_to(grid, index);
            return;
        }
        match self.axis {
            Axis::Row => grid.start_row_selection(index),
            Axis::Column => grid.start_column_selection(index),
        };
    }

    fn handle_drag(&mut self, grid: &mut Grid, event: &PointerEvent) {
        let index = match self.axis {
            Axis::Row => grid.row_at_screen_clamped(event.y),
            Axis::Column => grid.col_at_screen_clamped(event.x),
        };
        self.extend_to(grid, index);
    }

    fn handle_up(&mut self, _grid: &mut Grid, _event: &PointerEvent) -> Option<ActionRecord> {
        None
    }

    fn auto_scroll(&self) -> Option<AutoScrollMode> {
        Some(match self.axis {
            Axis::Row => AutoScrollMode::Rows,
            Axis::Column => AutoScrollMode::Columns,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::CellPos;

    fn grid() -> Grid {
        Grid::with_size(101, 27).unwrap()
    }

    #[test]
    fn test_row_header_hit_excludes_corner_and_cells() {
        let grid = grid();
        let rows = HeaderSelectHandler::rows();
        assert!(rows.hit_test(&grid, &PointerEvent::new(10.0, 30.0)));
        assert!(!rows.hit_test(&grid, &PointerEvent::new(10.0, 10.0)));
        assert!(!rows.hit_test(&grid, &PointerEvent::new(60.0, 30.0)));
    }

    #[test]
    fn test_row_drag_keeps_columns_pinned() {
        let mut grid = grid();
        let mut rows = HeaderSelectHandler::rows();
        // Row 3 spans y 72..96.
        rows.handle_down(&mut grid, &PointerEvent::new(10.0, 80.0));
        assert_eq!(grid.selection_kind(), Some(SelectionKind::RowRange));

        rows.handle_drag(&mut grid, &PointerEvent::new(500.0, 130.0));
        let range = grid.selection().range().unwrap();
        assert_eq!((range.top, range.bottom), (3, 5));
        assert_eq!((range.left, range.right), (1, 26));
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(3, 1)));
    }

    #[test]
    fn test_column_shift_click_extends() {
        let mut grid = grid();
        let mut cols = HeaderSelectHandler::columns();
        cols.handle_down(&mut grid, &PointerEvent::new(60.0, 10.0));
        cols.handle_down(&mut grid, &PointerEvent::new(300.0, 10.0).with_shift(true));
        let range = grid.selection().range().unwrap();
        assert_eq!((range.left, range.right), (1, 4));
        assert_eq!((range.top, range.bottom), (1, 100));
        assert_eq!(grid.selection_kind(), Some(SelectionKind::ColumnRange));
    }

    #[test]
    fn test_shift_click_without_column_selection_starts_fresh() {
        let mut grid = grid();
        grid.select_cell(5, 5);
        let mut cols = HeaderSelectHandler::columns();
        cols.handle_down(&mut grid, &PointerEvent::new(300.0, 10.0).with_shift(true));
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(1, 4)));
    }
}
