//! Default catch-all: click a cell and drag out a rectangular range.

use super::{AutoScrollMode, GestureHandler};
use crate::grid::Grid;
use crate::types::{ActionRecord, Cursor, PointerEvent};

#[derive(Debug, Default)]
pub struct RangeSelectHandler;

impl GestureHandler for RangeSelectHandler {
    fn name(&self) -> &'static str {
        "range-select"
    }

    fn hit_test(&self, grid: &Grid, event: &PointerEvent) -> bool {
        grid.hit_cell(event.x, event.y).is_some()
    }

    fn cursor(&self, _grid: &Grid, _event: &PointerEvent) -> Cursor {
        Cursor::Cell
    }

    fn handle_down(&mut self, grid: &mut Grid, event: &PointerEvent) {
        let Some(pos) = grid.hit_cell(event.x, event.y) else {
            return;
        };
        if event.shift && !grid.selection().is_empty() {
            grid.extend_selection(pos.row, pos.col);
        } else {
            grid.select_cell(pos.row, pos.col);
        }
    }

    fn handle_drag(&mut self, grid: &mut Grid, event: &PointerEvent) {
        let row = grid.row_at_screen_clamped(event.y);
        let col = grid.col_at_screen_clamped(event.x);
        grid.extend_selection(row, col);
    }

    fn handle_up(&mut self, _grid: &mut Grid, _event: &PointerEvent) -> Option<ActionRecord> {
        None
    }

    fn auto_scroll(&self) -> Option<AutoScrollMode> {
        Some(AutoScrollMode::Range)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::CellPos;

    #[test]
    fn test_click_then_drag_extends_from_anchor() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        let mut handler = RangeSelectHandler;
        // (row 2, col 2) is at x 130..210, y 48..72.
        handler.handle_down(&mut grid, &PointerEvent::new(140.0, 50.0));
        assert_eq!(grid.selection().active(), Some(CellPos::new(2, 2)));

        handler.handle_drag(&mut grid, &PointerEvent::new(300.0, 110.0));
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(2, 2)));
        assert_eq!(grid.selection().end(), Some(CellPos::new(4, 4)));
    }

    #[test]
    fn test_drag_past_edges_clamps_to_visible_cells() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        let mut handler = RangeSelectHandler;
        handler.handle_down(&mut grid, &PointerEvent::new(140.0, 50.0));
        handler.handle_drag(&mut grid, &PointerEvent::new(-50.0, -50.0));
        assert_eq!(grid.selection().end(), Some(CellPos::new(1, 1)));
        handler.handle_drag(&mut grid, &PointerEvent::new(5_000.0, 5_000.0));
        // Pinned to the last pixel of the 800x600 surface.
        assert_eq!(grid.selection().end(), Some(CellPos::new(24, 10)));
    }

    #[test]
    fn test_shift_click_extends() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        let mut handler = RangeSelectHandler;
        handler.handle_down(&mut grid, &PointerEvent::new(140.0, 50.0));
        handler.handle_down(&mut grid, &PointerEvent::new(300.0, 110.0).with_shift(true));
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(2, 2)));
        assert_eq!(grid.selection().active(), Some(CellPos::new(4, 4)));
    }
}
