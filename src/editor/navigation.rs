//! Keyboard navigation of the selection.

use crate::grid::Grid;
use crate::types::{CellPos, KeyCommand};

impl Grid {
    /// Apply a navigation key and scroll the moved endpoint into view.
    ///
    /// Plain keys move the whole selection; Shift with an arrow, Home/End or
    /// PageUp/PageDown extends from the anchor. Enter and Tab always move, with Shift
    /// reversing their direction. With nothing selected the first data cell is
    /// selected. Returns true if the selection or scroll position changed.
    pub fn navigate(&mut self, key: KeyCommand, shift: bool) -> bool {
        let Some(active) = self.selection.active() else {
            let changed = self.select_cell(1, 1);
            return self.ensure_visible(1, 1) || changed;
        };

        let extends = shift && !matches!(key, KeyCommand::Enter | KeyCommand::Tab);
        let from = if extends {
            self.selection.end().unwrap_or(active)
        } else {
            active
        };
        let target = self.navigation_target(from, key, shift);

        let changed = if extends {
            self.extend_selection(target.row, target.col)
        } else {
            self.move_selection(target.row, target.col)
        };
        let scrolled = self.ensure_visible(target.row, target.col);
        changed || scrolled
    }

    fn navigation_target(&self, from: CellPos, key: KeyCommand, shift: bool) -> CellPos {
        let last_row = self.last_row();
        let last_col = self.last_col();
        let page = self.page_rows();
        let (row, col) = (from.row, from.col);

        let (row, col) = match key {
            KeyCommand::Up => (row.saturating_sub(1), col),
            KeyCommand::Down => (row.saturating_add(1), col),
            KeyCommand::Left => (row, col.saturating_sub(1)),
            KeyCommand::Right => (row, col.saturating_add(1)),
            KeyCommand::Home => (row, 1),
            KeyCommand::End => (row, last_col),
            KeyCommand::PageUp => (row.saturating_sub(page), col),
            KeyCommand::PageDown => (row.saturating_add(page), col),
            KeyCommand::Enter if shift => (row.saturating_sub(1), col),
            KeyCommand::Enter => (row.saturating_add(1), col),
            KeyCommand::Tab if shift => (row, col.saturating_sub(1)),
            KeyCommand::Tab => (row, col.saturating_add(1)),
        };
        CellPos::new(row.clamp(1, last_row), col.clamp(1, last_col))
    }

    /// Rows advanced by PageUp/PageDown: the rows fully inside the data area.
    fn page_rows(&self) -> u32 {
        self.visible_range().row_count().saturating_sub(1).max(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn grid_at(row: u32, col: u32) -> Grid {
        let mut grid = Grid::with_size(101, 27).unwrap();
        grid.select_cell(row, col);
        grid
    }

    #[test_case(KeyCommand::Up, false, (4, 5))]
    #[test_case(KeyCommand::Down, false, (6, 5))]
    #[test_case(KeyCommand::Left, false, (5, 4))]
    #[test_case(KeyCommand::Right, false, (5, 6))]
    #[test_case(KeyCommand::Home, false, (5, 1))]
    #[test_case(KeyCommand::End, false, (5, 26))]
    #[test_case(KeyCommand::Enter, false, (6, 5))]
    #[test_case(KeyCommand::Enter, true, (4, 5))]
    #[test_case(KeyCommand::Tab, false, (5, 6))]
    #[test_case(KeyCommand::Tab, true, (5, 4))]
    fn test_navigation_moves_active(key: KeyCommand, shift: bool, expected: (u32, u32)) {
        let mut grid = grid_at(5, 5);
        grid.navigate(key, shift);
        assert_eq!(grid.selection().active(), Some(CellPos::from(expected)));
        if matches!(key, KeyCommand::Enter | KeyCommand::Tab) || !shift {
            assert_eq!(grid.selection().anchor(), Some(CellPos::from(expected)));
        }
    }

    #[test]
    fn test_navigation_clamps_to_data_extent() {
        let mut grid = grid_at(1, 1);
        assert!(!grid.navigate(KeyCommand::Up, false));
        assert!(!grid.navigate(KeyCommand::Left, false));
        assert_eq!(grid.selection().active(), Some(CellPos::new(1, 1)));

        let mut grid = grid_at(100, 26);
        grid.navigate(KeyCommand::Down, false);
        grid.navigate(KeyCommand::Right, false);
        assert_eq!(grid.selection().active(), Some(CellPos::new(100, 26)));
    }

    #[test]
    fn test_shift_arrow_extends_from_anchor() {
        let mut grid = grid_at(10, 10);
        grid.navigate(KeyCommand::Down, true);
        grid.navigate(KeyCommand::Down, true);
        grid.navigate(KeyCommand::Right, true);
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(10, 10)));
        assert_eq!(grid.selection().end(), Some(CellPos::new(12, 11)));
        assert!(grid.selection().is_consistent());
    }

    #[test]
    fn test_page_down_scrolls_into_view() {
        let mut grid = grid_at(1, 1);
        grid.navigate(KeyCommand::PageDown, false);
        let row = grid.selection().active().unwrap().row;
        assert!(row > 20);
        grid.navigate(KeyCommand::PageDown, false);
        let active = grid.selection().active().unwrap();
        assert!(grid.visible_range().contains(active.row, active.col));
        assert!(grid.viewport().scroll_y > 0.0);
    }

    #[test]
    fn test_first_key_selects_first_cell() {
        let mut grid = Grid::with_size(10, 10).unwrap();
        assert!(grid.navigate(KeyCommand::Down, false));
        assert_eq!(grid.selection().active(), Some(CellPos::new(1, 1)));
    }
}
