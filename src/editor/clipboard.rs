//! Copying and clearing the selected range.

use crate::grid::Grid;
use crate::types::ActionRecord;

impl Grid {
    /// Selected values as TSV, the way spreadsheet applications put them on the
    /// clipboard.
    ///
    /// Rows are joined with `\n` and columns with `\t`. Output stops at the last
    /// populated row and column inside the selection, so copying a full row does not
    /// produce hundreds of trailing tabs. Returns `None` with nothing selected or
    /// nothing populated inside the selection.
    pub fn selection_to_tsv(&self) -> Option<String> {
        let range = self.selection.range()?;

        // Trim to the content bounds, scanning only populated cells.
        let (max_row, max_col) = self
            .cells
            .iter()
            .filter(|&(row, col, _)| range.contains(row, col))
            .fold(None, |acc: Option<(u32, u32)>, (row, col, _)| {
                Some(acc.map_or((row, col), |(r, c)| (r.max(row), c.max(col))))
            })?;

        let mut result = String::new();
        for row in range.top..=max_row {
            for col in range.left..=max_col {
                if col > range.left {
                    result.push('\t');
                }
                if let Some(value) = self.cells.get(row, col) {
                    result.push_str(&escape_cell_value(value));
                }
            }
            if row < max_row {
                result.push('\n');
            }
        }
        Some(result)
    }

    /// Remove every populated cell inside the selection.
    ///
    /// Returns a `clear-cells` record when anything was removed.
    pub fn clear_selected_cells(&mut self) -> Option<ActionRecord> {
        let range = self.selection.range()?;
        let removed = self.cells.remove_where(|row, col| range.contains(row, col));
        if removed == 0 {
            return None;
        }
        log::debug!(
            "cleared {removed} cells in rows {}..={}, cols {}..={}",
            range.top,
            range.bottom,
            range.left,
            range.right
        );
        self.request_redraw();
        Some(ActionRecord::cleared(range, removed))
    }
}

/// Quote a value for TSV when it contains a tab, line break or quote.
///
/// Internal quotes are doubled.
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains(['\t', '\n', '\r', '"']);
    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ActionDetails, ActionType};

    #[test]
    fn test_escape_cell_value() {
        assert_eq!(escape_cell_value("plain"), "plain");
        assert_eq!(escape_cell_value("a\tb"), "\"a\tb\"");
        assert_eq!(escape_cell_value("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_cell_value("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_tsv_trims_trailing_empty_cells() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        grid.set_cell_value(2, 2, "a");
        grid.set_cell_value(3, 3, "b");
        grid.set_cell_value(50, 20, "outside");
        grid.select_cell(2, 2);
        grid.extend_selection(10, 10);

        assert_eq!(grid.selection_to_tsv().unwrap(), "a\t\n\tb");
    }

    #[test]
    fn test_tsv_of_full_row() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        grid.set_cell_value(4, 1, "x");
        grid.set_cell_value(4, 3, "y\tz");
        grid.start_row_selection(4);
        assert_eq!(grid.selection_to_tsv().unwrap(), "x\t\t\"y\tz\"");
    }

    #[test]
    fn test_tsv_without_content_or_selection() {
        let mut grid = Grid::with_size(10, 10).unwrap();
        assert_eq!(grid.selection_to_tsv(), None);
        grid.select_cell(1, 1);
        assert_eq!(grid.selection_to_tsv(), None);
    }

    #[test]
    fn test_clear_selected_cells() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        grid.set_cell_value(2, 2, "a");
        grid.set_cell_value(3, 3, "b");
        grid.set_cell_value(9, 9, "keep");
        grid.select_cell(1, 1);
        grid.extend_selection(5, 5);

        let record = grid.clear_selected_cells().unwrap();
        assert_eq!(record.action, ActionType::ClearCells);
        assert!(matches!(record.details, ActionDetails::Cleared { cells: 2, .. }));
        assert_eq!(grid.cells().len(), 1);
        assert_eq!(grid.cell_value(9, 9), "keep");
        assert!(grid.clear_selected_cells().is_none());
    }
}
