//! Renderer contract and per-frame snapshot.
//!
//! The engine issues no drawing calls. On each dirty tick it hands a [`Frame`] to an
//! injected [`Renderer`], which reads the visible range, cell geometry, cell values
//! and the selection overlay and paints them however its platform does.

mod scheduler;
pub mod selection;

pub use scheduler::RenderScheduler;
pub use selection::{highlighted_headers, selection_rect, SelectionRect};

use serde::Serialize;

use crate::cell_ref::col_to_letter;
use crate::grid::Grid;
use crate::layout::{CellRect, VisibleRange};
use crate::types::{CellRange, Selection};

/// Consumer of engine state, invoked at most once per display refresh.
pub trait Renderer {
    fn paint(&mut self, frame: &Frame<'_>);
}

/// A populated cell inside the visible range.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleCell<'a> {
    pub row: u32,
    pub col: u32,
    /// Bounds in surface coordinates
    pub rect: CellRect,
    pub value: &'a str,
}

/// One header band entry (row number or column label).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub index: u32,
    /// Leading edge in surface coordinates
    pub offset: f32,
    pub size: f32,
    pub label: String,
    pub highlighted: bool,
}

/// Read-only view of the grid for one paint pass.
pub struct Frame<'a> {
    grid: &'a Grid,
    range: VisibleRange,
}

impl<'a> Frame<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            range: grid.visible_range(),
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn range(&self) -> VisibleRange {
        self.range
    }

    pub fn selection(&self) -> &'a Selection {
        self.grid.selection()
    }

    /// Populated cells in the visible range, row-major.
    pub fn visible_cells(&self) -> impl Iterator<Item = VisibleCell<'a>> + 'a {
        let grid = self.grid;
        let range = self.range;
        (range.start_row..=range.end_row).flat_map(move |row| {
            (range.start_col..=range.end_col).filter_map(move |col| {
                let value = grid.cells().get(row, col)?;
                Some(VisibleCell {
                    row,
                    col,
                    rect: grid.cell_screen_rect(row, col)?,
                    value,
                })
            })
        })
    }

    /// Column labels for the visible columns (`A`, `B`, …).
    pub fn column_headers(&self) -> Vec<HeaderCell> {
        let selected = self.selected_range();
        (self.range.start_col..=self.range.end_col)
            .filter_map(|col| {
                Some(HeaderCell {
                    index: col,
                    offset: self.grid.col_screen_x(col)?,
                    size: self.grid.dims().width_of(col)?,
                    label: col_to_letter(col),
                    highlighted: selected.is_some_and(|r| r.cols().contains(&col)),
                })
            })
            .collect()
    }

    /// Row numbers for the visible rows.
    pub fn row_headers(&self) -> Vec<HeaderCell> {
        let selected = self.selected_range();
        (self.range.start_row..=self.range.end_row)
            .filter_map(|row| {
                Some(HeaderCell {
                    index: row,
                    offset: self.grid.row_screen_y(row)?,
                    size: self.grid.dims().height_of(row)?,
                    label: row.to_string(),
                    highlighted: selected.is_some_and(|r| r.rows().contains(&row)),
                })
            })
            .collect()
    }

    /// Selection border clipped to the data area.
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        let range = self.selected_range()?;
        selection_rect(&range, self.grid.dims(), self.grid.viewport())
    }

    /// Active cell bounds in surface coordinates.
    pub fn active_cell_rect(&self) -> Option<CellRect> {
        self.grid.active_cell_rect()
    }

    fn selected_range(&self) -> Option<CellRange> {
        self.grid.selection().range()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        cells: Vec<(u32, u32, String)>,
        col_labels: Vec<String>,
        highlighted_rows: Vec<u32>,
    }

    impl Renderer for Recorder {
        fn paint(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            self.cells = frame
                .visible_cells()
                .map(|c| (c.row, c.col, c.value.to_string()))
                .collect();
            self.col_labels = frame.column_headers().into_iter().map(|h| h.label).collect();
            self.highlighted_rows = frame
                .row_headers()
                .into_iter()
                .filter(|h| h.highlighted)
                .map(|h| h.index)
                .collect();
        }
    }

    #[test]
    fn test_frame_reports_visible_cells_only() {
        let mut grid = Grid::with_size(1001, 101).unwrap();
        grid.set_cell_value(1, 1, "top-left");
        grid.set_cell_value(3, 2, "near");
        grid.set_cell_value(900, 50, "far");

        let mut recorder = Recorder::default();
        assert!(grid.frame(&mut recorder));
        assert_eq!(recorder.frames, 1);
        assert_eq!(
            recorder.cells,
            vec![(1, 1, "top-left".to_string()), (3, 2, "near".to_string())]
        );
        assert_eq!(recorder.col_labels[0], "A");
        assert_eq!(recorder.col_labels[9], "J");
    }

    #[test]
    fn test_frame_skipped_when_clean() {
        let mut grid = Grid::with_size(20, 20).unwrap();
        let mut recorder = Recorder::default();
        assert!(grid.frame(&mut recorder));
        assert!(!grid.frame(&mut recorder));
        grid.select_cell(2, 2);
        grid.extend_selection(4, 2);
        grid.extend_selection(5, 2);
        assert!(grid.frame(&mut recorder));
        assert_eq!(recorder.frames, 2);
        assert_eq!(recorder.highlighted_rows, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_frame_after_scroll_uses_new_range() {
        let mut grid = Grid::with_size(1001, 101).unwrap();
        grid.set_cell_value(500, 1, "middle");
        let mut recorder = Recorder::default();
        grid.frame(&mut recorder);
        assert!(recorder.cells.is_empty());

        grid.ensure_visible(500, 1);
        grid.frame(&mut recorder);
        assert_eq!(recorder.cells, vec![(500, 1, "middle".to_string())]);
    }
}
