//! Serializable frame snapshots for hosts that paint outside Rust.
//!
//! A JavaScript canvas renderer cannot borrow a [`Frame`]; it receives a
//! [`FrameSnapshot`] instead, produced by the [`SnapshotRenderer`].

use serde::Serialize;

use crate::layout::{CellRect, VisibleRange};
use crate::render::{Frame, HeaderCell, Renderer, SelectionRect};

/// A populated visible cell, owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSnapshot {
    pub row: u32,
    pub col: u32,
    pub rect: CellRect,
    pub value: String,
}

/// Everything a renderer needs for one paint pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub range: VisibleRange,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
    pub header_width: f32,
    pub header_height: f32,
    pub cells: Vec<CellSnapshot>,
    pub column_headers: Vec<HeaderCell>,
    pub row_headers: Vec<HeaderCell>,
    pub selection: Option<SelectionRect>,
    pub active_cell: Option<CellRect>,
}

impl FrameSnapshot {
    pub fn capture(frame: &Frame<'_>) -> Self {
        let grid = frame.grid();
        let viewport = grid.viewport();
        Self {
            range: frame.range(),
            scroll_x: viewport.scroll_x,
            scroll_y: viewport.scroll_y,
            width: viewport.width,
            height: viewport.height,
            header_width: grid.dims().header_width(),
            header_height: grid.dims().header_height(),
            cells: frame
                .visible_cells()
                .map(|cell| CellSnapshot {
                    row: cell.row,
                    col: cell.col,
                    rect: cell.rect,
                    value: cell.value.to_string(),
                })
                .collect(),
            column_headers: frame.column_headers(),
            row_headers: frame.row_headers(),
            selection: frame.selection_rect(),
            active_cell: frame.active_cell_rect(),
        }
    }
}

/// Renderer that keeps the most recent frame as a snapshot.
#[derive(Debug, Default)]
pub struct SnapshotRenderer {
    last: Option<FrameSnapshot>,
}

impl SnapshotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Option<FrameSnapshot> {
        self.last.take()
    }
}

impl Renderer for SnapshotRenderer {
    fn paint(&mut self, frame: &Frame<'_>) {
        self.last = Some(FrameSnapshot::capture(frame));
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
    use crate::grid::Grid;

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut grid = Grid::with_size(101, 27).unwrap();
        grid.set_cell_value(1, 1, "hello");
        grid.select_cell(1, 1);

        let mut renderer = SnapshotRenderer::new();
        assert!(grid.frame(&mut renderer));
        let snapshot = renderer.take().unwrap();
        assert_eq!(snapshot.cells.len(), 1);
        assert_eq!(snapshot.cells[0].rect.x, 50.0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["range"]["startRow"], 1);
        assert_eq!(json["headerWidth"], 50.0);
        assert_eq!(json["cells"][0]["value"], "hello");
        assert_eq!(json["columnHeaders"][0]["label"], "A");
        assert!(json["selection"].is_object());
    }

    #[test]
    fn test_clean_grid_produces_no_snapshot() {
        let mut grid = Grid::with_size(10, 10).unwrap();
        let mut renderer = SnapshotRenderer::new();
        grid.frame(&mut renderer);
        renderer.take();
        assert!(!grid.frame(&mut renderer));
        assert!(renderer.take().is_none());
    }
}
