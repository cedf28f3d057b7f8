use serde::Serialize;
use std::ops::RangeInclusive;

use super::CellPos;

/// Shape of a selection.
///
/// There is no stored tag: the kind is read off where anchor and end sit relative to
/// the data extent. A full row pins its columns to `[1, cols - 1]`, a full column pins
/// its rows to `[1, rows - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionKind {
    /// Standard cell selection
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
    /// All data cells selected (corner click)
    All,
}

/// Normalized rectangular range (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl CellRange {
    /// Range spanned by two opposite corners, in any order.
    pub fn from_corners(a: CellPos, b: CellPos) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.top..=self.bottom).contains(&row) && (self.left..=self.right).contains(&col)
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.top..=self.bottom
    }

    pub fn cols(&self) -> RangeInclusive<u32> {
        self.left..=self.right
    }

    pub fn row_count(&self) -> u32 {
        self.bottom - self.top + 1
    }

    pub fn col_count(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Overlap with another range, if any.
    pub fn intersect(&self, other: &CellRange) -> Option<CellRange> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom.min(other.bottom);
        let right = self.right.min(other.right);
        (top <= bottom && left <= right).then_some(CellRange {
            top,
            left,
            bottom,
            right,
        })
    }
}

/// Anchor, active cell and moving end of a non-empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub active: CellPos,
    pub anchor: CellPos,
    pub end: CellPos,
}

impl SelectionState {
    fn at(pos: CellPos) -> Self {
        Self {
            active: pos,
            anchor: pos,
            end: pos,
        }
    }

    pub fn range(&self) -> CellRange {
        CellRange::from_corners(self.anchor, self.end)
    }
}

/// Last data index of an axis with `count` entries (index 0 is the header).
pub(crate) fn last_data_index(count: u32) -> u32 {
    count.saturating_sub(1).max(1)
}

/// Selection model: empty, or anchor/active/end all set together.
///
/// Callers clamp indices into the data extent before they reach this model; every
/// operation leaves the active cell inside the anchor/end rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    state: Option<SelectionState>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single cell: anchor, active and end all move to `(row, col)`.
    pub fn select_cell(&mut self, row: u32, col: u32) {
        self.state = Some(SelectionState::at(CellPos::new(row, col)));
    }

    /// Select a whole row, stretching the columns over `[1, col_count - 1]`.
    pub fn start_row_selection(&mut self, row: u32, col_count: u32) {
        let first = CellPos::new(row, 1);
        self.state = Some(SelectionState {
            active: first,
            anchor: first,
            end: CellPos::new(row, last_data_index(col_count)),
        });
    }

    /// Select a whole column, stretching the rows over `[1, row_count - 1]`.
    pub fn start_column_selection(&mut self, col: u32, row_count: u32) {
        let first = CellPos::new(1, col);
        self.state = Some(SelectionState {
            active: first,
            anchor: first,
            end: CellPos::new(last_data_index(row_count), col),
        });
    }

    /// Select every data cell.
    pub fn select_all(&mut self, row_count: u32, col_count: u32) {
        let first = CellPos::new(1, 1);
        self.state = Some(SelectionState {
            active: first,
            anchor: first,
            end: CellPos::new(last_data_index(row_count), last_data_index(col_count)),
        });
    }

    /// Move the end (and the active cell) while the anchor stays put.
    ///
    /// With nothing selected this behaves like [`Selection::select_cell`].
    pub fn extend_to(&mut self, row: u32, col: u32) {
        let pos = CellPos::new(row, col);
        match self.state.as_mut() {
            Some(state) => {
                state.end = pos;
                state.active = pos;
            }
            None => self.state = Some(SelectionState::at(pos)),
        }
    }

    /// Plain navigation: anchor, active and end move together.
    pub fn move_to(&mut self, row: u32, col: u32) {
        self.select_cell(row, col);
    }

    pub fn clear(&mut self) {
        self.state = None;
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    pub fn state(&self) -> Option<&SelectionState> {
        self.state.as_ref()
    }

    pub fn active(&self) -> Option<CellPos> {
        self.state.map(|s| s.active)
    }

    pub fn anchor(&self) -> Option<CellPos> {
        self.state.map(|s| s.anchor)
    }

    pub fn end(&self) -> Option<CellPos> {
        self.state.map(|s| s.end)
    }

    /// Normalized range covered by anchor and end.
    pub fn range(&self) -> Option<CellRange> {
        self.state.map(|s| s.range())
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.range().is_some_and(|r| r.contains(row, col))
    }

    /// Classify the selection against the current data extent.
    pub fn kind(&self, row_count: u32, col_count: u32) -> Option<SelectionKind> {
        let range = self.range()?;
        let full_rows = range.top == 1 && range.bottom == last_data_index(row_count);
        let full_cols = range.left == 1 && range.right == last_data_index(col_count);
        Some(match (full_rows, full_cols) {
            (true, true) => SelectionKind::All,
            (false, true) => SelectionKind::RowRange,
            (true, false) => SelectionKind::ColumnRange,
            (false, false) => SelectionKind::CellRange,
        })
    }

    /// True when the active cell lies inside the anchor/end rectangle (or nothing is
    /// selected).
    pub fn is_consistent(&self) -> bool {
        self.state
            .map_or(true, |s| s.range().contains(s.active.row, s.active.col))
    }

    pub(crate) fn replace(&mut self, state: Option<SelectionState>) {
        self.state = state;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_select_cell_collapses_all_corners() {
        let mut sel = Selection::new();
        sel.select_cell(4, 7);
        let state = sel.state().unwrap();
        assert_eq!(state.anchor, CellPos::new(4, 7));
        assert_eq!(state.active, CellPos::new(4, 7));
        assert_eq!(state.end, CellPos::new(4, 7));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut sel = Selection::new();
        sel.select_cell(10, 10);
        sel.extend_to(15, 12);

        assert_eq!(sel.anchor(), Some(CellPos::new(10, 10)));
        assert_eq!(sel.active(), Some(CellPos::new(15, 12)));
        assert_eq!(sel.end(), Some(CellPos::new(15, 12)));
        assert_eq!(
            sel.range(),
            Some(CellRange {
                top: 10,
                left: 10,
                bottom: 15,
                right: 12
            })
        );
        assert!(sel.is_consistent());
    }

    #[test]
    fn test_extend_backwards_normalizes_range() {
        let mut sel = Selection::new();
        sel.select_cell(10, 10);
        sel.extend_to(3, 2);
        let range = sel.range().unwrap();
        assert_eq!((range.top, range.left, range.bottom, range.right), (3, 2, 10, 10));
        assert!(sel.is_consistent());
    }

    #[test]
    fn test_extend_without_selection_selects_cell() {
        let mut sel = Selection::new();
        sel.extend_to(2, 3);
        assert_eq!(sel.anchor(), Some(CellPos::new(2, 3)));
    }

    #[test]
    fn test_row_selection_spans_data_columns() {
        let mut sel = Selection::new();
        sel.start_row_selection(5, 27);
        assert_eq!(sel.active(), Some(CellPos::new(5, 1)));
        assert_eq!(sel.end(), Some(CellPos::new(5, 26)));
        assert_eq!(sel.kind(101, 27), Some(SelectionKind::RowRange));
        assert!(sel.is_consistent());
    }

    #[test]
    fn test_column_selection_spans_data_rows() {
        let mut sel = Selection::new();
        sel.start_column_selection(3, 101);
        assert_eq!(sel.active(), Some(CellPos::new(1, 3)));
        assert_eq!(sel.end(), Some(CellPos::new(100, 3)));
        assert_eq!(sel.kind(101, 27), Some(SelectionKind::ColumnRange));
    }

    #[test]
    fn test_select_all_kind() {
        let mut sel = Selection::new();
        sel.select_all(101, 27);
        assert_eq!(sel.kind(101, 27), Some(SelectionKind::All));
        assert!(sel.contains(100, 26));
    }

    #[test]
    fn test_move_to_resets_anchor() {
        let mut sel = Selection::new();
        sel.select_cell(1, 1);
        sel.extend_to(4, 4);
        sel.move_to(6, 2);
        assert_eq!(sel.anchor(), Some(CellPos::new(6, 2)));
        assert_eq!(sel.range().unwrap().row_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut sel = Selection::new();
        sel.select_cell(1, 1);
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.kind(10, 10), None);
        assert!(sel.is_consistent());
    }

    #[test]
    fn test_range_intersect() {
        let a = CellRange {
            top: 1,
            left: 1,
            bottom: 10,
            right: 10,
        };
        let b = CellRange {
            top: 5,
            left: 8,
            bottom: 20,
            right: 20,
        };
        assert_eq!(
            a.intersect(&b),
            Some(CellRange {
                top: 5,
                left: 8,
                bottom: 10,
                right: 10
            })
        );
        let c = CellRange {
            top: 11,
            left: 1,
            bottom: 12,
            right: 1,
        };
        assert_eq!(a.intersect(&c), None);
    }
}
