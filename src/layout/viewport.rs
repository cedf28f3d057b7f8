//! Viewport state: scroll offsets, surface size and the visible index range.

use serde::Serialize;

use super::DimensionTable;

/// Inclusive row/column index range that must be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRange {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl VisibleRange {
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn col_count(&self) -> u32 {
        self.end_col - self.start_col + 1
    }
}

/// Viewport state - the visible area of the grid surface.
///
/// Row 0 and column 0 are frozen: they always paint at the top/left edge, and the
/// scroll offsets apply to data tracks only. A data cell at virtual `x` appears on
/// screen at `x - scroll_x`.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Horizontal scroll position in pixels
    pub scroll_x: f32,
    /// Vertical scroll position in pixels
    pub scroll_y: f32,
    /// Surface width in pixels, row header included
    pub width: f32,
    /// Surface height in pixels, column header included
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Visible data row range (inclusive) at the current scroll position.
    ///
    /// Scroll offsets past the maximum resolve to the last row instead of failing.
    pub fn visible_rows(&self, dims: &DimensionTable) -> (u32, u32) {
        let last = dims.row_count().saturating_sub(1).max(1);
        let top = dims.header_height() + self.scroll_y;
        let bottom = self.scroll_y + self.height;

        let start = dims.row_at(top).unwrap_or(last).clamp(1, last);
        let end = dims.row_at(bottom).unwrap_or(last).clamp(start, last);
        (start, end)
    }

    /// Visible data column range (inclusive) at the current scroll position.
    pub fn visible_cols(&self, dims: &DimensionTable) -> (u32, u32) {
        let last = dims.col_count().saturating_sub(1).max(1);
        let left = dims.header_width() + self.scroll_x;
        let right = self.scroll_x + self.width;

        let start = dims.col_at(left).unwrap_or(last).clamp(1, last);
        let end = dims.col_at(right).unwrap_or(last).clamp(start, last);
        (start, end)
    }

    pub fn visible_range(&self, dims: &DimensionTable) -> VisibleRange {
        let (start_row, end_row) = self.visible_rows(dims);
        let (start_col, end_col) = self.visible_cols(dims);
        VisibleRange {
            start_row,
            end_row,
            start_col,
            end_col,
        }
    }

    /// Largest valid scroll offsets: content extent minus visible extent.
    pub fn max_scroll(&self, dims: &DimensionTable) -> (f32, f32) {
        (
            (dims.total_width() - self.width).max(0.0),
            (dims.total_height() - self.height).max(0.0),
        )
    }

    /// Clamp scroll position to valid range.
    pub fn clamp_scroll(&mut self, dims: &DimensionTable) {
        let (max_x, max_y) = self.max_scroll(dims);
        self.scroll_x = clamp_or_zero(self.scroll_x, max_x);
        self.scroll_y = clamp_or_zero(self.scroll_y, max_y);
    }

    /// Scroll by delta amounts. Returns true if the position changed.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, dims: &DimensionTable) -> bool {
        self.set_scroll(self.scroll_x + delta_x, self.scroll_y + delta_y, dims)
    }

    /// Set absolute scroll position. Returns true if the position changed.
    pub fn set_scroll(&mut self, x: f32, y: f32, dims: &DimensionTable) -> bool {
        let (old_x, old_y) = (self.scroll_x, self.scroll_y);
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(dims);
        (self.scroll_x - old_x).abs() > f32::EPSILON || (self.scroll_y - old_y).abs() > f32::EPSILON
    }

    /// Resize the surface.
    pub fn resize(&mut self, width: f32, height: f32, dims: &DimensionTable) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.clamp_scroll(dims);
    }

    /// Scroll the minimal amount that brings `(row, col)` fully into the data area.
    ///
    /// Header indices leave their axis untouched. Returns true if the position changed.
    pub fn ensure_visible(&mut self, row: u32, col: u32, dims: &DimensionTable) -> bool {
        let mut x = self.scroll_x;
        let mut y = self.scroll_y;

        if col > 0 {
            if let (Some(left), Some(width)) = (dims.x_of(col), dims.width_of(col)) {
                x = reveal(x, left, left + width, dims.header_width(), self.width);
            }
        }
        if row > 0 {
            if let (Some(top), Some(height)) = (dims.y_of(row), dims.height_of(row)) {
                y = reveal(y, top, top + height, dims.header_height(), self.height);
            }
        }
        self.set_scroll(x, y, dims)
    }
}

/// New scroll offset showing `[start, end)` within `[header + scroll, scroll + extent)`.
fn reveal(scroll: f32, start: f32, end: f32, header: f32, extent: f32) -> f32 {
    if start < header + scroll {
        start - header
    } else if end > scroll + extent {
        // A track larger than the data area keeps its leading edge in view.
        (end - extent).min(start - header)
    } else {
        scroll
    }
}

fn clamp_or_zero(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
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
    use crate::config::GridConfig;

    fn dims(rows: u32, cols: u32) -> DimensionTable {
        DimensionTable::new(&GridConfig::with_size(rows, cols))
    }

    #[test]
    fn test_visible_range_at_origin() {
        let dims = dims(1001, 101);
        let viewport = Viewport::new(800.0, 600.0);
        let range = viewport.visible_range(&dims);
        // 600px tall, 24px header, 24px rows: rows 1..=24 cover [24, 600)
        assert_eq!(range.start_row, 1);
        assert_eq!(range.end_row, 25);
        // 800px wide, 50px gutter, 80px columns: 1..=10 cover [50, 850)
        assert_eq!(range.start_col, 1);
        assert_eq!(range.end_col, 10);
    }

    #[test]
    fn test_visible_range_after_scroll() {
        let dims = dims(1001, 101);
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_scroll(240.0, 240.0, &dims);
        let (start_row, _) = viewport.visible_rows(&dims);
        let (start_col, _) = viewport.visible_cols(&dims);
        assert_eq!(start_row, 11);
        assert_eq!(start_col, 4);
    }

    #[test]
    fn test_scroll_past_max_is_tolerated() {
        let dims = dims(51, 11);
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.scroll_y = 1.0e9;
        viewport.scroll_x = 1.0e9;
        let range = viewport.visible_range(&dims);
        assert_eq!(range.end_row, 50);
        assert_eq!(range.end_col, 10);
        assert!(range.start_row <= range.end_row);

        viewport.clamp_scroll(&dims);
        let (max_x, max_y) = viewport.max_scroll(&dims);
        assert_eq!(viewport.scroll_x, max_x);
        assert_eq!(viewport.scroll_y, max_y);
        assert_eq!(max_y, dims.total_height() - 600.0);
    }

    #[test]
    fn test_small_grid_does_not_scroll() {
        let dims = dims(3, 3);
        let mut viewport = Viewport::new(800.0, 600.0);
        assert!(!viewport.scroll_by(100.0, 100.0, &dims));
        assert_eq!(viewport.visible_range(&dims).end_row, 2);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let dims = dims(1001, 101);
        let mut viewport = Viewport::new(800.0, 600.0);

        assert!(viewport.ensure_visible(40, 1, &dims));
        // Row 40 spans [960, 984); bottom edge aligns with the surface bottom.
        assert_eq!(viewport.scroll_y, 984.0 - 600.0);
        assert_eq!(viewport.scroll_x, 0.0);

        assert!(viewport.ensure_visible(2, 1, &dims));
        // Row 2 top (48) sits just under the 24px header.
        assert_eq!(viewport.scroll_y, 24.0);

        assert!(!viewport.ensure_visible(3, 1, &dims));
    }
}
