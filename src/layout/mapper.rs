//! Index ↔ pixel mapping over the full dimension table.
//!
//! Mapping is defined in virtual (unscrolled) coordinates and ignores the viewport,
//! so selection math keeps working for rows and columns that are off screen.

use serde::Serialize;

use super::DimensionTable;

/// Rectangle representing a cell's bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellRect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width of the cell
    pub width: f32,
    /// Height of the cell
    pub height: f32,
}

impl CellRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl DimensionTable {
    /// Left edge of `col`: header width plus the widths of all data columns before it.
    ///
    /// `col == col_count()` gives the right edge of the last column.
    pub fn x_of(&self, col: u32) -> Option<f32> {
        self.cols.offset_of(col)
    }

    /// Top edge of `row`: header height plus the heights of all data rows before it.
    pub fn y_of(&self, row: u32) -> Option<f32> {
        self.rows.offset_of(row)
    }

    /// Column whose span contains `x`, or `None` outside the content.
    pub fn col_at(&self, x: f32) -> Option<u32> {
        self.cols.index_at(x)
    }

    /// Row whose span contains `y`, or `None` outside the content.
    pub fn row_at(&self, y: f32) -> Option<u32> {
        self.rows.index_at(y)
    }

    /// Cell bounds in virtual coordinates.
    pub fn cell_rect(&self, row: u32, col: u32) -> Option<CellRect> {
        Some(CellRect {
            x: self.x_of(col)?,
            y: self.y_of(row)?,
            width: self.width_of(col)?,
            height: self.height_of(row)?,
        })
    }

    /// Get total width of the grid, header included
    pub fn total_width(&self) -> f32 {
        self.cols.total()
    }

    /// Get total height of the grid, header included
    pub fn total_height(&self) -> f32 {
        self.rows.total()
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

    fn dims() -> DimensionTable {
        let config = GridConfig {
            default_col_width: 64.0,
            ..GridConfig::with_size(21, 11)
        };
        DimensionTable::new(&config)
    }

    #[test]
    fn test_x_of_counts_header() {
        let dims = dims();
        assert_eq!(dims.x_of(0), Some(0.0));
        assert_eq!(dims.x_of(1), Some(50.0));
        assert_eq!(dims.x_of(4), Some(50.0 + 3.0 * 64.0));
        assert_eq!(dims.x_of(11), Some(dims.total_width()));
        assert_eq!(dims.x_of(12), None);
    }

    #[test]
    fn test_resize_moves_only_later_columns() {
        let mut dims = dims();
        let x3 = dims.x_of(3).unwrap();
        let x5 = dims.x_of(5).unwrap();
        dims.resize_col(4, 120.0);
        assert_eq!(dims.x_of(3), Some(x3));
        assert_eq!(dims.x_of(5), Some(x5 + 56.0));
    }

    #[test]
    fn test_col_at_round_trips() {
        let mut dims = dims();
        dims.resize_col(2, 200.0);
        dims.resize_col(7, 30.0);
        for col in 0..dims.col_count() {
            assert_eq!(dims.col_at(dims.x_of(col).unwrap()), Some(col));
        }
        for step in 0..200 {
            let x = step as f32 * 4.3;
            if let Some(col) = dims.col_at(x) {
                assert!(dims.x_of(col).unwrap() <= x);
                assert!(x < dims.x_of(col + 1).unwrap());
            }
        }
    }

    #[test]
    fn test_outside_content_is_none() {
        let dims = dims();
        assert_eq!(dims.col_at(-0.5), None);
        assert_eq!(dims.col_at(dims.total_width()), None);
        assert_eq!(dims.row_at(dims.total_height() + 10.0), None);
        assert!(dims.cell_rect(21, 1).is_none());
    }

    #[test]
    fn test_cell_rect() {
        let dims = dims();
        let rect = dims.cell_rect(2, 3).unwrap();
        assert_eq!(rect.x, 50.0 + 2.0 * 64.0);
        assert_eq!(rect.y, 24.0 + 24.0);
        assert_eq!(rect.width, 64.0);
        assert_eq!(rect.height, 24.0);
        assert_eq!(rect.right(), rect.x + 64.0);
    }
}
