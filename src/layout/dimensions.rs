//! Per-row heights and per-column widths.

use super::Track;
use crate::config::GridConfig;
use crate::types::Axis;

/// Row heights and column widths, independently mutable and addressable by index.
///
/// Splicing a track here is the authoritative "index shift": the cell store and the
/// selection mirror exactly this shift during structural edits.
#[derive(Debug, Clone)]
pub struct DimensionTable {
    pub(super) rows: Track,
    pub(super) cols: Track,
}

impl DimensionTable {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            rows: Track::new(
                config.rows,
                config.col_header_height,
                config.default_row_height,
                config.min_row_height,
            ),
            cols: Track::new(
                config.cols,
                config.row_header_width,
                config.default_col_width,
                config.min_col_width,
            ),
        }
    }

    pub fn row_count(&self) -> u32 {
        self.rows.len()
    }

    pub fn col_count(&self) -> u32 {
        self.cols.len()
    }

    pub fn track(&self, axis: Axis) -> &Track {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.cols,
        }
    }

    pub(crate) fn track_mut(&mut self, axis: Axis) -> &mut Track {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.cols,
        }
    }

    pub fn width_of(&self, col: u32) -> Option<f32> {
        self.cols.size_of(col)
    }

    pub fn height_of(&self, row: u32) -> Option<f32> {
        self.rows.size_of(row)
    }

    /// Resize a column, clamped to the minimum width. Returns the applied width.
    pub fn resize_col(&mut self, col: u32, width: f32) -> Option<f32> {
        self.cols.resize(col, width)
    }

    /// Resize a row, clamped to the minimum height. Returns the applied height.
    pub fn resize_row(&mut self, row: u32, height: f32) -> Option<f32> {
        self.rows.resize(row, height)
    }

    pub fn insert_column_width(&mut self, col: u32, width: f32) -> bool {
        self.cols.insert(col, width)
    }

    pub fn remove_column_width(&mut self, col: u32) -> Option<f32> {
        self.cols.remove(col)
    }

    pub fn insert_row_height(&mut self, row: u32, height: f32) -> bool {
        self.rows.insert(row, height)
    }

    pub fn remove_row_height(&mut self, row: u32) -> Option<f32> {
        self.rows.remove(row)
    }

    /// Width of the frozen row-number gutter (column 0).
    pub fn header_width(&self) -> f32 {
        self.cols.size_of(0).unwrap_or(0.0)
    }

    /// Height of the frozen column-label band (row 0).
    pub fn header_height(&self) -> f32 {
        self.rows.size_of(0).unwrap_or(0.0)
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

    #[test]
    fn test_every_index_has_a_size() {
        let dims = DimensionTable::new(&GridConfig::with_size(11, 6));
        for row in 0..11 {
            assert!(dims.height_of(row).unwrap() > 0.0);
        }
        for col in 0..6 {
            assert!(dims.width_of(col).unwrap() > 0.0);
        }
        assert_eq!(dims.height_of(11), None);
        assert_eq!(dims.header_width(), 50.0);
        assert_eq!(dims.header_height(), 24.0);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut dims = DimensionTable::new(&GridConfig::default());
        assert_eq!(dims.resize_col(3, -10.0), Some(24.0));
        assert_eq!(dims.resize_row(3, 1.0), Some(12.0));
        assert_eq!(dims.width_of(3), Some(24.0));
        assert_eq!(dims.height_of(3), Some(12.0));
    }

    #[test]
    fn test_insert_then_remove_restores_widths() {
        let mut dims = DimensionTable::new(&GridConfig::with_size(5, 6));
        dims.resize_col(2, 120.0);
        dims.resize_col(3, 33.0);
        let before = dims.track(Axis::Column).sizes().to_vec();

        assert!(dims.insert_column_width(2, 80.0));
        assert_eq!(dims.col_count(), 7);
        assert_eq!(dims.width_of(3), Some(120.0));
        assert_eq!(dims.remove_column_width(2), Some(80.0));

        assert_eq!(dims.track(Axis::Column).sizes(), before.as_slice());
    }
}
