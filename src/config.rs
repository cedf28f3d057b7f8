//! Grid configuration: logical extent, track sizes, header bands and gesture tuning.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Construction-time settings for a [`crate::Grid`].
///
/// `rows` and `cols` count the header index 0, so a grid with `rows = 101` has data
/// rows `1..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Logical row count, header row included
    pub rows: u32,
    /// Logical column count, header column included
    pub cols: u32,
    /// Height given to every data row at construction and on insert
    pub default_row_height: f32,
    /// Width given to every data column at construction and on insert
    pub default_col_width: f32,
    /// Width of the row-number gutter (column 0)
    pub row_header_width: f32,
    /// Height of the column-label band (row 0)
    pub col_header_height: f32,
    /// Smallest height a row can be resized to
    pub min_row_height: f32,
    /// Smallest width a column can be resized to
    pub min_col_width: f32,
    /// Width of the resize grip straddling each header border
    pub resize_handle_size: f32,
    /// Auto-scroll tick period in milliseconds
    pub auto_scroll_interval_ms: f64,
    /// Pixels scrolled per auto-scroll tick
    pub auto_scroll_step: f32,
    /// Initial surface width in pixels
    pub viewport_width: f32,
    /// Initial surface height in pixels
    pub viewport_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 101,
            cols: 27,
            default_row_height: 24.0,
            default_col_width: 80.0,
            row_header_width: 50.0,
            col_header_height: 24.0,
            min_row_height: 12.0,
            min_col_width: 24.0,
            resize_handle_size: 8.0,
            auto_scroll_interval_ms: 50.0,
            auto_scroll_step: 20.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl GridConfig {
    /// Default configuration with the given logical extent.
    pub fn with_size(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Parse a (partial) JSON configuration; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the result fails [`GridConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check extents and sizes.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            return Err(GridError::Config(format!(
                "rows must be at least 2 (header + one data row), got {}",
                self.rows
            )));
        }
        if self.cols < 2 {
            return Err(GridError::Config(format!(
                "cols must be at least 2 (header + one data column), got {}",
                self.cols
            )));
        }
        if self.rows == u32::MAX || self.cols == u32::MAX {
            return Err(GridError::Config("extent leaves no room to insert".into()));
        }

        let sizes = [
            ("default_row_height", self.default_row_height),
            ("default_col_width", self.default_col_width),
            ("row_header_width", self.row_header_width),
            ("col_header_height", self.col_header_height),
            ("min_row_height", self.min_row_height),
            ("min_col_width", self.min_col_width),
            ("resize_handle_size", self.resize_handle_size),
            ("auto_scroll_step", self.auto_scroll_step),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.min_row_height > self.default_row_height {
            return Err(GridError::Config(
                "min_row_height exceeds default_row_height".into(),
            ));
        }
        if self.min_col_width > self.default_col_width {
            return Err(GridError::Config(
                "min_col_width exceeds default_col_width".into(),
            ));
        }
        if !self.auto_scroll_interval_ms.is_finite() || self.auto_scroll_interval_ms <= 0.0 {
            return Err(GridError::Config(format!(
                "auto_scroll_interval_ms must be positive, got {}",
                self.auto_scroll_interval_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        GridConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"rows": 100001, "cols": 501}"#).unwrap();
        assert_eq!(config.rows, 100_001);
        assert_eq!(config.cols, 501);
        assert_eq!(config.default_col_width, 80.0);
        assert_eq!(config.auto_scroll_interval_ms, 50.0);
    }

    #[test]
    fn test_rejects_header_only_grid() {
        let err = GridConfig::with_size(1, 10).validate().unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let config = GridConfig {
            default_row_height: 0.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GridConfig::from_json("{rows: 3").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }
}
