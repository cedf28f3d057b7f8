//! Viewport and scroll tests
//!
//! Index ↔ pixel mapping over variable track sizes, visible range computation and
//! scroll clamping.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use proptest::prelude::*;
use test_case::test_case;
use vgrid::{Grid, GridConfig, VisibleRange};

fn default_grid() -> Grid {
    Grid::new(GridConfig::default()).unwrap()
}

#[test]
fn test_resize_shifts_later_columns_only() {
    let config = GridConfig {
        default_col_width: 64.0,
        ..GridConfig::default()
    };
    let mut grid = Grid::new(config).unwrap();
    let x3 = grid.dims().x_of(3).unwrap();
    let x5 = grid.dims().x_of(5).unwrap();

    assert_eq!(grid.resize_column(4, 120.0), Some(120.0));
    assert_eq!(grid.dims().x_of(3).unwrap(), x3);
    assert_eq!(grid.dims().x_of(5).unwrap(), x5 + 56.0);
}

#[test]
fn test_resize_clamps_to_minimum() {
    let mut grid = default_grid();
    assert_eq!(grid.resize_column(2, 3.0), Some(24.0));
    assert_eq!(grid.resize_row(2, -10.0), Some(12.0));
    assert_eq!(grid.resize_column(500, 100.0), None);
}

#[test]
fn test_visible_range_at_origin() {
    let grid = default_grid();
    assert_eq!(
        grid.visible_range(),
        VisibleRange {
            start_row: 1,
            end_row: 25,
            start_col: 1,
            end_col: 10,
        }
    );
}

#[test]
fn test_visible_range_after_scroll() {
    let mut grid = Grid::with_size(1001, 101).unwrap();
    assert!(grid.set_scroll(800.0, 240.0));
    // Row 11 starts at 24 + 240 = 264 and column 11 at 50 + 800 = 850
    let range = grid.visible_range();
    assert_eq!(range.start_row, 11);
    assert_eq!(range.start_col, 11);
    assert!(range.end_row > range.start_row);
    assert!(range.end_col > range.start_col);
}

#[test]
fn test_scroll_clamps_to_content() {
    let mut grid = default_grid();
    // 100 rows * 24 + 24 header = 2424; 26 cols * 80 + 50 = 2130
    assert_eq!(grid.max_scroll(), (2130.0 - 800.0, 2424.0 - 600.0));

    grid.set_scroll(1.0e9, 1.0e9);
    assert_eq!(grid.viewport().scroll_x, 1330.0);
    assert_eq!(grid.viewport().scroll_y, 1824.0);
    let range = grid.visible_range();
    assert_eq!(range.end_row, 100);
    assert_eq!(range.end_col, 26);

    grid.set_scroll(-50.0, -50.0);
    assert_eq!(grid.viewport().scroll_x, 0.0);
    assert_eq!(grid.viewport().scroll_y, 0.0);
}

#[test]
fn test_small_content_never_scrolls() {
    let mut grid = Grid::with_size(4, 4).unwrap();
    assert_eq!(grid.max_scroll(), (0.0, 0.0));
    assert!(!grid.scroll_by(100.0, 100.0));
    let range = grid.visible_range();
    assert_eq!((range.end_row, range.end_col), (3, 3));
}

#[test]
fn test_ensure_visible_scrolls_minimally() {
    let mut grid = Grid::with_size(1001, 101).unwrap();
    // Row 40 ends at 24 + 40 * 24 = 984, bottom edge of the surface is 600
    assert!(grid.ensure_visible(40, 1));
    assert_eq!(grid.viewport().scroll_y, 384.0);
    assert_eq!(grid.viewport().scroll_x, 0.0);
    assert!(!grid.ensure_visible(40, 1));

    // Back up: row 5 starts at 120, top of the data area is 24
    assert!(grid.ensure_visible(5, 1));
    assert_eq!(grid.viewport().scroll_y, 96.0);
}

#[test_case(25.0, 0 ; "gutter")]
#[test_case(50.0, 1 ; "first column edge")]
#[test_case(129.9, 1 ; "inside first column")]
#[test_case(130.0, 2 ; "second column edge")]
#[test_case(799.0, 10 ; "right edge of surface")]
fn test_screen_to_col(x: f32, expected: u32) {
    assert_eq!(default_grid().screen_to_col(x), Some(expected));
}

#[test]
fn test_screen_to_col_off_surface() {
    let grid = default_grid();
    assert_eq!(grid.screen_to_col(-1.0), None);
    assert_eq!(grid.screen_to_col(800.0), None);
    assert_eq!(grid.screen_to_col(f32::NAN), None);
}

#[test]
fn test_frozen_headers_ignore_scroll() {
    let mut grid = Grid::with_size(1001, 101).unwrap();
    grid.set_scroll(400.0, 400.0);
    assert_eq!(grid.screen_to_col(10.0), Some(0));
    assert_eq!(grid.screen_to_row(10.0), Some(0));
    assert_eq!(grid.col_screen_x(0), Some(0.0));
    // Column 1 scrolled 400px left of the gutter edge
    assert_eq!(grid.col_screen_x(1), Some(50.0 - 400.0));
    assert_eq!(grid.hit_cell(60.0, 30.0).map(|p| (p.row, p.col)), Some((17, 6)));
}

fn sized_grid(widths: &[f32]) -> Grid {
    let cols = u32::try_from(widths.len()).unwrap() + 1;
    let mut grid = Grid::with_size(11, cols).unwrap();
    for (i, width) in widths.iter().enumerate() {
        grid.resize_column(u32::try_from(i).unwrap() + 1, *width);
    }
    grid
}

proptest! {
    #[test]
    fn prop_col_at_inverts_x_of(widths in prop::collection::vec(24.0f32..300.0, 1..60)) {
        let grid = sized_grid(&widths);
        let dims = grid.dims();
        for col in 0..dims.col_count() {
            let x = dims.x_of(col).unwrap();
            prop_assert_eq!(dims.col_at(x), Some(col));
        }
    }

    #[test]
    fn prop_x_inside_found_column(
        widths in prop::collection::vec(24.0f32..300.0, 1..60),
        frac in 0.0f32..1.0,
    ) {
        let grid = sized_grid(&widths);
        let dims = grid.dims();
        let x = frac * dims.total_width();
        let col = dims.col_at(x).unwrap();
        prop_assert!(dims.x_of(col).unwrap() <= x);
        prop_assert!(x < dims.x_of(col + 1).unwrap());
    }

    #[test]
    fn prop_visible_range_covers_surface(
        sx in 0.0f32..5000.0,
        sy in 0.0f32..50000.0,
    ) {
        let mut grid = Grid::with_size(2001, 201).unwrap();
        grid.set_scroll(sx, sy);
        let range = grid.visible_range();
        let scroll_y = grid.viewport().scroll_y;
        let scroll_x = grid.viewport().scroll_x;

        // The first visible row reaches past the top of the data area
        let top = grid.dims().y_of(range.start_row).unwrap();
        let first_bottom = grid.dims().y_of(range.start_row + 1).unwrap();
        prop_assert!(top <= 24.0 + scroll_y);
        prop_assert!(first_bottom > 24.0 + scroll_y);
        // The last visible row reaches the bottom of the surface
        let last_bottom = grid.dims().y_of(range.end_row + 1).unwrap();
        prop_assert!(last_bottom >= scroll_y + 600.0);

        let left = grid.dims().x_of(range.start_col).unwrap();
        prop_assert!(left <= 50.0 + scroll_x);
        let last_right = grid.dims().x_of(range.end_col + 1).unwrap();
        prop_assert!(last_right >= scroll_x + 800.0);
    }
}
