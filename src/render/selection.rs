//! Selection overlay helpers.
//!
//! These helpers keep selection math testable without depending on Canvas APIs.

use serde::Serialize;

use crate::layout::{DimensionTable, Viewport, VisibleRange};
use crate::types::CellRange;

/// Selection border in surface coordinates, clipped to the data area.
///
/// An edge flag is false when that edge lies outside the data area (scrolled away or
/// under a header band), so the renderer does not draw a border that isn't there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub draw_top: bool,
    pub draw_bottom: bool,
    pub draw_left: bool,
    pub draw_right: bool,
}

/// Clip the selection `range` to the visible data area.
pub fn selection_rect(
    range: &CellRange,
    dims: &DimensionTable,
    viewport: &Viewport,
) -> Option<SelectionRect> {
    let x1 = dims.x_of(range.left)? - viewport.scroll_x;
    let x2 = dims.x_of(range.right + 1)? - viewport.scroll_x;
    let y1 = dims.y_of(range.top)? - viewport.scroll_y;
    let y2 = dims.y_of(range.bottom + 1)? - viewport.scroll_y;

    let left_bound = dims.header_width();
    let top_bound = dims.header_height();
    let right_bound = viewport.width;
    let bottom_bound = viewport.height;

    let cx1 = x1.max(left_bound);
    let cy1 = y1.max(top_bound);
    let cx2 = x2.min(right_bound);
    let cy2 = y2.min(bottom_bound);
    let w = cx2 - cx1;
    let h = cy2 - cy1;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    Some(SelectionRect {
        x: f64::from(cx1),
        y: f64::from(cy1),
        w: f64::from(w),
        h: f64::from(h),
        draw_top: y1 >= top_bound,
        draw_bottom: y2 <= bottom_bound,
        draw_left: x1 >= left_bound,
        draw_right: x2 <= right_bound,
    })
}

/// Header spans to highlight: the selection clipped to the visible range.
///
/// Returns `(rows, cols)` as inclusive index pairs.
pub fn highlighted_headers(
    range: &CellRange,
    visible: &VisibleRange,
) -> (Option<(u32, u32)>, Option<(u32, u32)>) {
    let rows = {
        let start = range.top.max(visible.start_row);
        let end = range.bottom.min(visible.end_row);
        (start <= end).then_some((start, end))
    };
    let cols = {
        let start = range.left.max(visible.start_col);
        let end = range.right.min(visible.end_col);
        (start <= end).then_some((start, end))
    };
    (rows, cols)
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

    fn setup() -> (DimensionTable, Viewport) {
        (
            DimensionTable::new(&GridConfig::with_size(1001, 101)),
            Viewport::new(800.0, 600.0),
        )
    }

    fn range(top: u32, left: u32, bottom: u32, right: u32) -> CellRange {
        CellRange {
            top,
            left,
            bottom,
            right,
        }
    }

    #[test]
    fn selection_rect_inside_viewport_draws_all_edges() {
        let (dims, viewport) = setup();
        let rect = selection_rect(&range(2, 2, 3, 4), &dims, &viewport).unwrap();
        assert_eq!(rect.x, 130.0);
        assert_eq!(rect.y, 48.0);
        assert_eq!(rect.w, 240.0);
        assert_eq!(rect.h, 48.0);
        assert!(rect.draw_top && rect.draw_bottom && rect.draw_left && rect.draw_right);
    }

    #[test]
    fn selection_rect_clips_under_headers() {
        let (dims, mut viewport) = setup();
        viewport.set_scroll(80.0, 48.0, &dims);
        let rect = selection_rect(&range(1, 1, 10, 5), &dims, &viewport).unwrap();
        assert_eq!(rect.x, 50.0);
        assert_eq!(rect.y, 24.0);
        assert!(!rect.draw_top);
        assert!(!rect.draw_left);
        assert!(rect.draw_bottom);
        assert!(rect.draw_right);
    }

    #[test]
    fn selection_rect_off_screen_is_none() {
        let (dims, viewport) = setup();
        assert!(selection_rect(&range(500, 1, 501, 2), &dims, &viewport).is_none());
    }

    #[test]
    fn full_row_selection_loses_right_edge() {
        let (dims, viewport) = setup();
        let rect = selection_rect(&range(3, 1, 3, 100), &dims, &viewport).unwrap();
        assert!(rect.draw_left);
        assert!(!rect.draw_right);
        assert_eq!(rect.x + rect.w, 800.0);
    }

    #[test]
    fn highlighted_headers_clip_to_visible() {
        let visible = VisibleRange {
            start_row: 10,
            end_row: 35,
            start_col: 1,
            end_col: 10,
        };
        let (rows, cols) = highlighted_headers(&range(5, 8, 12, 20), &visible);
        assert_eq!(rows, Some((10, 12)));
        assert_eq!(cols, Some((8, 10)));
        let (rows, _) = highlighted_headers(&range(40, 1, 41, 1), &visible);
        assert_eq!(rows, None);
    }
}
