//! Drag a header border to resize a row or column.

use super::GestureHandler;
use crate::grid::Grid;
use crate::types::{ActionRecord, Axis, Cursor, PointerEvent};

#[derive(Debug, Clone, Copy)]
struct ResizeDrag {
    axis: Axis,
    index: u32,
    /// Pointer coordinate along `axis` at pointer-down
    origin: f32,
    /// Track size at pointer-down
    from: f32,
}

/// Resize handles: a few pixels either side of each border in the header bands.
#[derive(Debug, Default)]
pub struct ResizeHandler {
    drag: Option<ResizeDrag>,
}

impl ResizeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track whose trailing border is under the pointer.
    pub fn border_at(grid: &Grid, event: &PointerEvent) -> Option<(Axis, u32)> {
        let half = grid.config().resize_handle_size / 2.0;
        let dims = grid.dims();
        if event.y >= 0.0 && event.y < dims.header_height() && event.x >= dims.header_width() {
            let col = nearest_border(event.x, half, grid.screen_to_col(event.x)?, |c| {
                grid.col_screen_x(c)
            })?;
            return Some((Axis::Column, col));
        }
        if event.x >= 0.0 && event.x < dims.header_width() && event.y >= dims.header_height() {
            let row = nearest_border(event.y, half, grid.screen_to_row(event.y)?, |r| {
                grid.row_screen_y(r)
            })?;
            return Some((Axis::Row, row));
        }
        None
    }

    fn size_of(grid: &Grid, axis: Axis, index: u32) -> Option<f32> {
        grid.dims().track(axis).size_of(index)
    }

    fn apply(grid: &mut Grid, axis: Axis, index: u32, size: f32) -> Option<f32> {
        match axis {
            Axis::Row => grid.resize_row(index, size),
            Axis::Column => grid.resize_column(index, size),
        }
    }
}

/// Data track owning the border within `half` px of `pos`.
///
/// `under` is the track under the pointer; its own trailing border wins over the
/// trailing border of its predecessor.
fn nearest_border(
    pos: f32,
    half: f32,
    under: u32,
    leading_edge: impl Fn(u32) -> Option<f32>,
) -> Option<u32> {
    let trailing = leading_edge(under.checked_add(1)?)?;
    if under > 0 && (pos - trailing).abs() <= half {
        return Some(under);
    }
    let leading = leading_edge(under)?;
    let previous = under.checked_sub(1)?;
    (previous > 0 && (pos - leading).abs() <= half).then_some(previous)
}

fn along(axis: Axis, event: &PointerEvent) -> f32 {
    match axis {
        Axis::Row => event.y,
        Axis::Column => event.x,
    }
}

fn resize_cursor(axis: Axis) -> Cursor {
    match axis {
        Axis::Row => Cursor::RowResize,
        Axis::Column => Cursor::ColResize,
    }
}

impl GestureHandler for ResizeHandler {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn hit_test(&self, grid: &Grid, event: &PointerEvent) -> bool {
        Self::border_at(grid, event).is_some()
    }

    fn cursor(&self, grid: &Grid, event: &PointerEvent) -> Cursor {
        if let Some(drag) = self.drag {
            return resize_cursor(drag.axis);
        }
        Self::border_at(grid, event).map_or(Cursor::Default, |(axis, _)| resize_cursor(axis))
    }

    fn handle_down(&mut self, grid: &mut Grid, event: &PointerEvent) {
        self.drag = Self::border_at(grid, event).and_then(|(axis, index)| {
            Some(ResizeDrag {
                axis,
                index,
                origin: along(axis, event),
                from: Self::size_of(grid, axis, index)?,
            })
        });
    }

    fn handle_drag(&mut self, grid: &mut Grid, event: &PointerEvent) {
        let Some(drag) = self.drag else {
            return;
        };
        let size = drag.from + (along(drag.axis, event) - drag.origin);
        Self::apply(grid, drag.axis, drag.index, size);
    }

    fn handle_up(&mut self, grid: &mut Grid, event: &PointerEvent) -> Option<ActionRecord> {
        self.handle_drag(grid, event);
        let drag = self.drag.take()?;
        let to = Self::size_of(grid, drag.axis, drag.index)?;
        if (to - drag.from).abs() <= f32::EPSILON {
            return None;
        }
        log::debug!("resized {} {}: {} -> {}", drag.axis, drag.index, drag.from, to);
        Some(ActionRecord::resize(drag.axis, drag.index, drag.from, to))
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
    use crate::types::{ActionDetails, ActionType};

    fn grid() -> Grid {
        Grid::with_size(101, 27).unwrap()
    }

    #[test]
    fn test_border_detection() {
        let grid = grid();
        // Column 1 spans x 50..130 in the label band.
        assert_eq!(
            ResizeHandler::border_at(&grid, &PointerEvent::new(130.0, 10.0)),
            Some((Axis::Column, 1))
        );
        assert_eq!(
            ResizeHandler::border_at(&grid, &PointerEvent::new(127.0, 10.0)),
            Some((Axis::Column, 1))
        );
        assert_eq!(
            ResizeHandler::border_at(&grid, &PointerEvent::new(133.0, 10.0)),
            Some((Axis::Column, 1))
        );
        assert_eq!(ResizeHandler::border_at(&grid, &PointerEvent::new(90.0, 10.0)), None);
        // The gutter's own border is not resizable.
        assert_eq!(ResizeHandler::border_at(&grid, &PointerEvent::new(52.0, 10.0)), None);
        // Row 2 ends at y 72 in the gutter.
        assert_eq!(
            ResizeHandler::border_at(&grid, &PointerEvent::new(10.0, 71.0)),
            Some((Axis::Row, 2))
        );
        // Inside the data area nothing is a handle.
        assert_eq!(ResizeHandler::border_at(&grid, &PointerEvent::new(130.0, 100.0)), None);
    }

    #[test]
    fn test_drag_resizes_and_reports_change() {
        let mut grid = grid();
        let mut handler = ResizeHandler::new();
        let down = PointerEvent::new(130.0, 10.0);
        assert!(handler.hit_test(&grid, &down));
        handler.handle_down(&mut grid, &down);
        handler.handle_drag(&mut grid, &PointerEvent::new(170.0, 300.0));
        assert_eq!(grid.dims().width_of(1), Some(120.0));
        assert_eq!(handler.cursor(&grid, &PointerEvent::new(500.0, 300.0)), Cursor::ColResize);

        let record = handler
            .handle_up(&mut grid, &PointerEvent::new(180.0, 300.0))
            .unwrap();
        assert_eq!(record.action, ActionType::ResizeColumn);
        assert_eq!(
            record.details,
            ActionDetails::Resize {
                index: 1,
                from: 80.0,
                to: 130.0
            }
        );
    }

    #[test]
    fn test_drag_clamps_to_minimum() {
        let mut grid = grid();
        let mut handler = ResizeHandler::new();
        handler.handle_down(&mut grid, &PointerEvent::new(10.0, 48.0));
        handler.handle_drag(&mut grid, &PointerEvent::new(10.0, -400.0));
        assert_eq!(grid.dims().height_of(1), Some(12.0));
    }

    #[test]
    fn test_click_without_change_records_nothing() {
        let mut grid = grid();
        let mut handler = ResizeHandler::new();
        let event = PointerEvent::new(130.0, 10.0);
        handler.handle_down(&mut grid, &event);
        assert_eq!(handler.handle_up(&mut grid, &event), None);
    }
}
