//! Corner header click selects every data cell.

use super::GestureHandler;
use crate::grid::Grid;
use crate::types::{ActionRecord, Cursor, PointerEvent};

#[derive(Debug, Default)]
pub struct SelectAllHandler;

impl GestureHandler for SelectAllHandler {
    fn name(&self) -> &'static str {
        "select-all"
    }

    fn hit_test(&self, grid: &Grid, event: &PointerEvent) -> bool {
        grid.screen_to_row(event.y) == Some(0) && grid.screen_to_col(event.x) == Some(0)
    }

    fn cursor(&self, _grid: &Grid, _event: &PointerEvent) -> Cursor {
        Cursor::SelectAll
    }

    fn handle_down(&mut self, grid: &mut Grid, _event: &PointerEvent) {
        grid.select_all();
    }

    fn handle_drag(&mut self, _grid: &mut Grid, _event: &PointerEvent) {}

    fn handle_up(&mut self, _grid: &mut Grid, _event: &PointerEvent) -> Option<ActionRecord> {
        None
    }
}
