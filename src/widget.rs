//! The assembled widget: grid state, gesture dispatch and an optional action log.
//!
//! `GridWidget` is what a host embeds. It owns every piece of mutable state, so all
//! mutation happens on the thread that owns it; renderers only ever see a borrowed
//! [`Frame`](crate::render::Frame) taken on that same thread.

use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::interaction::Dispatcher;
use crate::layout::CellRect;
use crate::render::Renderer;
use crate::types::{ActionLogger, ActionRecord, Axis, Cursor, KeyCommand, PointerEvent};

pub struct GridWidget {
    grid: Grid,
    dispatcher: Dispatcher,
    logger: Option<Box<dyn ActionLogger>>,
}

impl GridWidget {
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(config: GridConfig) -> Result<Self> {
        Ok(Self::from_grid(Grid::new(config)?))
    }

    pub fn from_grid(grid: Grid) -> Self {
        let dispatcher = Dispatcher::new(grid.config());
        Self {
            grid,
            dispatcher,
            logger: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Install the sink that receives gesture and edit records.
    pub fn set_logger(&mut self, logger: Box<dyn ActionLogger>) {
        self.logger = Some(logger);
    }

    pub fn take_logger(&mut self) -> Option<Box<dyn ActionLogger>> {
        self.logger.take()
    }

    fn log(&mut self, record: Option<ActionRecord>) {
        if let (Some(logger), Some(record)) = (self.logger.as_mut(), record) {
            logger.record(record);
        }
    }

    // ------------------------------------------------------------------
    // Pointer and keyboard
    // ------------------------------------------------------------------

    /// Returns true if a gesture started.
    pub fn pointer_down(&mut self, event: PointerEvent) -> bool {
        let finished = self.dispatcher.pointer_down(&mut self.grid, event);
        self.log(finished);
        self.dispatcher.is_dragging()
    }

    pub fn pointer_move(&mut self, event: PointerEvent, now_ms: f64) -> Cursor {
        self.dispatcher.pointer_move(&mut self.grid, event, now_ms)
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        let record = self.dispatcher.pointer_up(&mut self.grid, event);
        self.log(record);
    }

    /// End any gesture in progress (pointer capture lost, window blur).
    pub fn cancel_gesture(&mut self) {
        let record = self.dispatcher.cancel(&mut self.grid);
        self.log(record);
    }

    pub fn is_dragging(&self) -> bool {
        self.dispatcher.is_dragging()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.dispatcher.is_auto_scrolling()
    }

    /// Drive the auto-scroll timer. Returns true if the grid scrolled.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.dispatcher.tick(&mut self.grid, now_ms)
    }

    pub fn key(&mut self, key: KeyCommand, shift: bool) -> bool {
        self.grid.navigate(key, shift)
    }

    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> bool {
        self.grid.scroll_by(delta_x, delta_y)
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.grid.set_viewport_size(width, height);
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> bool {
        self.grid.frame(renderer)
    }

    pub fn request_redraw(&mut self) {
        self.grid.request_redraw();
    }

    // ------------------------------------------------------------------
    // Text-edit overlay and bulk loading
    // ------------------------------------------------------------------

    pub fn cell_value(&self, row: u32, col: u32) -> &str {
        self.grid.cell_value(row, col)
    }

    pub fn set_cell_value(&mut self, row: u32, col: u32, value: impl Into<String>) -> bool {
        self.grid.set_cell_value(row, col, value)
    }

    pub fn clear_all_cells(&mut self) {
        self.grid.clear_all_cells();
    }

    pub fn active_cell_rect(&self) -> Option<CellRect> {
        self.grid.active_cell_rect()
    }

    pub fn ensure_visible(&mut self, row: u32, col: u32) -> bool {
        self.grid.ensure_visible(row, col)
    }

    pub fn copy_selection(&self) -> Option<String> {
        self.grid.selection_to_tsv()
    }

    /// Returns true if any cell was cleared.
    pub fn clear_selected_cells(&mut self) -> bool {
        let record = self.grid.clear_selected_cells();
        let cleared = record.is_some();
        self.log(record);
        cleared
    }

    // ------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------

    /// # Errors
    /// See [`Grid::insert_row`].
    pub fn insert_row(&mut self, row: u32) -> Result<()> {
        self.structural_edit(|grid| grid.insert_track(Axis::Row, row))
    }

    /// # Errors
    /// See [`Grid::remove_row`].
    pub fn remove_row(&mut self, row: u32) -> Result<()> {
        self.structural_edit(|grid| grid.remove_track(Axis::Row, row))
    }

    /// # Errors
    /// See [`Grid::insert_column`].
    pub fn insert_column(&mut self, col: u32) -> Result<()> {
        self.structural_edit(|grid| grid.insert_track(Axis::Column, col))
    }

    /// # Errors
    /// See [`Grid::remove_column`].
    pub fn remove_column(&mut self, col: u32) -> Result<()> {
        self.structural_edit(|grid| grid.remove_track(Axis::Column, col))
    }

    /// Indices shift under an in-flight drag, so the gesture ends first.
    fn structural_edit(
        &mut self,
        edit: impl FnOnce(&mut Grid) -> Result<ActionRecord>,
    ) -> Result<()> {
        self.cancel_gesture();
        let record = edit(&mut self.grid)?;
        self.log(Some(record));
        Ok(())
    }
}

impl std::fmt::Debug for GridWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridWidget")
            .field("grid", &self.grid)
            .field("dispatcher", &self.dispatcher)
            .field("logger", &self.logger.is_some())
            .finish()
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
    use crate::types::ActionType;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn widget_with_log() -> (GridWidget, Rc<RefCell<Vec<ActionRecord>>>) {
        let mut widget = GridWidget::new(GridConfig::with_size(101, 27)).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        widget.set_logger(Box::new(Rc::clone(&log)));
        (widget, log)
    }

    #[test]
    fn test_resize_gesture_is_logged() {
        let (mut widget, log) = widget_with_log();
        assert!(widget.pointer_down(PointerEvent::new(130.0, 10.0)));
        widget.pointer_move(PointerEvent::new(186.0, 10.0), 0.0);
        widget.pointer_up(PointerEvent::new(186.0, 10.0));

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log.first().unwrap().action, ActionType::ResizeColumn);
        assert_eq!(widget.grid().dims().width_of(1), Some(136.0));
    }

    #[test]
    fn test_structural_edits_are_logged() {
        let (mut widget, log) = widget_with_log();
        widget.set_cell_value(5, 3, "X");
        widget.insert_row(2).unwrap();
        widget.remove_column(1).unwrap();
        assert!(widget.insert_row(0).is_err());

        let actions: Vec<ActionType> = log.borrow().iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![ActionType::InsertRow, ActionType::RemoveColumn]);
        assert_eq!(widget.cell_value(6, 2), "X");
    }

    #[test]
    fn test_structural_edit_ends_drag() {
        let (mut widget, _log) = widget_with_log();
        widget.pointer_down(PointerEvent::new(140.0, 50.0));
        widget.pointer_move(PointerEvent::new(300.0, 700.0), 0.0);
        assert!(widget.is_auto_scrolling());
        widget.insert_row(1).unwrap();
        assert!(!widget.is_dragging());
        assert!(!widget.is_auto_scrolling());
    }

    #[test]
    fn test_clear_selected_cells_is_logged() {
        let (mut widget, log) = widget_with_log();
        widget.set_cell_value(2, 2, "a");
        widget.pointer_down(PointerEvent::new(140.0, 50.0));
        widget.pointer_up(PointerEvent::new(140.0, 50.0));
        assert_eq!(widget.copy_selection().as_deref(), Some("a"));
        assert!(widget.clear_selected_cells());
        assert!(!widget.clear_selected_cells());
        assert_eq!(log.borrow().len(), 1);
    }
}
