//! Pointer gesture dispatch.
//!
//! Handlers are tried in a fixed priority order, most specific hit area first:
//!
//! 1. [`ResizeHandler`] - a few pixels around header borders
//! 2. [`SelectAllHandler`] - the corner where both header bands meet
//! 3. [`HeaderSelectHandler::rows`] - the row-number gutter
//! 4. [`HeaderSelectHandler::columns`] - the column-label band
//! 5. [`RangeSelectHandler`] - any data cell
//!
//! The [`Dispatcher`] has one piece of state, the active handler. While it is set,
//! every pointer move goes to that handler alone, so one gesture never mutates the
//! grid through two handlers.

mod auto_scroll;
mod header_select;
mod range_select;
mod resize;
mod select_all;

pub use auto_scroll::{outside_direction, AutoScroll, AutoScrollMode};
pub use header_select::HeaderSelectHandler;
pub use range_select::RangeSelectHandler;
pub use resize::ResizeHandler;
pub use select_all::SelectAllHandler;

use crate::config::GridConfig;
use crate::grid::Grid;
use crate::types::{ActionRecord, Cursor, PointerEvent};

/// One pointer gesture: a hit area plus a down/drag/up lifecycle.
pub trait GestureHandler {
    /// Stable name, used in logs and by hosts inspecting the active gesture.
    fn name(&self) -> &'static str;

    /// Whether a pointer-down at `event` belongs to this handler.
    fn hit_test(&self, grid: &Grid, event: &PointerEvent) -> bool;

    /// Cursor affordance for the pointer position. Must not mutate anything.
    fn cursor(&self, grid: &Grid, event: &PointerEvent) -> Cursor;

    fn handle_down(&mut self, grid: &mut Grid, event: &PointerEvent);

    fn handle_drag(&mut self, grid: &mut Grid, event: &PointerEvent);

    /// Finish the gesture, optionally describing the change for an action log.
    fn handle_up(&mut self, grid: &mut Grid, event: &PointerEvent) -> Option<ActionRecord>;

    /// Auto-scroll behaviour while dragging; `None` disables it.
    fn auto_scroll(&self) -> Option<AutoScrollMode> {
        None
    }
}

/// Handlers in priority order.
pub fn default_handlers() -> Vec<Box<dyn GestureHandler>> {
    vec![
        Box::new(ResizeHandler::new()),
        Box::new(SelectAllHandler),
        Box::new(HeaderSelectHandler::rows()),
        Box::new(HeaderSelectHandler::columns()),
        Box::new(RangeSelectHandler),
    ]
}

/// Routes pointer events to at most one handler per gesture.
pub struct Dispatcher {
    handlers: Vec<Box<dyn GestureHandler>>,
    active: Option<usize>,
    auto_scroll: AutoScroll,
    last_event: Option<PointerEvent>,
}

impl Dispatcher {
    /// Dispatcher with the standard handler list.
    pub fn new(config: &GridConfig) -> Self {
        Self::with_handlers(default_handlers(), config)
    }

    /// Dispatcher over a custom priority list (first match wins).
    pub fn with_handlers(handlers: Vec<Box<dyn GestureHandler>>, config: &GridConfig) -> Self {
        Self {
            handlers,
            active: None,
            auto_scroll: AutoScroll::from_config(config),
            last_event: None,
        }
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handler_name(&self) -> Option<&'static str> {
        self.active_handler().map(|h| h.name())
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroll.is_active()
    }

    pub fn auto_scroll(&self) -> &AutoScroll {
        &self.auto_scroll
    }

    /// Start a gesture with the first handler whose hit area contains the pointer.
    ///
    /// A gesture still in progress (its pointer-up was lost) is finished first; its
    /// record, if any, is returned.
    pub fn pointer_down(&mut self, grid: &mut Grid, event: PointerEvent) -> Option<ActionRecord> {
        let finished = self.cancel(grid);

        let hit = self.handlers.iter().position(|h| h.hit_test(grid, &event));
        if let Some(index) = hit {
            if let Some(handler) = self.handlers.get_mut(index) {
                log::debug!("gesture start: {}", handler.name());
                handler.handle_down(grid, &event);
                self.active = Some(index);
                self.last_event = Some(event);
            }
        }
        finished
    }

    /// Forward a move to the active handler, or just report the hover cursor.
    pub fn pointer_move(&mut self, grid: &mut Grid, event: PointerEvent, now_ms: f64) -> Cursor {
        let Some(handler) = self.active.and_then(|i| self.handlers.get_mut(i)) else {
            return self.hover_cursor(grid, &event);
        };
        handler.handle_drag(grid, &event);
        match handler.auto_scroll() {
            Some(mode) => {
                self.auto_scroll.update(grid, mode, &event, now_ms);
            }
            None => self.auto_scroll.stop(),
        }
        self.last_event = Some(event);
        handler.cursor(grid, &event)
    }

    /// Finish the active gesture and return to idle.
    pub fn pointer_up(&mut self, grid: &mut Grid, event: PointerEvent) -> Option<ActionRecord> {
        self.auto_scroll.stop();
        self.last_event = None;
        let index = self.active.take()?;
        let handler = self.handlers.get_mut(index)?;
        log::debug!("gesture end: {}", handler.name());
        handler.handle_up(grid, &event)
    }

    /// End the active gesture at the last known pointer position.
    pub fn cancel(&mut self, grid: &mut Grid) -> Option<ActionRecord> {
        let event = self.last_event?;
        self.pointer_up(grid, event)
    }

    /// Drive auto-scroll; on each step the active handler re-resolves the last
    /// pointer position against the new scroll offset. Returns true if it scrolled.
    pub fn tick(&mut self, grid: &mut Grid, now_ms: f64) -> bool {
        if !self.auto_scroll.tick(grid, now_ms) {
            return false;
        }
        let event = self.last_event;
        if let (Some(handler), Some(event)) =
            (self.active.and_then(|i| self.handlers.get_mut(i)), event)
        {
            handler.handle_drag(grid, &event);
        }
        true
    }

    fn active_handler(&self) -> Option<&dyn GestureHandler> {
        self.active
            .and_then(|i| self.handlers.get(i))
            .map(|h| h.as_ref())
    }

    fn hover_cursor(&self, grid: &Grid, event: &PointerEvent) -> Cursor {
        self.handlers
            .iter()
            .find(|h| h.hit_test(grid, event))
            .map_or(Cursor::Default, |h| h.cursor(grid, event))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handler_names())
            .field("active", &self.active_handler_name())
            .field("auto_scroll", &self.auto_scroll)
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
    use crate::types::{ActionType, CellPos, SelectionKind};
    use test_case::test_case;

    fn setup() -> (Grid, Dispatcher) {
        let grid = Grid::with_size(101, 27).unwrap();
        let dispatcher = Dispatcher::new(grid.config());
        (grid, dispatcher)
    }

    #[test]
    fn test_priority_order() {
        let (_, dispatcher) = setup();
        assert_eq!(
            dispatcher.handler_names(),
            vec!["resize", "select-all", "row-select", "column-select", "range-select"]
        );
    }

    #[test_case(130.0, 10.0, "resize")]
    #[test_case(10.0, 48.0, "resize")]
    #[test_case(10.0, 10.0, "select-all")]
    #[test_case(10.0, 110.0, "row-select")]
    #[test_case(100.0, 10.0, "column-select")]
    #[test_case(300.0, 300.0, "range-select")]
    fn test_pointer_down_picks_most_specific(x: f32, y: f32, expected: &str) {
        let (mut grid, mut dispatcher) = setup();
        dispatcher.pointer_down(&mut grid, PointerEvent::new(x, y));
        assert_eq!(dispatcher.active_handler_name(), Some(expected));
    }

    #[test]
    fn test_down_outside_surface_stays_idle() {
        let (mut grid, mut dispatcher) = setup();
        assert_eq!(dispatcher.pointer_down(&mut grid, PointerEvent::new(900.0, 10.0)), None);
        assert!(!dispatcher.is_dragging());
        assert!(grid.selection().is_empty());
    }

    #[test]
    fn test_idle_move_only_reports_cursor() {
        let (mut grid, mut dispatcher) = setup();
        grid.frame(&mut NoopRenderer);
        let cursor = dispatcher.pointer_move(&mut grid, PointerEvent::new(130.0, 10.0), 0.0);
        assert_eq!(cursor, Cursor::ColResize);
        assert_eq!(
            dispatcher.pointer_move(&mut grid, PointerEvent::new(300.0, 300.0), 0.0),
            Cursor::Cell
        );
        assert_eq!(
            dispatcher.pointer_move(&mut grid, PointerEvent::new(900.0, 900.0), 0.0),
            Cursor::Default
        );
        assert!(grid.selection().is_empty());
        assert!(!grid.needs_redraw());
    }

    #[test]
    fn test_resize_gesture_never_selects() {
        let (mut grid, mut dispatcher) = setup();
        dispatcher.pointer_down(&mut grid, PointerEvent::new(130.0, 10.0));
        dispatcher.pointer_move(&mut grid, PointerEvent::new(200.0, 300.0), 0.0);
        let record = dispatcher
            .pointer_up(&mut grid, PointerEvent::new(200.0, 300.0))
            .unwrap();
        assert_eq!(record.action, ActionType::ResizeColumn);
        assert!(grid.selection().is_empty());
        assert!(!dispatcher.is_dragging());
    }

    #[test]
    fn test_range_drag_lifecycle() {
        let (mut grid, mut dispatcher) = setup();
        dispatcher.pointer_down(&mut grid, PointerEvent::new(140.0, 50.0));
        dispatcher.pointer_move(&mut grid, PointerEvent::new(300.0, 110.0), 16.0);
        assert_eq!(dispatcher.pointer_up(&mut grid, PointerEvent::new(300.0, 110.0)), None);
        assert_eq!(grid.selection().anchor(), Some(CellPos::new(2, 2)));
        assert_eq!(grid.selection().end(), Some(CellPos::new(4, 4)));
        assert!(!dispatcher.is_dragging());
    }

    #[test]
    fn test_full_row_drag_auto_scrolls_until_reentry() {
        let (mut grid, mut dispatcher) = setup();
        // Row 4 spans y 96..120; stay clear of its resize borders.
        dispatcher.pointer_down(&mut grid, PointerEvent::new(10.0, 110.0));
        assert_eq!(grid.selection_kind(), Some(SelectionKind::RowRange));

        dispatcher.pointer_move(&mut grid, PointerEvent::new(850.0, 110.0), 0.0);
        assert!(dispatcher.is_auto_scrolling());

        let mut previous = grid.viewport().scroll_x;
        for step in 1..=10 {
            assert!(dispatcher.tick(&mut grid, f64::from(step) * 50.0));
            assert!(grid.viewport().scroll_x > previous);
            previous = grid.viewport().scroll_x;
            assert_eq!(grid.selection().end().unwrap().col, 26);
        }

        dispatcher.pointer_move(&mut grid, PointerEvent::new(400.0, 110.0), 520.0);
        assert!(!dispatcher.is_auto_scrolling());
        assert!(!dispatcher.tick(&mut grid, 1_000.0));
        assert_eq!(grid.viewport().scroll_x, previous);
        assert_eq!(grid.selection().range().unwrap().right, 26);
    }

    #[test]
    fn test_range_auto_scroll_extends_selection() {
        let (mut grid, mut dispatcher) = setup();
        dispatcher.pointer_down(&mut grid, PointerEvent::new(140.0, 50.0));
        dispatcher.pointer_move(&mut grid, PointerEvent::new(300.0, 700.0), 0.0);
        let before = grid.selection().end().unwrap().row;
        for step in 1..=5 {
            dispatcher.tick(&mut grid, f64::from(step) * 50.0);
        }
        assert!(grid.selection().end().unwrap().row > before);
        assert!(grid.selection().is_consistent());
    }

    #[test]
    fn test_pointer_up_stops_auto_scroll() {
        let (mut grid, mut dispatcher) = setup();
        dispatcher.pointer_down(&mut grid, PointerEvent::new(140.0, 50.0));
        dispatcher.pointer_move(&mut grid, PointerEvent::new(300.0, 700.0), 0.0);
        dispatcher.pointer_up(&mut grid, PointerEvent::new(300.0, 700.0));
        assert!(!dispatcher.is_auto_scrolling());
        let scroll = grid.viewport().scroll_y;
        assert!(!dispatcher.tick(&mut grid, 1_000.0));
        assert_eq!(grid.viewport().scroll_y, scroll);
    }

    #[test]
    fn test_lost_pointer_up_is_finished_on_next_down() {
        let (mut grid, mut dispatcher) = setup();
        dispatcher.pointer_down(&mut grid, PointerEvent::new(130.0, 10.0));
        dispatcher.pointer_move(&mut grid, PointerEvent::new(150.0, 10.0), 0.0);
        let record = dispatcher.pointer_down(&mut grid, PointerEvent::new(300.0, 300.0));
        assert_eq!(record.map(|r| r.action), Some(ActionType::ResizeColumn));
        assert_eq!(dispatcher.active_handler_name(), Some("range-select"));
    }

    struct NoopRenderer;

    impl crate::render::Renderer for NoopRenderer {
        fn paint(&mut self, _frame: &crate::render::Frame<'_>) {}
    }
}
