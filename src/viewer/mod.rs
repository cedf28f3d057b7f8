//! Browser binding.
//!
//! [`GridView`] exposes the widget to JavaScript through primitive-argument methods.
//! The host forwards pointer, wheel and keyboard events and paints from the
//! [`FrameSnapshot`] returned by `frame()`. On wasm32 the view also owns the
//! auto-scroll interval and calls the registered render callback whenever state
//! changed; elsewhere the host drives `tick_at` itself, which also sets the clock
//! that pointer moves are stamped with.

mod scroll;
mod snapshot;

pub use snapshot::{CellSnapshot, FrameSnapshot, SnapshotRenderer};

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;

use crate::config::GridConfig;
use crate::types::{KeyCommand, PointerEvent};
use crate::widget::GridWidget;
#[cfg(target_arch = "wasm32")]
use crate::types::{ActionLogger, ActionRecord};

// Timing helper for the auto-scroll clock.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// State shared between the exported view and its timer closure.
pub(crate) struct SharedState {
    pub widget: GridWidget,
    #[cfg(target_arch = "wasm32")]
    pub render_callback: Option<Function>,
    #[cfg(target_arch = "wasm32")]
    pub auto_scroll_timer: Option<i32>,
    #[cfg(target_arch = "wasm32")]
    pub auto_scroll_closure: Option<Closure<dyn FnMut()>>,
    /// Host clock, advanced by `tick_at`
    #[cfg(not(target_arch = "wasm32"))]
    pub clock_ms: f64,
}

impl SharedState {
    fn new(widget: GridWidget) -> Self {
        Self {
            widget,
            #[cfg(target_arch = "wasm32")]
            render_callback: None,
            #[cfg(target_arch = "wasm32")]
            auto_scroll_timer: None,
            #[cfg(target_arch = "wasm32")]
            auto_scroll_closure: None,
            #[cfg(not(target_arch = "wasm32"))]
            clock_ms: 0.0,
        }
    }

    fn clock_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            now_ms()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.clock_ms
        }
    }

    /// Render callback to invoke once the state borrow is released.
    #[cfg(target_arch = "wasm32")]
    fn pending_render(&self) -> Option<Function> {
        if self.widget.grid().needs_redraw() {
            self.render_callback.clone()
        } else {
            None
        }
    }
}

/// Action log sink that hands each record to a JavaScript function.
#[cfg(target_arch = "wasm32")]
struct JsActionLogger(Function);

#[cfg(target_arch = "wasm32")]
impl ActionLogger for JsActionLogger {
    fn record(&mut self, action: ActionRecord) {
        match serde_wasm_bindgen::to_value(&action) {
            Ok(value) => {
                if self.0.call1(&JsValue::NULL, &value).is_err() {
                    log::warn!("action callback threw");
                }
            }
            Err(e) => log::warn!("failed to serialize action: {e}"),
        }
    }
}

/// The grid view exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    state: Rc<RefCell<SharedState>>,
}

// ============================================================================
// Shared API (all targets)
// ============================================================================

#[wasm_bindgen]
impl GridView {
    /// Logical row count, header row included.
    #[wasm_bindgen]
    pub fn row_count(&self) -> u32 {
        self.state.borrow().widget.grid().row_count()
    }

    /// Logical column count, header column included.
    #[wasm_bindgen]
    pub fn col_count(&self) -> u32 {
        self.state.borrow().widget.grid().col_count()
    }

    #[wasm_bindgen]
    pub fn get_cell_value(&self, row: u32, col: u32) -> String {
        self.state.borrow().widget.cell_value(row, col).to_string()
    }

    #[wasm_bindgen]
    pub fn set_cell_value(&mut self, row: u32, col: u32, value: &str) {
        self.state.borrow_mut().widget.set_cell_value(row, col, value);
        self.after_event();
    }

    /// Bulk loaders call this, then `set_cell_value` repeatedly, then `request_redraw`.
    #[wasm_bindgen]
    pub fn clear_all_cells(&mut self) {
        self.state.borrow_mut().widget.clear_all_cells();
    }

    #[wasm_bindgen]
    pub fn request_redraw(&mut self) {
        self.state.borrow_mut().widget.request_redraw();
        self.after_event();
    }

    #[wasm_bindgen]
    pub fn needs_redraw(&self) -> bool {
        self.state.borrow().widget.grid().needs_redraw()
    }

    /// Scroll by a wheel delta.
    #[wasm_bindgen]
    pub fn scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.state.borrow_mut().widget.scroll_by(delta_x, delta_y);
        self.after_event();
    }

    #[wasm_bindgen]
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.state.borrow_mut().widget.grid_mut().set_scroll(x, y);
        self.after_event();
    }

    #[wasm_bindgen]
    pub fn scroll_x(&self) -> f32 {
        self.state.borrow().widget.grid().viewport().scroll_x
    }

    #[wasm_bindgen]
    pub fn scroll_y(&self) -> f32 {
        self.state.borrow().widget.grid().viewport().scroll_y
    }

    /// Total content width, for sizing an external scrollbar spacer.
    #[wasm_bindgen]
    pub fn content_width(&self) -> f32 {
        self.state.borrow().widget.grid().dims().total_width()
    }

    #[wasm_bindgen]
    pub fn content_height(&self) -> f32 {
        self.state.borrow().widget.grid().dims().total_height()
    }

    /// Resize the drawing surface (logical pixels).
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.borrow_mut().widget.set_viewport_size(width, height);
        self.after_event();
    }

    #[wasm_bindgen]
    pub fn resize_column(&mut self, col: u32, width: f32) -> Option<f32> {
        let applied = self.state.borrow_mut().widget.grid_mut().resize_column(col, width);
        self.after_event();
        applied
    }

    #[wasm_bindgen]
    pub fn resize_row(&mut self, row: u32, height: f32) -> Option<f32> {
        let applied = self.state.borrow_mut().widget.grid_mut().resize_row(row, height);
        self.after_event();
        applied
    }

    /// Returns true if a gesture started.
    #[wasm_bindgen]
    pub fn on_pointer_down(&mut self, x: f32, y: f32, shift: bool) -> bool {
        let started = self
            .state
            .borrow_mut()
            .widget
            .pointer_down(PointerEvent::new(x, y).with_shift(shift));
        self.after_event();
        started
    }

    /// Returns the CSS cursor for the pointer position.
    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> String {
        let cursor = {
            let mut s = self.state.borrow_mut();
            let now = s.clock_ms();
            s.widget.pointer_move(PointerEvent::new(x, y), now)
        };
        self.after_event();
        cursor.css().to_string()
    }

    #[wasm_bindgen]
    pub fn on_pointer_up(&mut self, x: f32, y: f32) {
        self.state.borrow_mut().widget.pointer_up(PointerEvent::new(x, y));
        self.after_event();
    }

    /// Pointer capture lost or window blurred mid-gesture.
    #[wasm_bindgen]
    pub fn cancel_gesture(&mut self) {
        self.state.borrow_mut().widget.cancel_gesture();
        self.after_event();
    }

    #[wasm_bindgen]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().widget.is_dragging()
    }

    #[wasm_bindgen]
    pub fn is_auto_scrolling(&self) -> bool {
        self.state.borrow().widget.is_auto_scrolling()
    }

    /// Handle a `KeyboardEvent.key`. Returns true if the key was consumed.
    #[wasm_bindgen]
    pub fn on_key_down(&mut self, key: &str, shift: bool) -> bool {
        let handled = {
            let mut s = self.state.borrow_mut();
            match key {
                "Delete" | "Backspace" => {
                    s.widget.clear_selected_cells();
                    true
                }
                _ => match KeyCommand::from_key(key) {
                    Some(command) => {
                        s.widget.key(command, shift);
                        true
                    }
                    None => false,
                },
            }
        };
        self.after_event();
        handled
    }

    #[wasm_bindgen]
    pub fn select_all(&mut self) {
        self.state.borrow_mut().widget.grid_mut().select_all();
        self.after_event();
    }

    /// Selected range as `[top, left, bottom, right]`.
    #[wasm_bindgen]
    pub fn get_selection(&self) -> Option<Vec<u32>> {
        let range = self.state.borrow().widget.grid().selection().range()?;
        Some(vec![range.top, range.left, range.bottom, range.right])
    }

    /// Active cell bounds as `[x, y, width, height]`, for placing the edit overlay.
    #[wasm_bindgen]
    pub fn get_active_cell_rect(&self) -> Option<Vec<f32>> {
        let rect = self.state.borrow().widget.active_cell_rect()?;
        Some(vec![rect.x, rect.y, rect.width, rect.height])
    }

    #[wasm_bindgen]
    pub fn ensure_visible(&mut self, row: u32, col: u32) {
        self.state.borrow_mut().widget.ensure_visible(row, col);
        self.after_event();
    }

    /// Selected values as TSV for the clipboard.
    #[wasm_bindgen]
    pub fn copy_selection(&self) -> Option<String> {
        self.state.borrow().widget.copy_selection()
    }

    #[wasm_bindgen]
    pub fn clear_selection_contents(&mut self) -> bool {
        let cleared = self.state.borrow_mut().widget.clear_selected_cells();
        self.after_event();
        cleared
    }
}

impl GridView {
    fn from_widget(widget: GridWidget) -> Self {
        Self {
            state: Rc::new(RefCell::new(SharedState::new(widget))),
        }
    }

    /// Start/stop the auto-scroll timer and request a render if anything changed.
    fn after_event(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            Self::sync_auto_scroll_timer(&self.state);
            let callback = self.state.borrow().pending_render();
            Self::invoke_render_callback(callback);
        }
    }

    fn config_with_surface(rows: u32, cols: u32, width: f32, height: f32) -> GridConfig {
        GridConfig {
            viewport_width: width,
            viewport_height: height,
            ..GridConfig::with_size(rows, cols)
        }
    }
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a view over `rows` x `cols` (header row/column included).
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32, width: f32, height: f32) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let widget = GridWidget::new(Self::config_with_surface(rows, cols, width, height))?;
        Ok(Self::from_widget(widget))
    }

    /// Create a view from a JSON configuration object (missing keys use defaults).
    #[wasm_bindgen(js_name = "fromConfig")]
    pub fn from_config(json: &str) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let widget = GridWidget::new(GridConfig::from_json(json)?)?;
        Ok(Self::from_widget(widget))
    }

    /// Register a JS callback to request a render on the next animation frame.
    #[wasm_bindgen]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Register a JS callback receiving `{type, details}` action records.
    #[wasm_bindgen]
    pub fn set_action_callback(&mut self, callback: Option<Function>) {
        let mut s = self.state.borrow_mut();
        match callback {
            Some(callback) => s.widget.set_logger(Box::new(JsActionLogger(callback))),
            None => {
                s.widget.take_logger();
            }
        }
    }

    #[wasm_bindgen]
    pub fn insert_row(&mut self, row: u32) -> Result<(), JsValue> {
        self.state.borrow_mut().widget.insert_row(row)?;
        self.after_event();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn remove_row(&mut self, row: u32) -> Result<(), JsValue> {
        self.state.borrow_mut().widget.remove_row(row)?;
        self.after_event();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn insert_column(&mut self, col: u32) -> Result<(), JsValue> {
        self.state.borrow_mut().widget.insert_column(col)?;
        self.after_event();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn remove_column(&mut self, col: u32) -> Result<(), JsValue> {
        self.state.borrow_mut().widget.remove_column(col)?;
        self.after_event();
        Ok(())
    }

    /// `{startRow, endRow, startCol, endCol}` for the current scroll position.
    #[wasm_bindgen]
    pub fn visible_range(&self) -> Result<JsValue, JsValue> {
        let range = self.state.borrow().widget.grid().visible_range();
        Ok(serde_wasm_bindgen::to_value(&range)?)
    }

    /// Snapshot for painting, or `null` when nothing changed since the last frame.
    #[wasm_bindgen]
    pub fn frame(&mut self) -> Result<JsValue, JsValue> {
        let mut renderer = SnapshotRenderer::new();
        self.state.borrow_mut().widget.frame(&mut renderer);
        match renderer.take() {
            Some(snapshot) => Ok(serde_wasm_bindgen::to_value(&snapshot)?),
            None => Ok(JsValue::NULL),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for GridView {
    fn drop(&mut self) {
        Self::stop_auto_scroll_timer(&self.state);
    }
}

// ============================================================================
// Non-WASM32 Implementation (for testing)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl GridView {
    /// Create a view (non-wasm version for testing).
    ///
    /// # Errors
    /// Returns an error if the extent leaves no data row or column.
    pub fn new_test(rows: u32, cols: u32, width: f32, height: f32) -> crate::error::Result<Self> {
        let widget = GridWidget::new(Self::config_with_surface(rows, cols, width, height))?;
        Ok(Self::from_widget(widget))
    }

    /// # Errors
    /// Returns an error for malformed JSON or an invalid configuration.
    pub fn from_config(json: &str) -> crate::error::Result<Self> {
        Ok(Self::from_widget(GridWidget::new(GridConfig::from_json(json)?)?))
    }

    /// # Errors
    /// See [`Grid::insert_row`](crate::grid::Grid::insert_row).
    pub fn insert_row(&mut self, row: u32) -> crate::error::Result<()> {
        self.state.borrow_mut().widget.insert_row(row)
    }

    /// # Errors
    /// See [`Grid::remove_row`](crate::grid::Grid::remove_row).
    pub fn remove_row(&mut self, row: u32) -> crate::error::Result<()> {
        self.state.borrow_mut().widget.remove_row(row)
    }

    /// # Errors
    /// See [`Grid::insert_column`](crate::grid::Grid::insert_column).
    pub fn insert_column(&mut self, col: u32) -> crate::error::Result<()> {
        self.state.borrow_mut().widget.insert_column(col)
    }

    /// # Errors
    /// See [`Grid::remove_column`](crate::grid::Grid::remove_column).
    pub fn remove_column(&mut self, col: u32) -> crate::error::Result<()> {
        self.state.borrow_mut().widget.remove_column(col)
    }

    pub fn visible_range(&self) -> crate::layout::VisibleRange {
        self.state.borrow().widget.grid().visible_range()
    }

    pub fn frame(&mut self) -> Option<FrameSnapshot> {
        let mut renderer = SnapshotRenderer::new();
        self.state.borrow_mut().widget.frame(&mut renderer);
        renderer.take()
    }

    /// Drive auto-scroll from the host's clock. Returns true if the grid scrolled.
    pub fn tick_at(&mut self, now_ms: f64) -> bool {
        let mut s = self.state.borrow_mut();
        s.clock_ms = now_ms;
        s.widget.tick(now_ms)
    }
}
