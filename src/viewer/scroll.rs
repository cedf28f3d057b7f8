//! Auto-scroll interval for `GridView`.
//!
//! While a selection drag sits outside the data area the view runs a `setInterval`
//! timer that ticks the widget. The timer is cleared as soon as the widget stops
//! auto-scrolling (pointer re-entry, pointer-up, cancelled gesture, dropped view).

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::{now_ms, GridView, SharedState};

#[cfg(target_arch = "wasm32")]
impl GridView {
    /// Match the interval timer to the widget's auto-scroll state.
    pub(crate) fn sync_auto_scroll_timer(state: &Rc<RefCell<SharedState>>) {
        let active = state.borrow().widget.is_auto_scrolling();
        let running = state.borrow().auto_scroll_timer.is_some();
        match (active, running) {
            (true, false) => Self::start_auto_scroll_timer(state),
            (false, true) => Self::stop_auto_scroll_timer(state),
            _ => {}
        }
    }

    fn start_auto_scroll_timer(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if s.auto_scroll_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridView::handle_auto_scroll_tick(&state);
                }
            }) as Box<dyn FnMut()>);
            s.auto_scroll_closure = Some(closure);
        }
        let Some(callback) = s.auto_scroll_closure.as_ref() else {
            return;
        };
        // Interval is a small positive millisecond count
        #[allow(clippy::cast_possible_truncation)]
        let interval = s.widget.dispatcher().auto_scroll().interval_ms().round() as i32;
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval,
        ) {
            Ok(id) => s.auto_scroll_timer = Some(id),
            Err(_) => {
                log::warn!("failed to start auto-scroll interval");
                s.auto_scroll_timer = None;
            }
        }
    }

    pub(crate) fn stop_auto_scroll_timer(state: &Rc<RefCell<SharedState>>) {
        let Some(timer_id) = state.borrow_mut().auto_scroll_timer.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(timer_id);
        }
    }

    fn handle_auto_scroll_tick(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            s.widget.tick(now_ms());
            s.pending_render()
        };
        Self::sync_auto_scroll_timer(state);
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn invoke_render_callback(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}
