//! vgrid - virtualized, editable grid engine
//!
//! Presents spreadsheet-scale data (hundreds of thousands of rows, hundreds of
//! columns) in a fixed-size viewport and touches only what is visible:
//! - Sparse cell storage keyed by packed `(row, col)` integers
//! - Independently resizable rows and columns with prefix-sum coordinate mapping
//! - Cell, full-row, full-column and select-all selections
//! - Row/column insertion and removal that remap cells, sizes and selection
//! - Priority-ordered pointer gestures (resize, header select, range select)
//!   with auto-scroll while dragging past the edge
//! - A single dirty flag so a paint happens at most once per display refresh
//!
//! The engine draws nothing itself. Hosts implement [`render::Renderer`] (or, in the
//! browser, paint from the snapshot returned by [`GridView`]).
//!
//! # Usage (Rust)
//!
//! ```
//! use vgrid::{GridConfig, GridWidget, PointerEvent};
//!
//! let mut widget = GridWidget::new(GridConfig::with_size(100_001, 501)).unwrap();
//! widget.set_cell_value(5, 3, "X");
//! widget.insert_row(2).unwrap();
//! assert_eq!(widget.cell_value(6, 3), "X");
//!
//! widget.pointer_down(PointerEvent::new(140.0, 50.0));
//! widget.pointer_up(PointerEvent::new(140.0, 50.0));
//! assert!(widget.grid().selection().contains(2, 2));
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'vgrid';
//! await init();
//! const view = new GridView(100001, 501, canvas.width, canvas.height);
//! view.set_render_callback(() => requestAnimationFrame(() => paint(view.frame())));
//! canvas.onpointermove = (e) => { canvas.style.cursor = view.on_pointer_move(e.offsetX, e.offsetY); };
//! ```

pub mod cell_ref;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod store;
pub mod types;
pub mod viewer;
pub mod widget;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use grid::Grid;
pub use interaction::{Dispatcher, GestureHandler};
pub use layout::{CellRect, VisibleRange};
pub use render::{Frame, Renderer};
pub use store::CellStore;
pub use viewer::GridView;
pub use widget::GridWidget;

pub use types::*;

/// Default configuration as JSON, for hosts building a `GridView.fromConfig` object.
///
/// # Errors
/// Returns an error if serialization fails.
#[wasm_bindgen]
pub fn default_config_json() -> std::result::Result<String, JsValue> {
    serde_json::to_string(&GridConfig::default())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
