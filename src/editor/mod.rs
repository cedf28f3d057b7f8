//! Editing operations on [`Grid`](crate::grid::Grid).
//!
//! - Structural edits: insert/remove whole rows and columns, remapping the sparse
//!   store, the dimension table and the selection in one step
//! - Keyboard navigation of the selection
//! - Clearing and copying the selected range

mod clipboard;
mod navigation;
mod structure;

pub use clipboard::escape_cell_value;
