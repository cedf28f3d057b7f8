//! Layout engine for track sizes, coordinate mapping and viewport management.
//!
//! This module handles:
//! - Per-axis track sizes with cumulative offsets (header band at index 0)
//! - Index ↔ pixel mapping over the full grid, independent of scroll
//! - Viewport state (scroll position, visible range)

mod dimensions;
mod mapper;
mod track;
mod viewport;

pub use dimensions::DimensionTable;
pub use mapper::CellRect;
pub use track::Track;
pub use viewport::{Viewport, VisibleRange};
