//! Data types shared by the grid engine.

mod action;
mod event;
mod selection;

pub use action::*;
pub use event::*;
pub use selection::*;

use serde::{Deserialize, Serialize};

/// One of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// A cell address in grid indices (row 0 / col 0 are the header band).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

impl CellPos {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Index of this position along `axis`.
    pub fn on(self, axis: Axis) -> u32 {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.col,
        }
    }

    pub(crate) fn set_on(&mut self, axis: Axis, index: u32) {
        match axis {
            Axis::Row => self.row = index,
            Axis::Column => self.col = index,
        }
    }
}

impl From<(u32, u32)> for CellPos {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}
