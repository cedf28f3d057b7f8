//! Input events as seen by the engine, already translated out of the host toolkit.

use serde::{Deserialize, Serialize};

/// Pointer position in surface pixels (origin at the top-left of the grid, headers
/// included) plus the modifier state the gestures care about.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub shift: bool,
}

impl PointerEvent {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, shift: false }
    }

    pub const fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }
}

/// Cursor affordance reported while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    Cell,
    ColResize,
    RowResize,
    RowSelect,
    ColSelect,
    SelectAll,
}

impl Cursor {
    /// CSS `cursor` value for the host surface.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Cell => "cell",
            Cursor::ColResize => "col-resize",
            Cursor::RowResize => "row-resize",
            Cursor::RowSelect => "e-resize",
            Cursor::ColSelect => "s-resize",
            Cursor::SelectAll => "se-resize",
        }
    }
}

/// Navigation keys understood by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Commit and move down (up with Shift).
    Enter,
    /// Commit and move right (left with Shift).
    Tab,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "ArrowUp" => KeyCommand::Up,
            "ArrowDown" => KeyCommand::Down,
            "ArrowLeft" => KeyCommand::Left,
            "ArrowRight" => KeyCommand::Right,
            "Home" => KeyCommand::Home,
            "End" => KeyCommand::End,
            "PageUp" => KeyCommand::PageUp,
            "PageDown" => KeyCommand::PageDown,
            "Enter" => KeyCommand::Enter,
            "Tab" => KeyCommand::Tab,
            _ => return None,
        })
    }
}
