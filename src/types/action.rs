//! Change descriptions emitted by gestures and edits, for an external undo log.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use super::{Axis, CellRange};

/// Kind of change, serialized as the record's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    ResizeColumn,
    ResizeRow,
    InsertRow,
    RemoveRow,
    InsertColumn,
    RemoveColumn,
    ClearCells,
}

/// Payload of an [`ActionRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionDetails {
    /// Track resized from one size to another.
    Resize { index: u32, from: f32, to: f32 },
    /// Row or column inserted/removed at `index`.
    Structural { index: u32 },
    /// Populated cells removed from a range.
    Cleared { range: CellRange, cells: usize },
}

/// `{type, details}` record handed to an [`ActionLogger`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecord {
    #[serde(rename = "type")]
    pub action: ActionType,
    pub details: ActionDetails,
}

impl ActionRecord {
    pub fn resize(axis: Axis, index: u32, from: f32, to: f32) -> Self {
        let action = match axis {
            Axis::Row => ActionType::ResizeRow,
            Axis::Column => ActionType::ResizeColumn,
        };
        Self {
            action,
            details: ActionDetails::Resize { index, from, to },
        }
    }

    pub fn insert(axis: Axis, index: u32) -> Self {
        let action = match axis {
            Axis::Row => ActionType::InsertRow,
            Axis::Column => ActionType::InsertColumn,
        };
        Self {
            action,
            details: ActionDetails::Structural { index },
        }
    }

    pub fn remove(axis: Axis, index: u32) -> Self {
        let action = match axis {
            Axis::Row => ActionType::RemoveRow,
            Axis::Column => ActionType::RemoveColumn,
        };
        Self {
            action,
            details: ActionDetails::Structural { index },
        }
    }

    pub fn cleared(range: CellRange, cells: usize) -> Self {
        Self {
            action: ActionType::ClearCells,
            details: ActionDetails::Cleared { range, cells },
        }
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Sink for action records (undo/redo construction lives outside the engine).
pub trait ActionLogger {
    fn record(&mut self, action: ActionRecord);
}

impl ActionLogger for Vec<ActionRecord> {
    fn record(&mut self, action: ActionRecord) {
        self.push(action);
    }
}

/// Shared logger: the host keeps a handle and reads the log back.
impl<L: ActionLogger> ActionLogger for Rc<RefCell<L>> {
    fn record(&mut self, action: ActionRecord) {
        self.borrow_mut().record(action);
    }
}

/// Logger that forwards records to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogActionLogger;

impl ActionLogger for LogActionLogger {
    fn record(&mut self, action: ActionRecord) {
        match action.to_json() {
            Ok(json) => log::info!(target: "vgrid::actions", "{json}"),
            Err(e) => log::warn!(target: "vgrid::actions", "unserializable action: {e}"),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_record_json_shape() {
        let record = ActionRecord::resize(Axis::Column, 4, 64.0, 120.0);
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "resize-column");
        assert_eq!(value["details"]["index"], 4);
        assert_eq!(value["details"]["from"], 64.0);
        assert_eq!(value["details"]["to"], 120.0);
    }

    #[test]
    fn test_structural_record_json_shape() {
        let record = ActionRecord::insert(Axis::Row, 2);
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "insert-row");
        assert_eq!(value["details"]["index"], 2);
    }

    #[test]
    fn test_vec_logger_collects() {
        let mut log: Vec<ActionRecord> = Vec::new();
        log.record(ActionRecord::remove(Axis::Column, 3));
        assert_eq!(log.len(), 1);
        assert_eq!(log.first().unwrap().action, ActionType::RemoveColumn);
    }

    #[test]
    fn test_shared_logger_is_readable_by_owner() {
        let shared = Rc::new(RefCell::new(Vec::<ActionRecord>::new()));
        let mut sink: Box<dyn ActionLogger> = Box::new(Rc::clone(&shared));
        sink.record(ActionRecord::insert(Axis::Column, 1));
        assert_eq!(shared.borrow().len(), 1);
    }
}
