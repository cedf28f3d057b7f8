//! Structured error types for vgrid.
//!
//! Geometry and selection never fail (they clamp or return `None`); errors are
//! reserved for configuration loading and structural edits that would touch the
//! frozen header band or run past the grid extent.

use crate::types::Axis;

/// All errors that can occur while configuring or editing a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Structural edit aimed at the frozen header index.
    #[error("{axis} {index} is reserved for the header band")]
    ReservedIndex { axis: Axis, index: u32 },

    /// Structural edit past the end of the axis.
    #[error("{axis} {index} is out of range (len {len})")]
    OutOfRange { axis: Axis, index: u32, len: u32 },

    /// Removing the only remaining data row or column.
    #[error("cannot remove the last data {axis}")]
    LastDataIndex { axis: Axis },

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_axis() {
        let err = GridError::ReservedIndex {
            axis: Axis::Column,
            index: 0,
        };
        assert_eq!(err.to_string(), "column 0 is reserved for the header band");

        let err = GridError::OutOfRange {
            axis: Axis::Row,
            index: 12,
            len: 10,
        };
        assert_eq!(err.to_string(), "row 12 is out of range (len 10)");
    }

    #[test]
    fn test_from_str() {
        let err: GridError = "boom".into();
        assert!(matches!(err, GridError::Other(ref s) if s == "boom"));
    }
}
