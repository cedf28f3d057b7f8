//! Sparse cell storage.
//!
//! Only populated cells occupy memory: a grid of 100k × 500 with a handful of values
//! holds a handful of entries. Keys pack `(row, col)` into one `u64` so the
//! structural remap never parses strings.

use std::collections::HashMap;

use crate::types::Axis;

/// Packed `(row, col)` key: row in the high 32 bits, column in the low 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(u64);

impl CellKey {
    pub const fn new(row: u32, col: u32) -> Self {
        CellKey(((row as u64) << 32) | col as u64)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn row(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn col(self) -> u32 {
        self.0 as u32
    }

    fn on(self, axis: Axis) -> u32 {
        match axis {
            Axis::Row => self.row(),
            Axis::Column => self.col(),
        }
    }

    fn with(self, axis: Axis, index: u32) -> Self {
        match axis {
            Axis::Row => CellKey::new(index, self.col()),
            Axis::Column => CellKey::new(self.row(), index),
        }
    }
}

/// Key → value map from cell address to content. Absence means empty.
#[derive(Debug, Clone, Default)]
pub struct CellStore {
    cells: HashMap<CellKey, String>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&str> {
        self.cells.get(&CellKey::new(row, col)).map(String::as_str)
    }

    /// Store `value` at `(row, col)`; an empty value removes the entry.
    ///
    /// Returns the previous value, if any.
    pub fn set(&mut self, row: u32, col: u32, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        let key = CellKey::new(row, col);
        if value.is_empty() {
            self.cells.remove(&key)
        } else {
            self.cells.insert(key, value)
        }
    }

    pub fn remove(&mut self, row: u32, col: u32) -> Option<String> {
        self.cells.remove(&CellKey::new(row, col))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Populated cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &str)> {
        self.cells
            .iter()
            .map(|(key, value)| (key.row(), key.col(), value.as_str()))
    }

    /// Remove every entry matching `pred`, returning how many went.
    pub fn remove_where(&mut self, mut pred: impl FnMut(u32, u32) -> bool) -> usize {
        let before = self.cells.len();
        self.cells.retain(|key, _| !pred(key.row(), key.col()));
        before - self.cells.len()
    }

    /// Shift every entry at `index` or beyond one step outward along `axis`.
    ///
    /// Entries are moved in descending order so a not-yet-moved value is never
    /// overwritten by its neighbour.
    pub(crate) fn shift_for_insert(&mut self, axis: Axis, index: u32) {
        let mut keys: Vec<CellKey> = self
            .cells
            .keys()
            .copied()
            .filter(|key| key.on(axis) >= index)
            .collect();
        keys.sort_unstable_by_key(|key| std::cmp::Reverse(key.on(axis)));

        for key in keys {
            if let Some(value) = self.cells.remove(&key) {
                let target = key.with(axis, key.on(axis).saturating_add(1));
                self.cells.insert(target, value);
            }
        }
    }

    /// Drop entries exactly at `index` and shift everything beyond it one step inward.
    ///
    /// Entries are moved in ascending order so each target slot has already been
    /// vacated.
    pub(crate) fn shift_for_remove(&mut self, axis: Axis, index: u32) -> usize {
        let dropped = self.remove_where(|row, col| match axis {
            Axis::Row => row == index,
            Axis::Column => col == index,
        });

        let mut keys: Vec<CellKey> = self
            .cells
            .keys()
            .copied()
            .filter(|key| key.on(axis) > index)
            .collect();
        keys.sort_unstable_by_key(|key| key.on(axis));

        for key in keys {
            if let Some(value) = self.cells.remove(&key) {
                let target = key.with(axis, key.on(axis) - 1);
                self.cells.insert(target, value);
            }
        }
        dropped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_key_packing() {
        let key = CellKey::new(100_000, 500);
        assert_eq!(key.row(), 100_000);
        assert_eq!(key.col(), 500);
        let key = CellKey::new(u32::MAX, u32::MAX);
        assert_eq!((key.row(), key.col()), (u32::MAX, u32::MAX));
    }

    #[test]
    fn test_set_get_and_empty_removes() {
        let mut store = CellStore::new();
        store.set(3, 4, "hello");
        assert_eq!(store.get(3, 4), Some("hello"));
        assert_eq!(store.len(), 1);

        store.set(3, 4, "");
        assert_eq!(store.get(3, 4), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_setting_empty_on_absent_cell_is_noop() {
        let mut store = CellStore::new();
        assert_eq!(store.set(9, 9, String::new()), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_shift_keeps_adjacent_values() {
        let mut store = CellStore::new();
        for col in 1..=5 {
            store.set(1, col, format!("c{col}"));
        }
        store.shift_for_insert(Axis::Column, 2);

        assert_eq!(store.get(1, 1), Some("c1"));
        assert_eq!(store.get(1, 2), None);
        for col in 2..=5 {
            assert_eq!(store.get(1, col + 1), Some(format!("c{col}").as_str()));
        }
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_remove_shift_drops_only_target() {
        let mut store = CellStore::new();
        for row in 1..=5 {
            store.set(row, 2, format!("r{row}"));
        }
        let dropped = store.shift_for_remove(Axis::Row, 3);

        assert_eq!(dropped, 1);
        assert_eq!(store.len(), 4);
        assert_eq!(store.get(1, 2), Some("r1"));
        assert_eq!(store.get(2, 2), Some("r2"));
        assert_eq!(store.get(3, 2), Some("r4"));
        assert_eq!(store.get(4, 2), Some("r5"));
        assert_eq!(store.get(5, 2), None);
    }

    #[test]
    fn test_remove_where_counts() {
        let mut store = CellStore::new();
        store.set(1, 1, "a");
        store.set(2, 2, "b");
        store.set(3, 3, "c");
        assert_eq!(store.remove_where(|row, _| row >= 2), 2);
        assert_eq!(store.len(), 1);
    }
}
