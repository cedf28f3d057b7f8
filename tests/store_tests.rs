//! Sparse store tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use proptest::prelude::*;
use vgrid::CellStore;

#[test]
fn test_set_and_get() {
    let mut store = CellStore::new();
    assert_eq!(store.set(5, 3, "hello"), None);
    assert_eq!(store.get(5, 3), Some("hello"));
    assert_eq!(store.get(3, 5), None);
    assert_eq!(store.set(5, 3, "world"), Some("hello".to_string()));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_setting_empty_removes_entry() {
    let mut store = CellStore::new();
    store.set(1, 1, "a");
    store.set(1, 2, "b");
    assert_eq!(store.len(), 2);

    store.set(1, 1, "");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(1, 1), None);

    // Clearing an already-empty cell is a no-op
    store.set(9, 9, "");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_extreme_indices_do_not_collide() {
    let mut store = CellStore::new();
    store.set(u32::MAX, 1, "bottom");
    store.set(1, u32::MAX, "right");
    assert_eq!(store.get(u32::MAX, 1), Some("bottom"));
    assert_eq!(store.get(1, u32::MAX), Some("right"));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_remove_where() {
    let mut store = CellStore::new();
    for row in 1..=10 {
        store.set(row, 1, "x");
        store.set(row, 2, "y");
    }
    assert_eq!(store.remove_where(|row, _| row % 2 == 0), 10);
    assert_eq!(store.len(), 10);
    assert!(store.iter().all(|(row, _, _)| row % 2 == 1));
}

proptest! {
    #[test]
    fn prop_len_counts_non_empty_values(
        writes in prop::collection::vec((1u32..20, 1u32..20, "[a-c]{0,2}"), 0..100),
    ) {
        let mut store = CellStore::new();
        let mut model = std::collections::HashMap::new();
        for (row, col, value) in &writes {
            store.set(*row, *col, value.as_str());
            if value.is_empty() {
                model.remove(&(*row, *col));
            } else {
                model.insert((*row, *col), value.clone());
            }
        }
        prop_assert_eq!(store.len(), model.len());
        for ((row, col), value) in &model {
            prop_assert_eq!(store.get(*row, *col), Some(value.as_str()));
        }
    }
}
