//! One axis worth of track sizes with cumulative offsets.
//!
//! Index 0 is the frozen header band; data tracks start at 1. Offsets are kept as a
//! prefix sum (`offsets[i]` = leading edge of track `i`, `offsets[len]` = far edge),
//! so position lookups are a binary search over the full axis regardless of scroll.

/// Sizes and cumulative offsets for one axis.
#[derive(Debug, Clone)]
pub struct Track {
    sizes: Vec<f32>,
    offsets: Vec<f32>,
    min_size: f32,
}

impl Track {
    /// `count` tracks: index 0 sized `header_size`, the rest `default_size`.
    pub fn new(count: u32, header_size: f32, default_size: f32, min_size: f32) -> Self {
        let count = count as usize;
        let mut sizes = Vec::with_capacity(count);
        if count > 0 {
            sizes.push(header_size);
            sizes.resize(count, default_size.max(min_size));
        }
        let mut track = Track {
            sizes,
            offsets: vec![0.0],
            min_size,
        };
        track.rebuild_from(0);
        track
    }

    pub fn len(&self) -> u32 {
        u32::try_from(self.sizes.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    pub fn size_of(&self, index: u32) -> Option<f32> {
        self.sizes.get(index as usize).copied()
    }

    /// Leading edge of `index`; `index == len` yields the far edge of the last track.
    pub fn offset_of(&self, index: u32) -> Option<f32> {
        self.offsets.get(index as usize).copied()
    }

    /// Total extent of the axis, header included.
    pub fn total(&self) -> f32 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// Track whose span `[offset, offset + size)` contains `pos`.
    pub fn index_at(&self, pos: f32) -> Option<u32> {
        if pos.is_nan() || pos < 0.0 || pos >= self.total() {
            return None;
        }
        let count = self.offsets.partition_point(|&offset| offset <= pos);
        u32::try_from(count.checked_sub(1)?).ok()
    }

    /// Set the size of `index`, clamped to the minimum. Returns the applied size.
    pub fn resize(&mut self, index: u32, size: f32) -> Option<f32> {
        let min = self.min_size;
        let slot = self.sizes.get_mut(index as usize)?;
        let applied = size.max(min);
        *slot = applied;
        self.rebuild_from(index as usize);
        Some(applied)
    }

    /// Splice a new track in at `index` (`index == len` appends).
    pub fn insert(&mut self, index: u32, size: f32) -> bool {
        let index = index as usize;
        if index > self.sizes.len() {
            return false;
        }
        self.sizes.insert(index, size.max(self.min_size));
        self.rebuild_from(index);
        true
    }

    /// Remove the track at `index`, returning its size.
    pub fn remove(&mut self, index: u32) -> Option<f32> {
        let index = index as usize;
        if index >= self.sizes.len() {
            return None;
        }
        let size = self.sizes.remove(index);
        self.rebuild_from(index);
        Some(size)
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Recompute offsets for every track at or after `index`.
    fn rebuild_from(&mut self, index: usize) {
        let start = index.min(self.sizes.len());
        self.offsets.truncate(start + 1);
        if self.offsets.is_empty() {
            self.offsets.push(0.0);
        }
        let mut edge = self.offsets.last().copied().unwrap_or(0.0);
        for size in self.sizes.iter().skip(start) {
            edge += size;
            self.offsets.push(edge);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_include_header() {
        let track = Track::new(4, 50.0, 80.0, 24.0);
        assert_eq!(track.len(), 4);
        assert_eq!(track.offset_of(0), Some(0.0));
        assert_eq!(track.offset_of(1), Some(50.0));
        assert_eq!(track.offset_of(3), Some(210.0));
        assert_eq!(track.offset_of(4), Some(290.0));
        assert_eq!(track.offset_of(5), None);
        assert_eq!(track.total(), 290.0);
    }

    #[test]
    fn test_index_at_spans() {
        let track = Track::new(4, 50.0, 80.0, 24.0);
        assert_eq!(track.index_at(0.0), Some(0));
        assert_eq!(track.index_at(49.9), Some(0));
        assert_eq!(track.index_at(50.0), Some(1));
        assert_eq!(track.index_at(289.0), Some(3));
        assert_eq!(track.index_at(290.0), None);
        assert_eq!(track.index_at(-1.0), None);
        assert_eq!(track.index_at(f32::NAN), None);
    }

    #[test]
    fn test_resize_clamps_and_shifts_later_offsets() {
        let mut track = Track::new(5, 50.0, 80.0, 24.0);
        assert_eq!(track.resize(2, 4.0), Some(24.0));
        assert_eq!(track.offset_of(2), Some(130.0));
        assert_eq!(track.offset_of(3), Some(154.0));
        assert_eq!(track.resize(9, 100.0), None);
    }

    #[test]
    fn test_insert_and_remove_splice() {
        let mut track = Track::new(4, 50.0, 80.0, 24.0);
        track.resize(2, 100.0);
        assert!(track.insert(2, 60.0));
        assert_eq!(track.sizes(), &[50.0, 80.0, 60.0, 100.0, 80.0]);
        assert_eq!(track.total(), 370.0);

        assert_eq!(track.remove(2), Some(60.0));
        assert_eq!(track.sizes(), &[50.0, 80.0, 100.0, 80.0]);
        assert_eq!(track.total(), 310.0);

        assert!(track.insert(4, 80.0));
        assert_eq!(track.len(), 5);
        assert!(!track.insert(9, 80.0));
        assert_eq!(track.remove(9), None);
    }
}
