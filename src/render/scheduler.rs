//! Redraw coalescing.
//!
//! Any number of mutations between two display refreshes collapse into one paint:
//! mutators set the dirty flag, the refresh tick consumes it.

/// Single dirty flag plus counters for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    dirty: bool,
    requests: u64,
    frames: u64,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the next tick as needing a paint.
    pub fn request(&mut self) {
        self.dirty = true;
        self.requests += 1;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag. Returns true exactly once per batch of requests.
    pub fn take(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.frames += 1;
        true
    }

    /// Redraw requests received so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Frames handed to the renderer so far.
    pub fn frames_painted(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce_into_one_frame() {
        let mut scheduler = RenderScheduler::new();
        for _ in 0..40 {
            scheduler.request();
        }
        assert!(scheduler.take());
        assert!(!scheduler.take());
        assert_eq!(scheduler.requests(), 40);
        assert_eq!(scheduler.frames_painted(), 1);
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut scheduler = RenderScheduler::new();
        assert!(!scheduler.is_dirty());
        assert!(!scheduler.take());
        assert_eq!(scheduler.frames_painted(), 0);
    }
}
