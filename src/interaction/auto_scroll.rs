//! Auto-scroll while a selection drag leaves the data area.
//!
//! The controller only tracks direction and timing. The host calls
//! [`AutoScroll::tick`] on its timer (an interval in the browser, a frame clock
//! elsewhere); each elapsed interval advances the scroll by one step, after which the
//! dispatcher replays the last pointer position so the selection end follows.

use crate::config::GridConfig;
use crate::grid::Grid;
use crate::types::PointerEvent;

/// Upper bound on intervals caught up in one tick after a stalled timer.
const MAX_STEPS_PER_TICK: u8 = 4;

/// Which bounds count as "outside" for a dragging handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollMode {
    /// Cell range: the pointer must stay inside the data area on both axes.
    Range,
    /// Full-row drag: the row-number gutter counts as inside.
    Rows,
    /// Full-column drag: the column-label band counts as inside.
    Columns,
}

/// Outward scroll direction for a pointer, `(0, 0)` when it is inside.
pub fn outside_direction(grid: &Grid, mode: AutoScrollMode, event: &PointerEvent) -> (i8, i8) {
    let viewport = grid.viewport();
    let dims = grid.dims();
    let left = match mode {
        AutoScrollMode::Rows => 0.0,
        AutoScrollMode::Range | AutoScrollMode::Columns => dims.header_width(),
    };
    let top = match mode {
        AutoScrollMode::Columns => 0.0,
        AutoScrollMode::Range | AutoScrollMode::Rows => dims.header_height(),
    };
    (
        edge_direction(event.x, left, viewport.width),
        edge_direction(event.y, top, viewport.height),
    )
}

fn edge_direction(pos: f32, low: f32, high: f32) -> i8 {
    if pos < low {
        -1
    } else if pos >= high {
        1
    } else {
        0
    }
}

/// Timer state for one drag gesture.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    interval_ms: f64,
    step: f32,
    direction: Option<(i8, i8)>,
    last_tick_ms: f64,
    ticks: u64,
}

impl AutoScroll {
    pub fn new(interval_ms: f64, step: f32) -> Self {
        Self {
            interval_ms,
            step,
            direction: None,
            last_tick_ms: 0.0,
            ticks: 0,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.auto_scroll_interval_ms, config.auto_scroll_step)
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    pub fn direction(&self) -> Option<(i8, i8)> {
        self.direction
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Scroll steps applied since the controller was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Re-evaluate against the latest pointer position.
    ///
    /// Starts the controller when the pointer leaves the area, retargets it while it
    /// stays outside and stops it on re-entry. Returns whether it is active.
    pub fn update(
        &mut self,
        grid: &Grid,
        mode: AutoScrollMode,
        event: &PointerEvent,
        now_ms: f64,
    ) -> bool {
        let direction = outside_direction(grid, mode, event);
        if direction == (0, 0) {
            self.stop();
            return false;
        }
        if self.direction.is_none() {
            log::debug!("auto-scroll start {direction:?}");
            self.last_tick_ms = now_ms;
        }
        self.direction = Some(direction);
        true
    }

    pub fn stop(&mut self) {
        if self.direction.take().is_some() {
            log::debug!("auto-scroll stop");
        }
    }

    /// Advance the scroll by one step per elapsed interval.
    ///
    /// Returns true if at least one interval elapsed; the caller then recomputes
    /// the selection end.
    pub fn tick(&mut self, grid: &mut Grid, now_ms: f64) -> bool {
        let Some((dx, dy)) = self.direction else {
            return false;
        };
        let mut steps: u8 = 0;
        while now_ms - self.last_tick_ms >= self.interval_ms && steps < MAX_STEPS_PER_TICK {
            self.last_tick_ms += self.interval_ms;
            steps += 1;
        }
        if steps == 0 {
            return false;
        }
        if now_ms - self.last_tick_ms >= self.interval_ms {
            // Drop the backlog of a stalled timer.
            self.last_tick_ms = now_ms;
        }

        let distance = self.step * f32::from(steps);
        log::trace!("auto-scroll tick: {steps} step(s) toward ({dx}, {dy})");
        grid.scroll_by(f32::from(dx) * distance, f32::from(dy) * distance);
        self.ticks += u64::from(steps);
        true
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
    use test_case::test_case;

    fn grid() -> Grid {
        Grid::with_size(1001, 101).unwrap()
    }

    #[test_case(AutoScrollMode::Range, 400.0, 300.0, (0, 0))]
    #[test_case(AutoScrollMode::Range, 20.0, 300.0, (-1, 0))]
    #[test_case(AutoScrollMode::Range, 900.0, 10.0, (1, -1))]
    #[test_case(AutoScrollMode::Rows, 20.0, 300.0, (0, 0))]
    #[test_case(AutoScrollMode::Rows, 800.0, 300.0, (1, 0))]
    #[test_case(AutoScrollMode::Rows, 20.0, 10.0, (0, -1))]
    #[test_case(AutoScrollMode::Columns, 400.0, 10.0, (0, 0))]
    #[test_case(AutoScrollMode::Columns, 400.0, 650.0, (0, 1))]
    #[test_case(AutoScrollMode::Columns, 20.0, 10.0, (-1, 0))]
    fn test_outside_direction(mode: AutoScrollMode, x: f32, y: f32, expected: (i8, i8)) {
        assert_eq!(outside_direction(&grid(), mode, &PointerEvent::new(x, y)), expected);
    }

    #[test]
    fn test_ticks_only_after_interval() {
        let mut grid = grid();
        let mut auto = AutoScroll::new(50.0, 20.0);
        assert!(auto.update(&grid, AutoScrollMode::Range, &PointerEvent::new(400.0, 700.0), 0.0));

        assert!(!auto.tick(&mut grid, 30.0));
        assert_eq!(grid.viewport().scroll_y, 0.0);
        assert!(auto.tick(&mut grid, 50.0));
        assert_eq!(grid.viewport().scroll_y, 20.0);
        assert!(auto.tick(&mut grid, 150.0));
        assert_eq!(grid.viewport().scroll_y, 60.0);
        assert_eq!(auto.ticks(), 3);
    }

    #[test]
    fn test_stalled_timer_catches_up_bounded() {
        let mut grid = grid();
        let mut auto = AutoScroll::new(50.0, 20.0);
        auto.update(&grid, AutoScrollMode::Range, &PointerEvent::new(900.0, 300.0), 0.0);
        assert!(auto.tick(&mut grid, 10_000.0));
        assert_eq!(grid.viewport().scroll_x, 80.0);
        assert!(!auto.tick(&mut grid, 10_020.0));
        assert!(auto.tick(&mut grid, 10_050.0));
    }

    #[test]
    fn test_reentry_stops() {
        let mut grid = grid();
        let mut auto = AutoScroll::new(50.0, 20.0);
        auto.update(&grid, AutoScrollMode::Range, &PointerEvent::new(900.0, 300.0), 0.0);
        assert!(auto.is_active());
        assert!(!auto.update(&grid, AutoScrollMode::Range, &PointerEvent::new(400.0, 300.0), 10.0));
        assert!(!auto.is_active());
        assert!(!auto.tick(&mut grid, 500.0));
        assert_eq!(grid.viewport().scroll_x, 0.0);
    }

    #[test]
    fn test_scrolling_back_clamps_at_zero() {
        let mut grid = grid();
        let mut auto = AutoScroll::new(50.0, 20.0);
        auto.update(&grid, AutoScrollMode::Range, &PointerEvent::new(10.0, 10.0), 0.0);
        assert!(auto.tick(&mut grid, 50.0));
        assert_eq!(grid.viewport().scroll_x, 0.0);
        assert_eq!(grid.viewport().scroll_y, 0.0);
        assert!(auto.is_active());
    }
}
