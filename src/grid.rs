//! Grid state: the one object every component reads from and mutates.
//!
//! `Grid` owns the sparse cell store, the dimension table, the viewport, the
//! selection and the render scheduler. Mutators request a redraw only when state
//! actually changed, so a drag that stays inside one cell does not repaint.

use crate::config::GridConfig;
use crate::error::Result;
use crate::layout::{CellRect, DimensionTable, Viewport, VisibleRange};
use crate::render::{Frame, RenderScheduler, Renderer};
use crate::store::CellStore;
use crate::types::{last_data_index, CellPos, Selection, SelectionKind};

/// Editable, virtualized grid state.
#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) config: GridConfig,
    pub(crate) cells: CellStore,
    pub(crate) dims: DimensionTable,
    pub(crate) viewport: Viewport,
    pub(crate) selection: Selection,
    pub(crate) scheduler: RenderScheduler,
}

impl Grid {
    /// Build a grid from a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let dims = DimensionTable::new(&config);
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let mut scheduler = RenderScheduler::new();
        scheduler.request();
        Ok(Self {
            config,
            cells: CellStore::new(),
            dims,
            viewport,
            selection: Selection::new(),
            scheduler,
        })
    }

    /// Default-configured grid with the given logical extent (header included).
    ///
    /// # Errors
    /// Returns an error if the extent leaves no data row or column.
    pub fn with_size(rows: u32, cols: u32) -> Result<Self> {
        Self::new(GridConfig::with_size(rows, cols))
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cells(&self) -> &CellStore {
        &self.cells
    }

    pub fn dims(&self) -> &DimensionTable {
        &self.dims
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Logical row count, header row included.
    pub fn row_count(&self) -> u32 {
        self.dims.row_count()
    }

    /// Logical column count, header column included.
    pub fn col_count(&self) -> u32 {
        self.dims.col_count()
    }

    pub fn last_row(&self) -> u32 {
        last_data_index(self.row_count())
    }

    pub fn last_col(&self) -> u32 {
        last_data_index(self.col_count())
    }

    // ------------------------------------------------------------------
    // Cell values
    // ------------------------------------------------------------------

    /// Value at `(row, col)`; empty string when nothing is stored.
    pub fn cell_value(&self, row: u32, col: u32) -> &str {
        self.cells.get(row, col).unwrap_or("")
    }

    /// Store a value; an empty value clears the cell. Returns true if it changed.
    pub fn set_cell_value(&mut self, row: u32, col: u32, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.cell_value(row, col) == value {
            return false;
        }
        self.cells.set(row, col, value);
        self.request_redraw();
        true
    }

    /// Drop every stored value (bulk loaders call this before repopulating).
    pub fn clear_all_cells(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        log::debug!("clearing {} populated cells", self.cells.len());
        self.cells.clear();
        self.request_redraw();
    }

    // ------------------------------------------------------------------
    // Track sizes
    // ------------------------------------------------------------------

    /// Resize a column (clamped to the minimum). Returns the applied width.
    pub fn resize_column(&mut self, col: u32, width: f32) -> Option<f32> {
        let before = self.dims.width_of(col)?;
        let applied = self.dims.resize_col(col, width)?;
        if (applied - before).abs() > f32::EPSILON {
            self.viewport.clamp_scroll(&self.dims);
            self.request_redraw();
        }
        Some(applied)
    }

    /// Resize a row (clamped to the minimum). Returns the applied height.
    pub fn resize_row(&mut self, row: u32, height: f32) -> Option<f32> {
        let before = self.dims.height_of(row)?;
        let applied = self.dims.resize_row(row, height)?;
        if (applied - before).abs() > f32::EPSILON {
            self.viewport.clamp_scroll(&self.dims);
            self.request_redraw();
        }
        Some(applied)
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> bool {
        let changed = self.viewport.scroll_by(delta_x, delta_y, &self.dims);
        if changed {
            self.request_redraw();
        }
        changed
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) -> bool {
        let changed = self.viewport.set_scroll(x, y, &self.dims);
        if changed {
            self.request_redraw();
        }
        changed
    }

    pub fn max_scroll(&self) -> (f32, f32) {
        self.viewport.max_scroll(&self.dims)
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height, &self.dims);
        self.request_redraw();
    }

    /// Scroll so the cell at `(row, col)` is fully inside the data area.
    pub fn ensure_visible(&mut self, row: u32, col: u32) -> bool {
        let changed = self.viewport.ensure_visible(row, col, &self.dims);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Rows and columns that must be painted for the current scroll position.
    pub fn visible_range(&self) -> VisibleRange {
        self.viewport.visible_range(&self.dims)
    }

    // ------------------------------------------------------------------
    // Screen mapping
    // ------------------------------------------------------------------

    /// Column under surface x: 0 inside the row-number gutter, `None` off the surface
    /// or past the last column.
    pub fn screen_to_col(&self, x: f32) -> Option<u32> {
        if x.is_nan() || x < 0.0 || x >= self.viewport.width {
            return None;
        }
        if x < self.dims.header_width() {
            return Some(0);
        }
        self.dims.col_at(x + self.viewport.scroll_x)
    }

    /// Row under surface y: 0 inside the column-label band.
    pub fn screen_to_row(&self, y: f32) -> Option<u32> {
        if y.is_nan() || y < 0.0 || y >= self.viewport.height {
            return None;
        }
        if y < self.dims.header_height() {
            return Some(0);
        }
        self.dims.row_at(y + self.viewport.scroll_y)
    }

    /// Data cell under a surface point.
    pub fn hit_cell(&self, x: f32, y: f32) -> Option<CellPos> {
        let row = self.screen_to_row(y)?;
        let col = self.screen_to_col(x)?;
        (row > 0 && col > 0).then_some(CellPos::new(row, col))
    }

    /// Data column nearest to surface x, with the pointer pinned inside the data area.
    ///
    /// Used while dragging: a pointer left of the gutter or past the right edge still
    /// resolves to the first/last visible column.
    pub fn col_at_screen_clamped(&self, x: f32) -> u32 {
        let header = self.dims.header_width();
        let right = (self.viewport.width - 1.0).max(header);
        let x = if x.is_nan() { header } else { x.clamp(header, right) };
        let last = self.last_col();
        self.dims
            .col_at(x + self.viewport.scroll_x)
            .unwrap_or(last)
            .clamp(1, last)
    }

    /// Data row nearest to surface y, with the pointer pinned inside the data area.
    pub fn row_at_screen_clamped(&self, y: f32) -> u32 {
        let header = self.dims.header_height();
        let bottom = (self.viewport.height - 1.0).max(header);
        let y = if y.is_nan() { header } else { y.clamp(header, bottom) };
        let last = self.last_row();
        self.dims
            .row_at(y + self.viewport.scroll_y)
            .unwrap_or(last)
            .clamp(1, last)
    }

    /// Surface x of a column's left edge (the gutter never scrolls).
    pub fn col_screen_x(&self, col: u32) -> Option<f32> {
        let x = self.dims.x_of(col)?;
        Some(if col == 0 { x } else { x - self.viewport.scroll_x })
    }

    /// Surface y of a row's top edge (the label band never scrolls).
    pub fn row_screen_y(&self, row: u32) -> Option<f32> {
        let y = self.dims.y_of(row)?;
        Some(if row == 0 { y } else { y - self.viewport.scroll_y })
    }

    /// Cell bounds in surface coordinates, for placing the text-edit overlay.
    pub fn cell_screen_rect(&self, row: u32, col: u32) -> Option<CellRect> {
        Some(CellRect {
            x: self.col_screen_x(col)?,
            y: self.row_screen_y(row)?,
            width: self.dims.width_of(col)?,
            height: self.dims.height_of(row)?,
        })
    }

    /// Surface rectangle of the active cell.
    pub fn active_cell_rect(&self) -> Option<CellRect> {
        let active = self.selection.active()?;
        self.cell_screen_rect(active.row, active.col)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection_kind(&self) -> Option<SelectionKind> {
        self.selection.kind(self.row_count(), self.col_count())
    }

    pub fn select_cell(&mut self, row: u32, col: u32) -> bool {
        self.update_selection(|sel| sel.select_cell(row, col))
    }

    pub fn start_row_selection(&mut self, row: u32) -> bool {
        let cols = self.col_count();
        self.update_selection(|sel| sel.start_row_selection(row, cols))
    }

    pub fn start_column_selection(&mut self, col: u32) -> bool {
        let rows = self.row_count();
        self.update_selection(|sel| sel.start_column_selection(col, rows))
    }

    pub fn select_all(&mut self) -> bool {
        let (rows, cols) = (self.row_count(), self.col_count());
        self.update_selection(|sel| sel.select_all(rows, cols))
    }

    pub fn extend_selection(&mut self, row: u32, col: u32) -> bool {
        self.update_selection(|sel| sel.extend_to(row, col))
    }

    pub fn move_selection(&mut self, row: u32, col: u32) -> bool {
        self.update_selection(|sel| sel.move_to(row, col))
    }

    pub fn clear_selection(&mut self) -> bool {
        self.update_selection(Selection::clear)
    }

    fn update_selection(&mut self, update: impl FnOnce(&mut Selection)) -> bool {
        let before = self.selection;
        update(&mut self.selection);
        let changed = before != self.selection;
        if changed {
            self.request_redraw();
        }
        changed
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Mark the grid dirty; the next [`Grid::frame`] paints once.
    pub fn request_redraw(&mut self) {
        self.scheduler.request();
    }

    pub fn needs_redraw(&self) -> bool {
        self.scheduler.is_dirty()
    }

    /// Paint one frame if anything changed since the last one.
    ///
    /// Called once per display refresh. Returns true if the renderer was invoked.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> bool {
        if !self.scheduler.take() {
            return false;
        }
        let frame = Frame::new(self);
        log::trace!(
            "paint frame {}: rows {}..={}, cols {}..={}",
            self.scheduler.frames_painted(),
            frame.range().start_row,
            frame.range().end_row,
            frame.range().start_col,
            frame.range().end_col
        );
        renderer.paint(&frame);
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

    fn grid() -> Grid {
        let mut grid = Grid::with_size(1001, 101).unwrap();
        grid.scheduler.take();
        grid
    }

    #[test]
    fn test_new_grid_starts_dirty() {
        let grid = Grid::with_size(10, 10).unwrap();
        assert!(grid.needs_redraw());
    }

    #[test]
    fn test_cell_values_and_redraw() {
        let mut grid = grid();
        assert!(grid.set_cell_value(2, 3, "x"));
        assert!(grid.needs_redraw());
        assert_eq!(grid.cell_value(2, 3), "x");

        grid.scheduler.take();
        assert!(!grid.set_cell_value(2, 3, "x"));
        assert!(!grid.needs_redraw());

        assert!(grid.set_cell_value(2, 3, ""));
        assert_eq!(grid.cell_value(2, 3), "");
        assert!(grid.cells().is_empty());
    }

    #[test]
    fn test_screen_mapping_respects_frozen_headers() {
        let mut grid = grid();
        grid.set_scroll(160.0, 48.0);

        assert_eq!(grid.screen_to_col(10.0), Some(0));
        assert_eq!(grid.screen_to_row(10.0), Some(0));
        // x=50 is the first data pixel; scrolled 160px = two 80px columns.
        assert_eq!(grid.screen_to_col(50.0), Some(3));
        assert_eq!(grid.screen_to_row(24.0), Some(3));
        assert_eq!(grid.hit_cell(10.0, 30.0), None);
        assert_eq!(grid.hit_cell(60.0, 30.0), Some(CellPos::new(3, 3)));
        assert_eq!(grid.screen_to_col(-1.0), None);
        assert_eq!(grid.screen_to_col(800.0), None);
    }

    #[test]
    fn test_clamped_mapping_stays_in_data_extent() {
        let mut grid = Grid::with_size(11, 6).unwrap();
        assert_eq!(grid.col_at_screen_clamped(-500.0), 1);
        assert_eq!(grid.col_at_screen_clamped(5_000.0), 5);
        assert_eq!(grid.row_at_screen_clamped(5_000.0), 10);
        grid.set_viewport_size(200.0, 100.0);
        assert_eq!(grid.row_at_screen_clamped(-3.0), 1);
    }

    #[test]
    fn test_cell_screen_rect_follows_scroll() {
        let mut grid = grid();
        let before = grid.cell_screen_rect(5, 5).unwrap();
        grid.scroll_by(80.0, 24.0);
        let after = grid.cell_screen_rect(5, 5).unwrap();
        assert_eq!(after.x, before.x - 80.0);
        assert_eq!(after.y, before.y - 24.0);
        // Header cells stay put.
        assert_eq!(grid.cell_screen_rect(0, 5).unwrap().y, 0.0);
        assert_eq!(grid.cell_screen_rect(5, 0).unwrap().x, 0.0);
    }

    #[test]
    fn test_selection_changes_request_redraw_once() {
        let mut grid = grid();
        assert!(grid.select_cell(3, 3));
        assert!(grid.needs_redraw());
        grid.scheduler.take();

        assert!(!grid.extend_selection(3, 3));
        assert!(!grid.needs_redraw());
        assert!(grid.extend_selection(4, 4));
        assert!(grid.needs_redraw());
    }

    #[test]
    fn test_resize_column_reports_applied_width() {
        let mut grid = grid();
        assert_eq!(grid.resize_column(4, 2.0), Some(24.0));
        assert_eq!(grid.resize_column(400, 90.0), None);
        assert!(grid.needs_redraw());
    }

    #[test]
    fn test_clear_all_cells() {
        let mut grid = grid();
        grid.set_cell_value(1, 1, "a");
        grid.set_cell_value(9, 9, "b");
        grid.clear_all_cells();
        assert!(grid.cells().is_empty());
        assert_eq!(grid.cell_value(9, 9), "");
    }
}
