//! The grid: one dataset, its columns and the three windowed regions.
//!
//! A [`Grid`] sequences each pass:
//! - size every cell and reduce to row heights and column widths
//! - reconcile content size against the container to place scrollbars
//! - publish a new [`GeometrySnapshot`] and install it in the regions
//! - render the visible headers, cells and footer into a [`Frame`]
//!
//! Host input goes through [`Grid::handle_event`]. Events are queued and
//! drained in order; anything that needs a new layout only raises a flag
//! for the next pass.

mod events;
mod pass;

use std::collections::VecDeque;
use std::sync::Arc;

pub use events::{GridEvent, PointerTarget};

use crate::config::{validate_columns, GridOptions};
use crate::error::Result;
use crate::layout::{platform_scrollbar_size, GeometryInput, GeometrySnapshot, SizeModel, Sizes};
use crate::measure::FontMetrics;
use crate::pivot::{Pivot, PivotTracker};
use crate::render::GridRenderers;
use crate::types::{ColumnSpec, Dataset, Record};
use crate::viewport::{ScrollOffset, ViewportCoordinator};

/// What the previous layout pass was computed from
#[derive(Debug, Default)]
struct LastPass {
    dataset: Option<Dataset>,
    columns: Option<Arc<[ColumnSpec]>>,
    sizes: Option<Arc<Sizes>>,
    footer_height: Option<f32>,
}

/// A virtualized grid instance.
pub struct Grid {
    options: GridOptions,
    columns: Arc<[ColumnSpec]>,
    dataset: Dataset,
    font: Option<FontMetrics>,
    size_model: SizeModel,
    viewport: ViewportCoordinator,
    pivot: PivotTracker,
    renderers: GridRenderers,
    geometry: Arc<GeometrySnapshot>,
    last: LastPass,
    events: VecDeque<GridEvent>,
    needs_layout: bool,
    needs_render: bool,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns.len())
            .field("records", &self.dataset.len())
            .field("font", &self.font)
            .field("renderers", &self.renderers)
            .field("needs_layout", &self.needs_layout)
            .field("needs_render", &self.needs_render)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create a grid with an empty dataset.
    pub fn new(options: GridOptions, columns: impl Into<Arc<[ColumnSpec]>>) -> Result<Self> {
        options.validate()?;
        let columns = columns.into();
        validate_columns(&columns)?;
        let viewport = ViewportCoordinator::new(options.scroll_to_top_on_new_recordset);
        let pivot = PivotTracker::new(options.enable_pivot);
        Ok(Self {
            options,
            columns,
            dataset: Arc::from(Vec::<Record>::new()),
            font: None,
            size_model: SizeModel::new(),
            viewport,
            pivot,
            renderers: GridRenderers::new(),
            geometry: Arc::new(GeometrySnapshot::default()),
            last: LastPass::default(),
            events: VecDeque::new(),
            needs_layout: true,
            needs_render: true,
        })
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<Dataset>) -> Self {
        self.set_dataset(dataset);
        self
    }

    #[must_use]
    pub fn with_font_metrics(mut self, font: FontMetrics) -> Self {
        self.set_font_metrics(font);
        self
    }

    #[must_use]
    pub fn with_renderers(mut self, renderers: GridRenderers) -> Self {
        self.set_renderers(renderers);
        self
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn columns(&self) -> &Arc<[ColumnSpec]> {
        &self.columns
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn font_metrics(&self) -> Option<&FontMetrics> {
        self.font.as_ref()
    }

    pub fn viewport(&self) -> &ViewportCoordinator {
        &self.viewport
    }

    /// Replace the records. A new `Arc` counts as a new dataset.
    pub fn set_dataset(&mut self, dataset: impl Into<Dataset>) {
        self.dataset = dataset.into();
        self.needs_layout = true;
    }

    /// Replace the columns wholesale.
    pub fn set_columns(&mut self, columns: impl Into<Arc<[ColumnSpec]>>) -> Result<()> {
        let columns = columns.into();
        validate_columns(&columns)?;
        self.columns = columns;
        self.needs_layout = true;
        Ok(())
    }

    /// Install or replace the font context; the next pass measures with it.
    pub fn set_font_metrics(&mut self, font: FontMetrics) {
        tracing::debug!(font = %font.font(), line_height = font.line_height(), "font metrics set");
        self.font = Some(font);
        self.needs_layout = true;
    }

    pub fn set_options(&mut self, options: GridOptions) -> Result<()> {
        options.validate()?;
        self.viewport
            .set_scroll_to_top_on_new_dataset(options.scroll_to_top_on_new_recordset);
        self.pivot.set_enabled(options.enable_pivot);
        self.options = options;
        self.needs_layout = true;
        Ok(())
    }

    pub fn set_renderers(&mut self, renderers: GridRenderers) {
        self.renderers = renderers;
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Configured line height, else the font's, else 0.
    pub fn line_height(&self) -> f32 {
        positive(self.options.line_height)
            .or_else(|| self.font.as_ref().map(FontMetrics::line_height))
            .unwrap_or(0.0)
    }

    /// Configured header height, else the line height.
    pub fn header_height(&self) -> f32 {
        positive(self.options.column_header_height).unwrap_or_else(|| self.line_height())
    }

    pub fn scrollbar_size(&self) -> f32 {
        self.options
            .scrollbar_size
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or_else(platform_scrollbar_size)
    }

    /// Footer row height when a footer renderer is installed.
    fn footer_height(&self) -> Option<f32> {
        self.renderers.has_footer().then(|| {
            self.options
                .footer_height
                .filter(|h| h.is_finite() && *h >= 0.0)
                .unwrap_or_else(|| self.line_height())
        })
    }

    /// The most recently published geometry.
    pub fn geometry(&self) -> &Arc<GeometrySnapshot> {
        &self.geometry
    }

    /// Height of body row `index`; 0 when out of range.
    pub fn row_height(&self, index: usize) -> f32 {
        self.geometry.row_height(index)
    }

    /// Width of column `index`; 0 when out of range.
    pub fn column_width(&self, index: usize) -> f32 {
        self.geometry.column_width(index)
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot.current()
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.viewport.body_scroll_offset()
    }

    /// Run a layout pass and publish its snapshot.
    ///
    /// Without font metrics every cell sizes to zero and the grid stays
    /// flagged for layout until metrics arrive.
    pub fn layout(&mut self) -> Arc<GeometrySnapshot> {
        let line_height = self.line_height();
        let size_options = self.options.size_options(line_height);
        let sizes = self.size_model.compute(
            &self.dataset,
            &self.columns,
            self.font.as_ref(),
            &size_options,
        );

        let footer_height = self.footer_height();
        let input = GeometryInput {
            width: self.options.container_width(),
            height: self.options.height,
            max_height: self.options.max_height,
            row_header_width: self.options.row_header_width,
            header_height: self.header_height(),
            line_height,
            footer_height,
            vertical_padding: self.options.vertical_padding,
            scrollbar_size: self.scrollbar_size(),
        };
        let geometry = Arc::new(GeometrySnapshot::build(&sizes, &input));
        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            width_is_not_enough = geometry.width_is_not_enough,
            height_is_not_enough = geometry.height_is_not_enough,
            "geometry reconciled"
        );

        let dataset_changed = !self
            .last
            .dataset
            .as_ref()
            .is_some_and(|d| Arc::ptr_eq(d, &self.dataset));
        let columns_changed = !self
            .last
            .columns
            .as_ref()
            .is_some_and(|c| Arc::ptr_eq(c, &self.columns));
        let sizes_changed = self.last.sizes.as_ref().map_or(true, |prev| {
            prev.row_heights != sizes.row_heights || prev.column_widths != sizes.column_widths
        }) || self.last.footer_height != footer_height;
        let changed = dataset_changed || columns_changed || sizes_changed;

        self.viewport
            .apply_geometry(&geometry, self.options.overscan(), changed);
        if changed {
            self.viewport.on_layout_changed(dataset_changed);
        }

        self.last = LastPass {
            dataset: Some(Arc::clone(&self.dataset)),
            columns: Some(Arc::clone(&self.columns)),
            sizes: Some(sizes),
            footer_height,
        };
        self.geometry = Arc::clone(&geometry);
        self.needs_layout = self.font.is_none();
        self.needs_render = true;
        geometry
    }

    /// Queue a host event; it takes effect in [`Self::process_events`].
    pub fn handle_event(&mut self, event: GridEvent) {
        self.events.push_back(event);
    }

    /// Apply queued events in arrival order. Returns true when a new
    /// render is needed.
    pub fn process_events(&mut self) -> bool {
        while let Some(event) = self.events.pop_front() {
            self.apply_event(event);
        }
        self.needs_render
    }

    fn apply_event(&mut self, event: GridEvent) {
        match event {
            GridEvent::BodyScroll { left, top } => {
                self.viewport.on_body_scroll(left, top);
                self.needs_render = true;
            }
            GridEvent::PointerEnter { target } => {
                let changed = match target {
                    PointerTarget::Cell { row, column } => self.pivot.enter_cell(row, column),
                    PointerTarget::RowHeader { row } => self.pivot.enter_row_header(row),
                    PointerTarget::ColumnHeader { column } => {
                        self.pivot.enter_column_header(column)
                    }
                };
                self.needs_render |= changed;
            }
            GridEvent::PointerLeave => {
                self.needs_render |= self.pivot.leave();
            }
        }
    }
}

fn positive(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::types::record;

    fn grid() -> Grid {
        Grid::new(
            GridOptions::new(200.0)
                .with_height(100.0)
                .with_scrollbar_size(10.0),
            vec![ColumnSpec::new("a"), ColumnSpec::new("b")],
        )
        .unwrap()
        .with_font_metrics(FontMetrics::fixed_advance("16px sans-serif").unwrap())
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(Grid::new(GridOptions::default(), Vec::<ColumnSpec>::new()).is_err());
        assert!(Grid::new(
            GridOptions::new(10.0),
            vec![ColumnSpec::new("x"), ColumnSpec::new("x")]
        )
        .is_err());
    }

    #[test]
    fn test_line_and_header_height() {
        let g = grid();
        assert_eq!(g.line_height(), 20.0);
        assert_eq!(g.header_height(), 20.0);

        let mut options = g.options().clone();
        options.line_height = Some(30.0);
        options.column_header_height = Some(24.0);
        let mut g = g;
        g.set_options(options).unwrap();
        assert_eq!(g.line_height(), 30.0);
        assert_eq!(g.header_height(), 24.0);
    }

    #[test]
    fn test_no_font_stays_dirty() {
        let mut g = Grid::new(GridOptions::new(100.0), vec![ColumnSpec::new("a")])
            .unwrap()
            .with_dataset(vec![record([("a", "hello")])]);
        let geometry = g.layout();
        assert_eq!(geometry.row_heights, vec![0.0]);
        assert_eq!(geometry.column_widths, vec![0.0]);
        assert_eq!(geometry.header_height, 0.0);
        assert!(g.needs_layout());

        g.set_font_metrics(FontMetrics::fixed_advance("16px sans-serif").unwrap());
        let geometry = g.layout();
        assert!(geometry.column_widths[0] > 0.0);
        assert!(!g.needs_layout());
    }

    #[test]
    fn test_events_drain_in_order() {
        let mut g = grid().with_dataset(vec![record([("a", "x"), ("b", "y")]); 40]);
        g.layout();
        g.handle_event(GridEvent::body_scroll(0.0, 100.0));
        g.handle_event(GridEvent::body_scroll(0.0, 60.0));
        assert_eq!(g.scroll_offset(), ScrollOffset::ORIGIN);
        assert!(g.process_events());
        assert_eq!(g.scroll_offset(), ScrollOffset::new(0.0, 60.0));
    }

    #[test]
    fn test_pivot_disabled_by_default() {
        let mut g = grid();
        g.layout();
        g.handle_event(GridEvent::enter_cell(0, 1));
        g.process_events();
        assert_eq!(g.pivot(), Pivot::NONE);
    }

    #[test]
    fn test_layout_memoizes_sizes() {
        let mut g = grid().with_dataset(vec![record([("a", "x")])]);
        let first = g.layout();
        let second = g.layout();
        assert_eq!(*first, *second);
        assert_eq!(g.size_model.recomputations(), 1);
    }
}
