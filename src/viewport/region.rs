//! Variable-size windowed regions.
//!
//! Each axis keeps a lazily grown prefix of item offsets. Offsets are only
//! recomputed after an explicit `reset_after_index`; installing new sizes
//! alone keeps the cached prefix, so callers must signal invalidation.

use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::Serialize;

/// Overscan for one-dimensional lists
pub const DEFAULT_LIST_OVERSCAN: usize = 2;

/// Overscan for each axis of the body grid
pub const DEFAULT_GRID_OVERSCAN: usize = 1;

/// Size assumed for items whose offset has not been measured yet
pub const DEFAULT_ESTIMATED_ITEM_SIZE: f32 = 50.0;

/// Scroll direction of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Scroll position of a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollOffset {
    pub left: f32,
    pub top: f32,
}

impl ScrollOffset {
    pub const ORIGIN: Self = Self {
        left: 0.0,
        top: 0.0,
    };

    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Where an item sits inside its region's scrollable content
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRegion {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
struct ItemMetadata {
    offset: f32,
    size: f32,
}

impl ItemMetadata {
    fn end(self) -> f32 {
        self.offset + self.size
    }
}

fn sanitize_offset(offset: f32) -> f32 {
    if offset.is_finite() {
        offset.max(0.0)
    } else {
        0.0
    }
}

/// Offsets along one axis.
#[derive(Debug, Clone)]
struct AxisCache {
    sizes: Arc<[f32]>,
    measured: Vec<ItemMetadata>,
    estimated_item_size: f32,
}

impl AxisCache {
    fn new(sizes: Arc<[f32]>) -> Self {
        Self {
            sizes,
            measured: Vec::new(),
            estimated_item_size: DEFAULT_ESTIMATED_ITEM_SIZE,
        }
    }

    fn item_count(&self) -> usize {
        self.sizes.len()
    }

    fn set_sizes(&mut self, sizes: Arc<[f32]>) {
        self.measured.truncate(sizes.len());
        self.sizes = sizes;
    }

    fn reset_after_index(&mut self, index: usize) {
        self.measured.truncate(index);
    }

    fn measured_count(&self) -> usize {
        self.measured.len()
    }

    fn measured_end(&self) -> f32 {
        self.measured.last().map_or(0.0, |m| m.end())
    }

    /// Grow the measured prefix up to and including `index`.
    fn measure_through(&mut self, index: usize) {
        let last = index.min(self.item_count().saturating_sub(1));
        while self.measured.len() <= last && self.measured.len() < self.item_count() {
            let next = self.measured.len();
            let size = self.sizes.get(next).copied().unwrap_or(0.0).max(0.0);
            let offset = self.measured_end();
            self.measured.push(ItemMetadata { offset, size });
        }
    }

    fn metadata(&mut self, index: usize) -> Option<ItemMetadata> {
        if index >= self.item_count() {
            return None;
        }
        self.measure_through(index);
        self.measured.get(index).copied()
    }

    /// Index of the item containing `offset` (the last item when past the end).
    fn index_at(&mut self, offset: f32) -> Option<usize> {
        let count = self.item_count();
        if count == 0 {
            return None;
        }
        while self.measured_end() <= offset && self.measured.len() < count {
            let next = self.measured.len();
            self.measure_through(next);
        }
        let first_at_or_after = self.measured.partition_point(|m| m.offset < offset);
        let index = match self.measured.get(first_at_or_after) {
            Some(m) if m.offset <= offset => first_at_or_after,
            _ => first_at_or_after.saturating_sub(1),
        };
        Some(index.min(count - 1))
    }

    fn total_size(&self) -> f32 {
        let unmeasured = self.item_count().saturating_sub(self.measured.len());
        let mut total = self.measured_end();
        for _ in 0..unmeasured {
            total += self.estimated_item_size;
        }
        total
    }

    /// Visible items for a viewport `[offset, offset + extent)`, plus overscan.
    fn visible_range(
        &mut self,
        offset: f32,
        extent: f32,
        overscan: usize,
    ) -> Option<RangeInclusive<usize>> {
        let start = self.index_at(offset)?;
        let last = self.item_count() - 1;
        let max_offset = offset + extent.max(0.0);

        let mut stop = start;
        let mut end = self.metadata(start).map_or(offset, ItemMetadata::end);
        while stop < last && end < max_offset {
            stop += 1;
            end += self.metadata(stop).map_or(0.0, |m| m.size);
        }

        Some(start.saturating_sub(overscan)..=stop.saturating_add(overscan).min(last))
    }
}

/// A one-dimensional windowed list (column header or row header).
#[derive(Debug, Clone)]
pub struct VirtualList {
    axis: Axis,
    cache: AxisCache,
    /// Viewport extent along the scroll axis
    extent: f32,
    /// Viewport extent across the scroll axis
    cross_extent: f32,
    scroll_offset: f32,
    overscan: usize,
}

impl VirtualList {
    pub fn new(axis: Axis, sizes: Arc<[f32]>) -> Self {
        Self {
            axis,
            cache: AxisCache::new(sizes),
            extent: 0.0,
            cross_extent: 0.0,
            scroll_offset: 0.0,
            overscan: DEFAULT_LIST_OVERSCAN,
        }
    }

    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    #[must_use]
    pub fn with_estimated_item_size(mut self, size: f32) -> Self {
        self.cache.estimated_item_size = size.max(0.0);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn item_count(&self) -> usize {
        self.cache.item_count()
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    /// Resize the viewport. `width`/`height` are mapped onto the list axis.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let (extent, cross) = match self.axis {
            Axis::Horizontal => (width, height),
            Axis::Vertical => (height, width),
        };
        self.extent = extent.max(0.0);
        self.cross_extent = cross.max(0.0);
    }

    pub fn viewport_extent(&self) -> f32 {
        self.extent
    }

    /// Replace item sizes. Cached offsets stay until [`Self::reset_after_index`].
    pub fn set_item_sizes(&mut self, sizes: Arc<[f32]>) {
        self.cache.set_sizes(sizes);
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Move the viewport. Negative and non-finite offsets become 0.
    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll_offset = sanitize_offset(offset);
    }

    /// Largest offset that still fills the viewport
    pub fn max_scroll_offset(&self) -> f32 {
        (self.total_size() - self.extent).max(0.0)
    }

    /// Forget cached offsets from `index` onwards.
    pub fn reset_after_index(&mut self, index: usize) {
        self.cache.reset_after_index(index);
    }

    /// Number of items whose offsets are currently cached
    pub fn measured_count(&self) -> usize {
        self.cache.measured_count()
    }

    /// Content size: measured items plus estimates for the rest
    pub fn total_size(&self) -> f32 {
        self.cache.total_size()
    }

    /// Items to render (inclusive), overscan included; `None` when empty.
    pub fn visible_range(&mut self) -> Option<RangeInclusive<usize>> {
        self.cache
            .visible_range(self.scroll_offset, self.extent, self.overscan)
    }

    /// `(offset, size)` of an item along the scroll axis.
    pub fn item_offset(&mut self, index: usize) -> Option<(f32, f32)> {
        self.cache.metadata(index).map(|m| (m.offset, m.size))
    }

    /// Display rectangle of an item inside the list content.
    pub fn item_region(&mut self, index: usize) -> Option<DisplayRegion> {
        let (offset, size) = self.item_offset(index)?;
        Some(match self.axis {
            Axis::Horizontal => DisplayRegion {
                left: offset,
                top: 0.0,
                width: size,
                height: self.cross_extent,
            },
            Axis::Vertical => DisplayRegion {
                left: 0.0,
                top: offset,
                width: self.cross_extent,
                height: size,
            },
        })
    }
}

/// The two-dimensional windowed body.
#[derive(Debug, Clone)]
pub struct VirtualGrid {
    rows: AxisCache,
    columns: AxisCache,
    width: f32,
    height: f32,
    scroll: ScrollOffset,
    overscan_rows: usize,
    overscan_columns: usize,
}

impl VirtualGrid {
    pub fn new(row_sizes: Arc<[f32]>, column_sizes: Arc<[f32]>) -> Self {
        Self {
            rows: AxisCache::new(row_sizes),
            columns: AxisCache::new(column_sizes),
            width: 0.0,
            height: 0.0,
            scroll: ScrollOffset::ORIGIN,
            overscan_rows: DEFAULT_GRID_OVERSCAN,
            overscan_columns: DEFAULT_GRID_OVERSCAN,
        }
    }

    #[must_use]
    pub fn with_overscan(mut self, rows: usize, columns: usize) -> Self {
        self.overscan_rows = rows;
        self.overscan_columns = columns;
        self
    }

    pub fn set_overscan(&mut self, rows: usize, columns: usize) {
        self.overscan_rows = rows;
        self.overscan_columns = columns;
    }

    pub fn row_count(&self) -> usize {
        self.rows.item_count()
    }

    pub fn column_count(&self) -> usize {
        self.columns.item_count()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn set_row_sizes(&mut self, sizes: Arc<[f32]>) {
        self.rows.set_sizes(sizes);
    }

    pub fn set_column_sizes(&mut self, sizes: Arc<[f32]>) {
        self.columns.set_sizes(sizes);
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn scroll_to(&mut self, offset: ScrollOffset) {
        self.scroll = ScrollOffset {
            left: sanitize_offset(offset.left),
            top: sanitize_offset(offset.top),
        };
    }

    pub fn reset_after_row_index(&mut self, index: usize) {
        self.rows.reset_after_index(index);
    }

    pub fn reset_after_column_index(&mut self, index: usize) {
        self.columns.reset_after_index(index);
    }

    pub fn measured_counts(&self) -> (usize, usize) {
        (self.rows.measured_count(), self.columns.measured_count())
    }

    pub fn total_width(&self) -> f32 {
        self.columns.total_size()
    }

    pub fn total_height(&self) -> f32 {
        self.rows.total_size()
    }

    pub fn visible_rows(&mut self) -> Option<RangeInclusive<usize>> {
        self.rows
            .visible_range(self.scroll.top, self.height, self.overscan_rows)
    }

    pub fn visible_columns(&mut self) -> Option<RangeInclusive<usize>> {
        self.columns
            .visible_range(self.scroll.left, self.width, self.overscan_columns)
    }

    /// Visible `(rows, columns)`; `None` when either axis is empty.
    pub fn visible_cells(&mut self) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        let rows = self.visible_rows()?;
        let columns = self.visible_columns()?;
        Some((rows, columns))
    }

    pub fn cell_region(&mut self, row: usize, column: usize) -> Option<DisplayRegion> {
        let r = self.rows.metadata(row)?;
        let c = self.columns.metadata(column)?;
        Some(DisplayRegion {
            left: c.offset,
            top: r.offset,
            width: c.size,
            height: r.size,
        })
    }
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

    fn uniform(count: usize, size: f32) -> Arc<[f32]> {
        Arc::from(vec![size; count])
    }

    fn list(count: usize, size: f32, extent: f32) -> VirtualList {
        let mut list = VirtualList::new(Axis::Vertical, uniform(count, size)).with_overscan(0);
        list.set_viewport(100.0, extent);
        list
    }

    #[test]
    fn test_visible_range_at_origin() {
        let mut l = list(100, 20.0, 100.0);
        assert_eq!(l.visible_range(), Some(0..=4));
    }

    #[test]
    fn test_visible_range_after_scroll() {
        let mut l = list(100, 20.0, 100.0);
        l.scroll_to(50.0);
        assert_eq!(l.visible_range(), Some(2..=7));
        l.scroll_to(1e6);
        assert_eq!(l.visible_range(), Some(99..=99));
    }

    #[test]
    fn test_overscan_is_clamped() {
        let mut l = list(10, 20.0, 40.0).with_overscan(3);
        assert_eq!(l.visible_range(), Some(0..=4));
        l.scroll_to(160.0);
        assert_eq!(l.visible_range(), Some(5..=9));
    }

    #[test]
    fn test_empty_list_has_no_range() {
        let mut l = list(0, 20.0, 100.0);
        assert_eq!(l.visible_range(), None);
        assert_eq!(l.item_region(0), None);
    }

    #[test]
    fn test_scroll_to_clamps_negative() {
        let mut l = list(10, 20.0, 40.0);
        l.scroll_to(-5.0);
        assert_eq!(l.scroll_offset(), 0.0);
        l.scroll_to(f32::NAN);
        assert_eq!(l.scroll_offset(), 0.0);
    }

    #[test]
    fn test_offsets_are_cached_until_reset() {
        let mut l = list(5, 10.0, 100.0);
        assert_eq!(l.item_offset(4), Some((40.0, 10.0)));
        assert_eq!(l.measured_count(), 5);

        l.set_item_sizes(uniform(5, 30.0));
        assert_eq!(l.item_offset(4), Some((40.0, 10.0)), "stale until reset");

        l.reset_after_index(2);
        assert_eq!(l.measured_count(), 2);
        assert_eq!(l.item_offset(2), Some((20.0, 30.0)));
        assert_eq!(l.item_offset(4), Some((80.0, 30.0)));

        l.reset_after_index(0);
        assert_eq!(l.item_offset(4), Some((120.0, 30.0)));
    }

    #[test]
    fn test_total_size_estimates_unmeasured() {
        let mut l = list(4, 10.0, 10.0).with_estimated_item_size(25.0);
        assert_eq!(l.total_size(), 100.0);
        l.item_offset(1);
        assert_eq!(l.total_size(), 20.0 + 50.0);
        l.item_offset(3);
        assert_eq!(l.total_size(), 40.0);
        assert_eq!(l.max_scroll_offset(), 30.0);
    }

    #[test]
    fn test_horizontal_item_region() {
        let mut l = VirtualList::new(Axis::Horizontal, Arc::from(vec![10.0, 30.0]));
        l.set_viewport(200.0, 24.0);
        assert_eq!(
            l.item_region(1),
            Some(DisplayRegion {
                left: 10.0,
                top: 0.0,
                width: 30.0,
                height: 24.0
            })
        );
    }

    #[test]
    fn test_grid_visible_cells() {
        let mut g = VirtualGrid::new(uniform(50, 20.0), uniform(20, 50.0)).with_overscan(0, 0);
        g.set_viewport(100.0, 60.0);
        assert_eq!(g.visible_cells(), Some((0..=2, 0..=1)));

        g.scroll_to(ScrollOffset::new(60.0, 30.0));
        assert_eq!(g.visible_cells(), Some((1..=4, 1..=3)));
        assert_eq!(
            g.cell_region(1, 1),
            Some(DisplayRegion {
                left: 50.0,
                top: 20.0,
                width: 50.0,
                height: 20.0
            })
        );
    }

    #[test]
    fn test_grid_without_columns() {
        let mut g = VirtualGrid::new(uniform(5, 20.0), uniform(0, 50.0));
        g.set_viewport(100.0, 100.0);
        assert!(g.visible_rows().is_some());
        assert_eq!(g.visible_cells(), None);
    }

    #[test]
    fn test_zero_sized_items() {
        let mut l = list(3, 0.0, 50.0);
        assert_eq!(l.visible_range(), Some(0..=2));
    }
}
