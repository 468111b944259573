//! Scroll synchronization between the body and its two headers.
//!
//! Offsets flow one way: body → column header (left) and body → row
//! header (top). There is no path from a header back to the body, so a
//! header reacting to its own scroll can never start an oscillation.

use std::sync::Arc;

use super::region::{Axis, ScrollOffset, VirtualGrid, VirtualList};
use crate::layout::GeometrySnapshot;

/// Overscan counts per region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOverscan {
    pub column_header: usize,
    pub row_header: usize,
    pub body_rows: usize,
    pub body_columns: usize,
}

impl Default for RegionOverscan {
    fn default() -> Self {
        Self {
            column_header: super::region::DEFAULT_LIST_OVERSCAN,
            row_header: super::region::DEFAULT_LIST_OVERSCAN,
            body_rows: super::region::DEFAULT_GRID_OVERSCAN,
            body_columns: super::region::DEFAULT_GRID_OVERSCAN,
        }
    }
}

/// Owns the three windowed regions and keeps them in lockstep.
#[derive(Debug, Clone, Default)]
pub struct ViewportCoordinator {
    column_header: Option<VirtualList>,
    row_header: Option<VirtualList>,
    body: Option<VirtualGrid>,
    scroll_to_top_on_new_dataset: bool,
}

impl ViewportCoordinator {
    pub fn new(scroll_to_top_on_new_dataset: bool) -> Self {
        Self {
            scroll_to_top_on_new_dataset,
            ..Self::default()
        }
    }

    pub fn set_scroll_to_top_on_new_dataset(&mut self, enabled: bool) {
        self.scroll_to_top_on_new_dataset = enabled;
    }

    pub fn column_header(&self) -> Option<&VirtualList> {
        self.column_header.as_ref()
    }

    pub fn row_header(&self) -> Option<&VirtualList> {
        self.row_header.as_ref()
    }

    pub fn body(&self) -> Option<&VirtualGrid> {
        self.body.as_ref()
    }

    pub fn column_header_mut(&mut self) -> Option<&mut VirtualList> {
        self.column_header.as_mut()
    }

    pub fn row_header_mut(&mut self) -> Option<&mut VirtualList> {
        self.row_header.as_mut()
    }

    pub fn body_mut(&mut self) -> Option<&mut VirtualGrid> {
        self.body.as_mut()
    }

    pub fn set_column_header(&mut self, region: Option<VirtualList>) {
        self.column_header = region;
    }

    pub fn set_row_header(&mut self, region: Option<VirtualList>) {
        self.row_header = region;
    }

    pub fn set_body(&mut self, region: Option<VirtualGrid>) {
        self.body = region;
    }

    /// Body scroll offset, or the origin when no body is mounted.
    pub fn body_scroll_offset(&self) -> ScrollOffset {
        self.body
            .as_ref()
            .map_or(ScrollOffset::ORIGIN, VirtualGrid::scroll_offset)
    }

    /// The body scrolled: adopt the offset and forward it to both headers.
    pub fn on_body_scroll(&mut self, scroll_left: f32, scroll_top: f32) {
        match self.body.as_mut() {
            Some(body) => body.scroll_to(ScrollOffset::new(scroll_left, scroll_top)),
            None => tracing::warn!("body scroll received before the body region was mounted"),
        }
        let offset = self
            .body
            .as_ref()
            .map_or(ScrollOffset::new(scroll_left, scroll_top), VirtualGrid::scroll_offset);
        self.forward_to_headers(offset);
    }

    fn forward_to_headers(&mut self, offset: ScrollOffset) {
        tracing::trace!(left = offset.left, top = offset.top, "sync headers");
        if let Some(header) = self.column_header.as_mut() {
            header.scroll_to(offset.left);
        }
        match self.row_header.as_mut() {
            Some(header) => header.scroll_to(offset.top),
            None => tracing::trace!("no row header to sync"),
        }
    }

    /// Sizes or dataset changed: drop every size cache from index 0 and,
    /// when enabled and the dataset is new, return the body to the origin.
    pub fn on_layout_changed(&mut self, dataset_changed: bool) {
        let reset_scroll = self.scroll_to_top_on_new_dataset && dataset_changed;
        tracing::debug!(dataset_changed, reset_scroll, "layout changed");

        if let Some(body) = self.body.as_mut() {
            if reset_scroll {
                body.scroll_to(ScrollOffset::ORIGIN);
            }
            body.reset_after_row_index(0);
            body.reset_after_column_index(0);
        }
        if let Some(header) = self.column_header.as_mut() {
            header.reset_after_index(0);
        }
        if let Some(header) = self.row_header.as_mut() {
            header.reset_after_index(0);
        }
        if reset_scroll {
            let offset = self.body_scroll_offset();
            self.forward_to_headers(offset);
        }
    }

    /// Size the regions from a snapshot.
    ///
    /// Regions are created on first use and keep their scroll offsets and
    /// caches afterwards; with `install_sizes` the new size arrays replace
    /// the old ones (callers pair this with [`Self::on_layout_changed`]).
    /// The row header is dropped when the snapshot has none.
    pub fn apply_geometry(
        &mut self,
        geometry: &GeometrySnapshot,
        overscan: RegionOverscan,
        install_sizes: bool,
    ) {
        let column_sizes: Arc<[f32]> = Arc::from(geometry.column_widths.as_slice());
        let row_sizes: Arc<[f32]> = Arc::from(geometry.row_heights.as_slice());
        let body_row_sizes: Arc<[f32]> = Arc::from(geometry.body_row_heights());

        let header = self
            .column_header
            .get_or_insert_with(|| VirtualList::new(Axis::Horizontal, Arc::clone(&column_sizes)));
        if install_sizes {
            header.set_item_sizes(Arc::clone(&column_sizes));
        }
        header.set_overscan(overscan.column_header);
        header.set_viewport(geometry.column_header.width, geometry.column_header.height);

        match geometry.row_header {
            Some(rect) => {
                let header = self
                    .row_header
                    .get_or_insert_with(|| VirtualList::new(Axis::Vertical, Arc::clone(&row_sizes)));
                if install_sizes {
                    header.set_item_sizes(row_sizes);
                }
                header.set_overscan(overscan.row_header);
                header.set_viewport(rect.width, rect.height);
            }
            None => self.row_header = None,
        }

        let body = self.body.get_or_insert_with(|| {
            VirtualGrid::new(Arc::clone(&body_row_sizes), Arc::clone(&column_sizes))
        });
        if install_sizes {
            body.set_row_sizes(body_row_sizes);
            body.set_column_sizes(column_sizes);
        }
        body.set_overscan(overscan.body_rows, overscan.body_columns);
        body.set_viewport(geometry.body.width, geometry.body.height);
    }
}
