//! Windowed regions and their scroll synchronization.
//!
//! - [`VirtualList`]: column header (horizontal) and row header (vertical)
//! - [`VirtualGrid`]: the body, windowed on both axes
//! - [`ViewportCoordinator`]: body → header offset propagation and cache resets

mod coordinator;
mod region;

pub use coordinator::{RegionOverscan, ViewportCoordinator};
pub use region::{
    Axis, DisplayRegion, ScrollOffset, VirtualGrid, VirtualList, DEFAULT_ESTIMATED_ITEM_SIZE,
    DEFAULT_GRID_OVERSCAN, DEFAULT_LIST_OVERSCAN,
};
