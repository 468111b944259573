//! Layout engine: content sizing, scrollbar reconciliation and geometry.
//!
//! This module handles:
//! - Measuring cells into row heights and column widths (memoized)
//! - Deciding container size and scrollbar presence under caps
//! - Assembling the per-pass geometry snapshot for the three regions

mod geometry;
mod scrollbars;
mod sizes;

pub use geometry::{GeometryInput, GeometrySnapshot, RegionRect};
pub use scrollbars::{
    platform_scrollbar_size, reconcile, Reconciled, ScrollbarInput, DEFAULT_SCROLLBAR_SIZE,
};
pub use sizes::{
    cell_size, compute_sizes, CellSize, SizeModel, SizeOptions, Sizes, PROSE_WORD_THRESHOLD,
};
