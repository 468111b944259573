//! Render pass output.
//!
//! This module provides:
//! - [`Visual`]: backend-agnostic description of one rendered item
//! - Renderer traits with plain-text defaults, injectable per region
//! - [`Frame`]: the visible headers, cells and footer of one pass

mod frame;
mod renderers;
mod visual;

pub use frame::{CellVisual, Frame, HeaderVisual};
pub use renderers::{
    default_cell, default_column_header, default_row_header, CellContext, CellRenderer,
    ColumnHeaderContext, ColumnHeaderRenderer, FooterContext, FooterRenderer, GridRenderers,
    RowHeaderContext, RowHeaderRenderer,
};
pub use visual::{Overflow, Visual};
