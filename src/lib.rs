//! windowgrid - virtualized grid layout engine
//!
//! Sizes a rectangular dataset from its content and renders only the
//! visible window of three scroll-synchronized regions:
//! - Row heights and column widths measured from cell text
//! - Bounded scrollbar reconciliation against width / height / max height
//! - Column header, row header and body windowing with overscan
//! - Optional hover pivot (row / column / cell highlight)
//!
//! # Usage (Rust)
//!
//! ```
//! use windowgrid::{ColumnSpec, FontMetrics, Grid, GridOptions, record};
//!
//! let mut grid = Grid::new(GridOptions::new(300.0), vec![ColumnSpec::new("name")])?
//!     .with_font_metrics(FontMetrics::fixed_advance("16px sans-serif")?)
//!     .with_dataset(vec![record([("name", "apple")])]);
//! let frame = grid.render();
//! assert_eq!(frame.cells.len(), 1);
//! # Ok::<(), windowgrid::GridError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { compute_layout } from 'windowgrid';
//! await init();
//! const { geometry, frame } = compute_layout({ options: { width: 300 }, columns, records });
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod measure;
pub mod pivot;
pub mod render;
pub mod types;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
mod wasm;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use config::{validate_columns, GridDocument, GridOptions, RegionProps};
pub use error::{GridError, Result};
pub use grid::{Grid, GridEvent, PointerTarget};
pub use layout::GeometrySnapshot;
pub use measure::{FontMetrics, FontSpec, TextMeasurer};
pub use pivot::{Highlight, Pivot};
pub use render::{Frame, Visual};
pub use types::*;
pub use viewport::ScrollOffset;
#[cfg(target_arch = "wasm32")]
pub use wasm::WasmGrid;

/// Geometry and frame of one pass over a [`GridDocument`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOutput {
    pub geometry: GeometrySnapshot,
    pub frame: Frame,
}

/// Lay out a document with the given font and render it at `scroll`.
///
/// # Errors
/// Returns [`GridError::Config`] when the options or columns are invalid.
pub fn layout_document(
    doc: GridDocument,
    font: FontMetrics,
    scroll: ScrollOffset,
) -> Result<LayoutOutput> {
    let mut grid = Grid::new(doc.options, doc.columns)?
        .with_font_metrics(font)
        .with_dataset(doc.records);
    grid.layout();
    if scroll != ScrollOffset::ORIGIN {
        grid.handle_event(GridEvent::body_scroll(scroll.left, scroll.top));
        grid.process_events();
    }
    let frame = grid.render();
    let geometry = GeometrySnapshot::clone(grid.geometry());
    Ok(LayoutOutput { geometry, frame })
}

/// Font metrics for a document: canvas measurement in the browser, fixed
/// advance elsewhere.
///
/// # Errors
/// Returns [`GridError::Font`] when the font shorthand cannot be parsed.
pub fn document_font(doc: &GridDocument) -> Result<FontMetrics> {
    let font = match &doc.options.font {
        Some(css) => FontSpec::parse(css)?,
        None => FontSpec::default(),
    };
    platform_metrics(font)
}

#[cfg(target_arch = "wasm32")]
fn platform_metrics(font: FontSpec) -> Result<FontMetrics> {
    let measurer = measure::CanvasTextMeasurer::new(font)?;
    Ok(FontMetrics::new(std::rc::Rc::new(measure::CachedMeasurer::new(
        measurer,
    ))))
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(clippy::unnecessary_wraps)]
fn platform_metrics(font: FontSpec) -> Result<FontMetrics> {
    Ok(FontMetrics::new(std::rc::Rc::new(
        measure::FixedAdvanceMeasurer::new(font),
    )))
}

/// Lay out a grid document given as JSON and return geometry and frame as JSON
///
/// # Errors
/// Returns an error if the document is malformed or invalid.
#[wasm_bindgen]
pub fn compute_layout_json(json: &str) -> std::result::Result<String, JsValue> {
    let doc = GridDocument::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let font = document_font(&doc).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let output = layout_document(doc, font, ScrollOffset::ORIGIN)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&output)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Lay out a grid document passed as a JS object
///
/// # Errors
/// Returns an error if the document is malformed or invalid.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn compute_layout(input: JsValue) -> std::result::Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let doc: GridDocument = serde_wasm_bindgen::from_value(input)?;
    doc.validate()?;
    let font = document_font(&doc)?;
    let output = layout_document(doc, font, ScrollOffset::ORIGIN)?;

    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
