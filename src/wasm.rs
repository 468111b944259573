//! JavaScript handle around [`Grid`] for hosts that keep a grid alive
//! across scroll and pointer events.

use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::GridOptions;
use crate::grid::{Grid, GridEvent};
use crate::measure::{computed_font, CachedMeasurer, CanvasTextMeasurer, FontMetrics, FontSpec};
use crate::types::{ColumnSpec, Record};

#[wasm_bindgen]
pub struct WasmGrid {
    grid: Grid,
    render_callback: Option<Function>,
}

#[wasm_bindgen]
impl WasmGrid {
    /// Create a grid from `options` and `columns` (plain JS objects).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue, columns: JsValue) -> Result<WasmGrid, JsValue> {
        console_error_panic_hook::set_once();
        let options: GridOptions = serde_wasm_bindgen::from_value(options)?;
        let columns: Vec<ColumnSpec> = serde_wasm_bindgen::from_value(columns)?;
        let font = options.font.as_deref().map(FontSpec::parse).transpose()?;
        let mut grid = Grid::new(options, columns)?;
        if let Some(font) = font {
            grid.set_font_metrics(canvas_metrics(font)?);
        }
        Ok(Self {
            grid,
            render_callback: None,
        })
    }

    /// Measure with the computed font of `element` (the body's inner element).
    pub fn use_font_of(&mut self, element: &Element) -> Result<(), JsValue> {
        let font = computed_font(element).unwrap_or_default();
        self.grid.set_font_metrics(canvas_metrics(font)?);
        self.notify();
        Ok(())
    }

    pub fn set_records(&mut self, records: JsValue) -> Result<(), JsValue> {
        let records: Vec<Record> = serde_wasm_bindgen::from_value(records)?;
        self.grid.set_dataset(records);
        self.notify();
        Ok(())
    }

    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let columns: Vec<ColumnSpec> = serde_wasm_bindgen::from_value(columns)?;
        self.grid.set_columns(columns)?;
        self.notify();
        Ok(())
    }

    /// Called with no arguments whenever the grid needs a new render.
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.render_callback = callback;
    }

    pub fn on_body_scroll(&mut self, scroll_left: f32, scroll_top: f32) {
        self.dispatch(GridEvent::body_scroll(scroll_left, scroll_top));
    }

    pub fn on_cell_enter(&mut self, row: usize, column: usize) {
        self.dispatch(GridEvent::enter_cell(row, column));
    }

    pub fn on_row_header_enter(&mut self, row: usize) {
        self.dispatch(GridEvent::enter_row_header(row));
    }

    pub fn on_column_header_enter(&mut self, column: usize) {
        self.dispatch(GridEvent::enter_column_header(column));
    }

    pub fn on_pointer_leave(&mut self) {
        self.dispatch(GridEvent::PointerLeave);
    }

    pub fn geometry(&mut self) -> Result<JsValue, JsValue> {
        if self.grid.needs_layout() {
            self.grid.layout();
        }
        Ok(serde_wasm_bindgen::to_value(self.grid.geometry().as_ref())?)
    }

    pub fn render(&mut self) -> Result<JsValue, JsValue> {
        let frame = self.grid.render();
        Ok(serde_wasm_bindgen::to_value(&frame)?)
    }

    pub fn row_height(&self, index: usize) -> f32 {
        self.grid.row_height(index)
    }

    pub fn column_width(&self, index: usize) -> f32 {
        self.grid.column_width(index)
    }
}

impl WasmGrid {
    fn dispatch(&mut self, event: GridEvent) {
        self.grid.handle_event(event);
        if self.grid.process_events() {
            self.notify();
        }
    }

    fn notify(&self) {
        if let Some(callback) = &self.render_callback {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                tracing::warn!(?err, "render callback failed");
            }
        }
    }
}

fn canvas_metrics(font: FontSpec) -> Result<FontMetrics, JsValue> {
    let measurer = CanvasTextMeasurer::new(font)?;
    Ok(FontMetrics::new(Rc::new(CachedMeasurer::new(measurer))))
}
