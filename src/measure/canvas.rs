//! Canvas 2D text measurement (wasm32 only).

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::{FontSpec, TextMeasurer};
use crate::error::{GridError, Result};

/// Measures text with an offscreen canvas context set to one font.
pub struct CanvasTextMeasurer {
    font: FontSpec,
    ctx: CanvasRenderingContext2d,
}

impl CanvasTextMeasurer {
    /// Create a detached canvas and configure its 2D context with `font`.
    pub fn new(font: FontSpec) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GridError::Other("no document available".to_string()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| GridError::Other("failed to create canvas".to_string()))?
            .dyn_into()
            .map_err(|_| GridError::Other("element is not a canvas".to_string()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| GridError::Other("failed to get 2d context".to_string()))?
            .ok_or_else(|| GridError::Other("2d context unavailable".to_string()))?
            .dyn_into()
            .map_err(|_| GridError::Other("context is not 2d".to_string()))?;
        ctx.set_font(&font.to_css());
        Ok(Self { font, ctx })
    }
}

impl TextMeasurer for CanvasTextMeasurer {
    fn font(&self) -> &FontSpec {
        &self.font
    }

    #[allow(clippy::cast_possible_truncation)]
    fn measure_text(&self, text: &str) -> f32 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0) as f32
    }
}

/// Read the computed CSS `font` shorthand of a rendered element.
///
/// Returns `None` until the element is attached and styled.
pub fn computed_font(element: &Element) -> Option<FontSpec> {
    let window = web_sys::window()?;
    let style = window.get_computed_style(element).ok()??;
    let font = style.get_property_value("font").ok()?;
    if font.is_empty() {
        return None;
    }
    FontSpec::parse(&font).ok()
}
