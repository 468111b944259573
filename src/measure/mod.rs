//! Text measurement.
//!
//! The size model only needs one capability from the host: the pixel width
//! of a string under a font. [`TextMeasurer`] is that seam:
//! - [`FixedAdvanceMeasurer`] is deterministic and works headless (CLI, tests)
//! - [`CachedMeasurer`] memoizes any measurer per string
//! - `CanvasTextMeasurer` (wasm32) uses an offscreen Canvas 2D context

mod cache;
#[cfg(target_arch = "wasm32")]
mod canvas;
mod fixed;
mod font;

use std::fmt;
use std::rc::Rc;

pub use cache::CachedMeasurer;
#[cfg(target_arch = "wasm32")]
pub use canvas::{computed_font, CanvasTextMeasurer};
pub use fixed::FixedAdvanceMeasurer;
pub use font::{FontSpec, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT};

/// Line height derived from font size when none is configured.
pub const LINE_HEIGHT_RATIO: f32 = 1.25;

/// Measures the rendered width of text in one font.
pub trait TextMeasurer {
    /// Font this measurer was created for
    fn font(&self) -> &FontSpec;

    /// Width of `text` in CSS pixels
    fn measure_text(&self, text: &str) -> f32;
}

/// A measurer plus the line height used for row sizing.
///
/// Cloning shares the measurer; the size model compares measurers by
/// identity, so a clone counts as the same font context.
#[derive(Clone)]
pub struct FontMetrics {
    measurer: Rc<dyn TextMeasurer>,
    line_height: f32,
}

impl fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMetrics")
            .field("font", self.measurer.font())
            .field("line_height", &self.line_height)
            .finish()
    }
}

impl FontMetrics {
    /// Wrap a measurer; line height is `font size × 1.25`.
    pub fn new(measurer: Rc<dyn TextMeasurer>) -> Self {
        let line_height = measurer.font().size * LINE_HEIGHT_RATIO;
        Self {
            measurer,
            line_height,
        }
    }

    /// Wrap a measurer with an explicit line height.
    pub fn with_line_height(measurer: Rc<dyn TextMeasurer>, line_height: f32) -> Self {
        Self {
            measurer,
            line_height,
        }
    }

    /// Headless metrics for a CSS font shorthand.
    pub fn fixed_advance(css_font: &str) -> crate::error::Result<Self> {
        let font = FontSpec::parse(css_font)?;
        Ok(Self::new(Rc::new(FixedAdvanceMeasurer::new(font))))
    }

    pub fn font(&self) -> &FontSpec {
        self.measurer.font()
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn measure_text(&self, text: &str) -> f32 {
        self.measurer.measure_text(text)
    }

    pub fn measurer(&self) -> &Rc<dyn TextMeasurer> {
        &self.measurer
    }

    /// True when both share the same measurer instance.
    pub fn same_measurer(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.measurer, &other.measurer)
    }
}
