use super::{FontSpec, TextMeasurer};

/// Average glyph advance as a fraction of font size.
pub const DEFAULT_ADVANCE_RATIO: f32 = 0.5;

/// Extra advance for bold weights.
const BOLD_FACTOR: f32 = 1.1;

/// Deterministic measurer: every glyph advances by `size × ratio`,
/// East Asian wide glyphs by twice that.
///
/// Used when no drawing surface exists (CLI, tests, server-side layout).
#[derive(Debug, Clone)]
pub struct FixedAdvanceMeasurer {
    font: FontSpec,
    advance: f32,
}

impl FixedAdvanceMeasurer {
    pub fn new(font: FontSpec) -> Self {
        Self::with_ratio(font, DEFAULT_ADVANCE_RATIO)
    }

    pub fn with_ratio(font: FontSpec, ratio: f32) -> Self {
        let mut advance = font.size * ratio;
        if font.is_bold() {
            advance *= BOLD_FACTOR;
        }
        Self { font, advance }
    }

    /// Advance of a single narrow glyph
    pub fn advance(&self) -> f32 {
        self.advance
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn measure_text(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| {
                if is_wide(c) {
                    self.advance * 2.0
                } else {
                    self.advance
                }
            })
            .sum()
    }
}

fn is_wide(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_and_wide_glyphs() {
        let m = FixedAdvanceMeasurer::new(FontSpec::new("sans-serif", 10.0, 400));
        assert_eq!(m.measure_text(""), 0.0);
        assert_eq!(m.measure_text("abcd"), 20.0);
        assert_eq!(m.measure_text("日本"), 20.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = FixedAdvanceMeasurer::new(FontSpec::new("sans-serif", 10.0, 400));
        let bold = FixedAdvanceMeasurer::new(FontSpec::new("sans-serif", 10.0, 700));
        assert!(bold.measure_text("abc") > regular.measure_text("abc"));
    }
}
