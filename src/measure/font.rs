//! CSS font shorthand parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Browser default when no font has been resolved yet.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// Font descriptor used for measurement: family, pixel size and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    /// Font size in CSS pixels
    pub size: f32,
    pub weight: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size: DEFAULT_FONT_SIZE,
            weight: DEFAULT_FONT_WEIGHT,
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight, self.size, self.family)
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, weight: u16) -> Self {
        Self {
            family: family.into(),
            size,
            weight,
        }
    }

    /// Parse a CSS `font` shorthand such as `"500 11px sans-serif"` or
    /// `"italic bold 12px/30px Georgia, serif"`.
    ///
    /// Style and variant keywords are accepted and ignored. The size token
    /// is required; a `/line-height` suffix is skipped.
    pub fn parse(css: &str) -> Result<Self> {
        let mut rest = css.trim();
        let mut weight = DEFAULT_FONT_WEIGHT;

        loop {
            if rest.is_empty() {
                return Err(GridError::Font(format!("no font size in {css:?}")));
            }
            let (token, after) = match rest.split_once(char::is_whitespace) {
                Some((token, after)) => (token, after.trim_start()),
                None => (rest, ""),
            };

            if let Some(size) = parse_size(token) {
                let family = skip_line_height(after).trim();
                let family = if family.is_empty() {
                    DEFAULT_FONT_FAMILY
                } else {
                    family
                };
                return Ok(Self {
                    family: family.to_string(),
                    size,
                    weight,
                });
            }

            if let Some(w) = parse_weight(token) {
                weight = w;
            }
            rest = after;
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

/// Size token: `12px`, `12px/30px`, `9pt`.
fn parse_size(token: &str) -> Option<f32> {
    let size = token.split('/').next().unwrap_or(token);
    if let Some(px) = size.strip_suffix("px") {
        return px.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0);
    }
    if let Some(pt) = size.strip_suffix("pt") {
        return pt
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v * 4.0 / 3.0);
    }
    None
}

/// Drop a detached `/ 30px` line-height that follows the size token.
fn skip_line_height(after: &str) -> &str {
    match after.strip_prefix('/') {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.split_once(char::is_whitespace)
                .map_or("", |(_, family)| family)
        }
        None => after,
    }
}

fn parse_weight(token: &str) -> Option<u16> {
    match token {
        "normal" => Some(400),
        "bold" | "bolder" => Some(700),
        "lighter" => Some(300),
        _ => token.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight_size_family() {
        let font = FontSpec::parse("500 11px -apple-system, sans-serif").unwrap();
        assert_eq!(font.weight, 500);
        assert_eq!(font.size, 11.0);
        assert_eq!(font.family, "-apple-system, sans-serif");
    }

    #[test]
    fn test_parse_keywords_and_line_height() {
        let font = FontSpec::parse("italic bold 12px/30px Georgia, serif").unwrap();
        assert_eq!(font.weight, 700);
        assert_eq!(font.size, 12.0);
        assert_eq!(font.family, "Georgia, serif");

        let font = FontSpec::parse("14px / 20px \"Segoe UI\"").unwrap();
        assert_eq!(font.size, 14.0);
        assert_eq!(font.family, "\"Segoe UI\"");
    }

    #[test]
    fn test_parse_points_and_missing_family() {
        let font = FontSpec::parse("12pt").unwrap();
        assert_eq!(font.size, 16.0);
        assert_eq!(font.family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_parse_without_size_fails() {
        assert!(matches!(
            FontSpec::parse("bold Arial"),
            Err(GridError::Font(_))
        ));
        assert!(FontSpec::parse("").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let font = FontSpec::new("Arial", 13.0, 600);
        assert_eq!(font.to_css(), "600 13px Arial");
        assert_eq!(FontSpec::parse(&font.to_css()).unwrap(), font);
        assert!(font.is_bold());
    }
}
