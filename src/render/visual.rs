use serde::Serialize;

use crate::pivot::Highlight;
use crate::viewport::DisplayRegion;

/// How text that does not fit its region is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Overflow {
    #[default]
    Visible,
    /// Clip and end with an ellipsis
    Ellipsis,
}

/// Description of one rendered header, cell or footer.
///
/// The engine does not draw; the host turns visuals into pixels or DOM.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    pub region: DisplayRegion,
    pub text: String,
    pub overflow: Overflow,
    pub highlight: Highlight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Visual {
    pub fn text(region: DisplayRegion, text: impl Into<String>) -> Self {
        Self {
            region,
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}
