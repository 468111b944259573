use serde::{Deserialize, Serialize};

/// One column of the grid.
///
/// `width`, `height` and `max_height` follow the host convention that a
/// zero value means "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Key into each record; must be unique and non-empty
    #[serde(default)]
    pub id: String,
    /// Header text (falls back to `id`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Explicit column width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Explicit cell height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Cap for wrapped text height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
}

impl ColumnSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Text shown in the column header: the label, or the id when the label is empty.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }

    pub fn explicit_width(&self) -> Option<f32> {
        self.width.filter(|w| *w > 0.0)
    }

    pub fn explicit_height(&self) -> Option<f32> {
        self.height.filter(|h| *h > 0.0)
    }

    pub fn max_height_cap(&self) -> Option<f32> {
        self.max_height.filter(|h| *h > 0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_falls_back_to_id() {
        assert_eq!(ColumnSpec::new("name").display_label(), "name");
        assert_eq!(
            ColumnSpec::new("name").with_label("").display_label(),
            "name"
        );
        assert_eq!(
            ColumnSpec::new("name").with_label("Name").display_label(),
            "Name"
        );
    }

    #[test]
    fn test_zero_dimensions_are_unset() {
        let column = ColumnSpec::new("a").with_width(0.0).with_height(12.0);
        assert_eq!(column.explicit_width(), None);
        assert_eq!(column.explicit_height(), Some(12.0));
        assert_eq!(column.max_height_cap(), None);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let column: ColumnSpec =
            serde_json::from_str(r#"{"id":"notes","label":"Notes","maxHeight":40}"#).unwrap();
        assert_eq!(column.id, "notes");
        assert_eq!(column.max_height_cap(), Some(40.0));
        assert_eq!(column.width, None);
    }

    #[test]
    fn test_missing_id_deserializes_empty() {
        let column: ColumnSpec = serde_json::from_str(r#"{"label":"Orphan"}"#).unwrap();
        assert!(column.id.is_empty());
    }
}
