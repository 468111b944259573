//! Grid configuration surface.
//!
//! [`GridOptions`] mirrors the JSON a host passes in (camelCase keys).
//! [`GridDocument`] bundles options, columns and records for file input.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::SizeOptions;
use crate::types::{ColumnSpec, Record};
use crate::viewport::{RegionOverscan, DEFAULT_GRID_OVERSCAN, DEFAULT_LIST_OVERSCAN};

/// Pass-through props of one region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    /// Items rendered beyond the visible range on each side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overscan_count: Option<usize>,
}

/// Options of one grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    /// Container width; required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Container height; derived from content when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
    /// Zero hides the row header
    #[serde(default)]
    pub row_header_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_header_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(default)]
    pub column_horizontal_padding: f32,
    #[serde(default)]
    pub column_vertical_padding: f32,
    /// Added to the derived container height
    #[serde(default)]
    pub vertical_padding: f32,
    /// Height of the footer row, used when a footer renderer is installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_height: Option<f32>,
    #[serde(default)]
    pub scroll_to_top_on_new_recordset: bool,
    #[serde(default)]
    pub enable_pivot: bool,
    /// Platform scrollbar thickness when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrollbar_size: Option<f32>,
    /// CSS font shorthand, e.g. `"500 11px sans-serif"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default)]
    pub column_header_props: RegionProps,
    #[serde(default)]
    pub row_header_props: RegionProps,
    #[serde(default)]
    pub body_props: RegionProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

impl GridOptions {
    pub fn new(width: f32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
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

    #[must_use]
    pub fn with_row_header_width(mut self, width: f32) -> Self {
        self.row_header_width = width;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, horizontal: f32, vertical: f32) -> Self {
        self.column_horizontal_padding = horizontal;
        self.column_vertical_padding = vertical;
        self
    }

    #[must_use]
    pub fn with_scrollbar_size(mut self, size: f32) -> Self {
        self.scrollbar_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_pivot(mut self, enabled: bool) -> Self {
        self.enable_pivot = enabled;
        self
    }

    /// Check the options a grid cannot run without.
    pub fn validate(&self) -> Result<()> {
        match self.width {
            None => Err(GridError::Config("width is required".to_string())),
            Some(w) if !w.is_finite() || w < 0.0 => {
                Err(GridError::Config(format!("width must be a non-negative number, got {w}")))
            }
            Some(_) => Ok(()),
        }
    }

    /// Container width, 0 when unset
    pub fn container_width(&self) -> f32 {
        self.width.unwrap_or(0.0)
    }

    /// Sizing options for a resolved line height
    pub fn size_options(&self, line_height: f32) -> SizeOptions {
        SizeOptions {
            line_height,
            horizontal_padding: self.column_horizontal_padding,
            vertical_padding: self.column_vertical_padding,
        }
    }

    pub fn overscan(&self) -> RegionOverscan {
        let body = self.body_props.overscan_count.unwrap_or(DEFAULT_GRID_OVERSCAN);
        RegionOverscan {
            column_header: self
                .column_header_props
                .overscan_count
                .unwrap_or(DEFAULT_LIST_OVERSCAN),
            row_header: self
                .row_header_props
                .overscan_count
                .unwrap_or(DEFAULT_LIST_OVERSCAN),
            body_rows: body,
            body_columns: body,
        }
    }
}

/// Reject empty or duplicate column ids.
pub fn validate_columns(columns: &[ColumnSpec]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.id.is_empty() {
            return Err(GridError::Config(format!("column {index} has no id")));
        }
        if !seen.insert(column.id.as_str()) {
            return Err(GridError::Config(format!("duplicate column id {:?}", column.id)));
        }
    }
    Ok(())
}

/// A grid as stored in a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub options: GridOptions,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl GridDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: Self = serde_json::from_reader(reader)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        validate_columns(&self.columns)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_parse_document() {
        let doc = GridDocument::from_json(
            r#"{
                "options": {
                    "width": 300,
                    "maxHeight": 120,
                    "rowHeaderWidth": 30,
                    "columnHorizontalPadding": 8,
                    "enablePivot": true,
                    "bodyProps": { "className": "body", "overscanCount": 4 }
                },
                "columns": [{ "id": "name", "label": "Name" }, { "id": "qty", "width": 40 }],
                "records": [{ "name": "apple", "qty": 3 }]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.options.width, Some(300.0));
        assert_eq!(doc.options.max_height, Some(120.0));
        assert!(doc.options.enable_pivot);
        assert_eq!(doc.options.body_props.class_name.as_deref(), Some("body"));
        assert_eq!(doc.options.overscan().body_rows, 4);
        assert_eq!(doc.options.overscan().column_header, DEFAULT_LIST_OVERSCAN);
        assert_eq!(doc.columns.len(), 2);
        assert_eq!(doc.records[0].get("qty"), Some(&CellValue::Number(3.0)));
    }

    #[test]
    fn test_odd_record_values_still_load() {
        let doc = GridDocument::from_json(
            r#"{
                "options": { "width": 200 },
                "columns": [{ "id": "a" }, { "id": "tags" }],
                "records": [
                    { "a": "x", "tags": ["p", "q"] },
                    { "a": { "nested": 1 } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.records.len(), 2);
        let tags = doc.records[0].get("tags").unwrap();
        assert_eq!(tags.display_text(), "p,q");
        assert!(!tags.is_text());
        assert_eq!(
            doc.records[1].get("a").unwrap().display_text(),
            "[object Object]"
        );
    }

    #[test]
    fn test_missing_width() {
        let err = GridDocument::from_json(r#"{ "options": {} }"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_negative_width() {
        assert!(GridOptions::new(-1.0).validate().is_err());
        assert!(GridOptions::new(0.0).validate().is_ok());
    }

    #[test]
    fn test_column_ids() {
        assert!(validate_columns(&[ColumnSpec::new("a"), ColumnSpec::new("b")]).is_ok());
        let err = validate_columns(&[ColumnSpec::new("a"), ColumnSpec::new("a")]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
        let err = validate_columns(&[ColumnSpec::new("")]).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = GridDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let json = serde_json::to_string(&GridOptions::new(10.0).with_row_header_width(5.0)).unwrap();
        assert!(json.contains("\"rowHeaderWidth\":5"));
        assert!(!json.contains("maxHeight"));
    }
}
