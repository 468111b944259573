//! Content-driven row heights and column widths.
//!
//! Every (row, column) pair yields a `(height, width)`; a row is as tall as
//! its tallest cell and a column as wide as its widest cell. An empty
//! dataset is measured through one synthetic row so that column widths
//! still follow the header labels.

use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::measure::{FontMetrics, TextMeasurer};
use crate::types::{value_text, CellValue, ColumnSpec, Dataset, Record};

/// Texts with more word separators than this are treated as prose and
/// wrapped to half their natural width.
pub const PROSE_WORD_THRESHOLD: usize = 5;

/// Inputs to sizing besides data, columns and font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOptions {
    /// Height of one text line
    pub line_height: f32,
    /// Added to every measured column width
    pub horizontal_padding: f32,
    /// Added to every measured cell height below the column cap
    pub vertical_padding: f32,
}

/// Size of one cell
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellSize {
    pub height: f32,
    pub width: f32,
}

impl CellSize {
    const ZERO: Self = Self {
        height: 0.0,
        width: 0.0,
    };

    fn new(height: f32, width: f32) -> Self {
        Self { height, width }
    }
}

/// Output of the size model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sizes {
    /// One entry per record (empty for an empty dataset)
    pub row_heights: Vec<f32>,
    /// One entry per column
    pub column_widths: Vec<f32>,
    /// Sum of `row_heights`
    pub total_height: f32,
}

impl Sizes {
    pub fn total_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

/// Size a single cell.
///
/// Priority: explicit height+width on the column, then measured content,
/// then the column label when the value is missing or shorter. Without
/// font metrics the cell is `(0, 0)`. Text widths always carry horizontal
/// padding, an explicit width included; other values keep an explicit
/// width as is.
pub fn cell_size(
    value: Option<&CellValue>,
    column: &ColumnSpec,
    font: Option<&FontMetrics>,
    options: &SizeOptions,
) -> CellSize {
    let explicit_width = column.explicit_width();
    if let (Some(height), Some(width)) = (column.explicit_height(), explicit_width) {
        return CellSize::new(height, width);
    }
    let Some(font) = font else {
        return CellSize::ZERO;
    };

    let text = value_text(value);
    let label = if explicit_width.is_none() {
        column.display_label()
    } else {
        ""
    };
    let measured = if text.chars().count() > label.chars().count() {
        font.measure_text(&text)
    } else {
        font.measure_text(label)
    };

    let one_line = options.line_height + options.vertical_padding;
    let Some(CellValue::Text(text)) = value else {
        return CellSize::new(
            one_line,
            explicit_width.unwrap_or(measured + options.horizontal_padding),
        );
    };

    let candidate = explicit_width.unwrap_or_else(|| natural_width(text, measured));
    if candidate >= measured + options.vertical_padding || candidate <= 0.0 {
        return CellSize::new(
            one_line,
            explicit_width.unwrap_or(measured) + options.horizontal_padding,
        );
    }

    // Also reached by single-line text when padding pushes it past the
    // candidate, so `max_height` still caps it.
    let width = candidate + options.horizontal_padding;
    let lines = (measured / candidate).ceil();
    let height = lines * options.line_height;
    match column.max_height_cap() {
        Some(cap) if height > cap => CellSize::new(cap, width),
        _ => CellSize::new(height + options.vertical_padding, width),
    }
}

/// Column width a text would like: its measured width, halved for prose.
fn natural_width(text: &str, measured: f32) -> f32 {
    let words = text.split(' ').count();
    if words > PROSE_WORD_THRESHOLD {
        (measured / 2.0).round()
    } else {
        measured
    }
}

/// Compute row heights, column widths and total height.
pub fn compute_sizes(
    dataset: &[Record],
    columns: &[ColumnSpec],
    font: Option<&FontMetrics>,
    options: &SizeOptions,
) -> Sizes {
    let mut column_widths = vec![0.0_f32; columns.len()];
    let mut row_heights = Vec::with_capacity(dataset.len());
    let mut total_height = 0.0_f32;

    let mut measure_row = |record: Option<&Record>| -> f32 {
        let mut row_height = 0.0_f32;
        for (column, column_width) in columns.iter().zip(column_widths.iter_mut()) {
            let value = record.and_then(|r| r.get(&column.id));
            let size = cell_size(value, column, font, options);
            if size.height > row_height {
                row_height = size.height;
            }
            if size.width > *column_width {
                *column_width = size.width;
            }
        }
        row_height
    };

    if dataset.is_empty() {
        // Synthetic row: only widens columns to fit their labels.
        measure_row(None);
    } else {
        for record in dataset {
            let height = measure_row(Some(record));
            row_heights.push(height);
            total_height += height;
        }
    }

    Sizes {
        row_heights,
        column_widths,
        total_height,
    }
}

struct SizeKey {
    dataset: Dataset,
    columns: Arc<[ColumnSpec]>,
    measurer: Option<Rc<dyn TextMeasurer>>,
    line_height_from_font: Option<f32>,
    options: SizeOptions,
}

impl SizeKey {
    fn matches(
        &self,
        dataset: &Dataset,
        columns: &Arc<[ColumnSpec]>,
        font: Option<&FontMetrics>,
        options: &SizeOptions,
    ) -> bool {
        let same_font = match (&self.measurer, font) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                Rc::ptr_eq(a, b.measurer())
                    && self.line_height_from_font == Some(b.line_height())
            }
            _ => false,
        };
        same_font
            && Arc::ptr_eq(&self.dataset, dataset)
            && Arc::ptr_eq(&self.columns, columns)
            && self.options == *options
    }
}

/// Memoizing wrapper around [`compute_sizes`].
///
/// Recomputes only when the dataset or columns change identity, the font
/// measurer changes identity, or the sizing options change value.
#[derive(Default)]
pub struct SizeModel {
    cached: Option<(SizeKey, Arc<Sizes>)>,
    recomputations: u64,
}

impl SizeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute(
        &mut self,
        dataset: &Dataset,
        columns: &Arc<[ColumnSpec]>,
        font: Option<&FontMetrics>,
        options: &SizeOptions,
    ) -> Arc<Sizes> {
        if let Some((key, sizes)) = &self.cached {
            if key.matches(dataset, columns, font, options) {
                return Arc::clone(sizes);
            }
        }

        let sizes = Arc::new(compute_sizes(dataset, columns, font, options));
        self.recomputations += 1;
        tracing::debug!(
            rows = sizes.row_heights.len(),
            columns = sizes.column_widths.len(),
            total_height = sizes.total_height,
            measured = font.is_some(),
            "sizes recomputed"
        );
        let key = SizeKey {
            dataset: Arc::clone(dataset),
            columns: Arc::clone(columns),
            measurer: font.map(|f| Rc::clone(f.measurer())),
            line_height_from_font: font.map(FontMetrics::line_height),
            options: *options,
        };
        self.cached = Some((key, Arc::clone(&sizes)));
        sizes
    }

    /// Number of times sizes were actually recomputed
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Drop the memoized result.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::measure::{FixedAdvanceMeasurer, FontSpec};
    use crate::types::record;

    /// 10px font → 5px per glyph, 12.5px line height
    fn metrics() -> FontMetrics {
        FontMetrics::new(Rc::new(FixedAdvanceMeasurer::new(FontSpec::new(
            "sans-serif",
            10.0,
            400,
        ))))
    }

    fn options() -> SizeOptions {
        SizeOptions {
            line_height: 10.0,
            horizontal_padding: 4.0,
            vertical_padding: 2.0,
        }
    }

    #[test]
    fn test_explicit_size_wins() {
        let column = ColumnSpec::new("a").with_width(80.0).with_height(30.0);
        let value = CellValue::from("a very long text that would otherwise wrap");
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size, CellSize::new(30.0, 80.0));
    }

    #[test]
    fn test_no_font_is_zero() {
        let column = ColumnSpec::new("a");
        let value = CellValue::from("text");
        assert_eq!(cell_size(Some(&value), &column, None, &options()), CellSize::ZERO);
    }

    #[test]
    fn test_non_text_is_one_line() {
        let column = ColumnSpec::new("n");
        let value = CellValue::Number(12345.0);
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size.height, 12.0);
        assert_eq!(size.width, 25.0 + 4.0);
    }

    #[test]
    fn test_missing_value_sizes_from_label() {
        let column = ColumnSpec::new("id").with_label("Identifier");
        let size = cell_size(None, &column, Some(&metrics()), &options());
        assert_eq!(size.width, 50.0 + 4.0);
        assert_eq!(size.height, 12.0);
    }

    #[test]
    fn test_short_text_single_line() {
        let column = ColumnSpec::new("a");
        let value = CellValue::from("hello");
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size, CellSize::new(12.0, 25.0 + 4.0));
    }

    #[test]
    fn test_prose_wraps_to_half_width() {
        let column = ColumnSpec::new("a");
        let value = CellValue::from("one two three four five");
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size.height, 12.0, "five words is not prose");

        // 27 glyphs → 135px, halved to 68px → 2 lines
        let value = CellValue::from("one two three four five six");
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size.width, 68.0 + 4.0);
        assert_eq!(size.height, 2.0 * 10.0 + 2.0);
    }

    #[test]
    fn test_explicit_width_wraps_and_caps() {
        let column = ColumnSpec::new("a").with_width(20.0);
        let value = CellValue::from("abcdefghij"); // 50px → 3 lines
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size, CellSize::new(32.0, 20.0 + 4.0));

        let capped = column.with_max_height(25.0);
        let size = cell_size(Some(&value), &capped, Some(&metrics()), &options());
        assert_eq!(size, CellSize::new(25.0, 20.0 + 4.0));
    }

    #[test]
    fn test_explicit_width_kept_for_non_text() {
        let column = ColumnSpec::new("n").with_width(20.0);
        let value = CellValue::Number(12345.0);
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size, CellSize::new(12.0, 20.0));
    }

    #[test]
    fn test_single_line_text_is_capped() {
        let column = ColumnSpec::new("a").with_max_height(8.0);
        let value = CellValue::from("hello");
        let size = cell_size(Some(&value), &column, Some(&metrics()), &options());
        assert_eq!(size, CellSize::new(8.0, 25.0 + 4.0));
    }

    #[test]
    fn test_compute_sizes_row_and_column_max() {
        let columns = vec![ColumnSpec::new("a"), ColumnSpec::new("b").with_width(20.0)];
        let rows = vec![
            record([("a", "x"), ("b", "abcdefghij")]),
            record([("a", "longer value"), ("b", "ab")]),
        ];
        let sizes = compute_sizes(&rows, &columns, Some(&metrics()), &options());
        assert_eq!(sizes.row_heights, vec![32.0, 12.0]);
        assert_eq!(sizes.column_widths, vec![60.0 + 4.0, 20.0 + 4.0]);
        assert_eq!(sizes.total_height, 44.0);
        assert_eq!(sizes.total_width(), 88.0);
    }

    #[test]
    fn test_empty_dataset_uses_labels() {
        let columns = vec![
            ColumnSpec::new("column1").with_label("Column 1"),
            ColumnSpec::new("c2"),
        ];
        let sizes = compute_sizes(&[], &columns, Some(&metrics()), &options());
        assert!(sizes.row_heights.is_empty());
        assert_eq!(sizes.total_height, 0.0);
        assert_eq!(sizes.column_widths, vec![40.0 + 4.0, 10.0 + 4.0]);
    }

    #[test]
    fn test_zero_columns() {
        let rows = vec![record([("a", "x")])];
        let sizes = compute_sizes(&rows, &[], Some(&metrics()), &options());
        assert_eq!(sizes.row_heights, vec![0.0]);
        assert!(sizes.column_widths.is_empty());
        assert_eq!(sizes.total_width(), 0.0);
    }

    #[test]
    fn test_size_model_memoizes_by_identity() {
        let dataset: Dataset = Arc::from(vec![record([("a", "x")])]);
        let columns: Arc<[ColumnSpec]> = Arc::from(vec![ColumnSpec::new("a")]);
        let font = metrics();
        let mut model = SizeModel::new();

        let first = model.compute(&dataset, &columns, Some(&font), &options());
        let second = model.compute(&dataset, &columns, Some(&font.clone()), &options());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(model.recomputations(), 1);

        let copy: Dataset = Arc::from(dataset.to_vec());
        let third = model.compute(&copy, &columns, Some(&font), &options());
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
        assert_eq!(model.recomputations(), 2);

        let padded = SizeOptions {
            horizontal_padding: 10.0,
            ..options()
        };
        model.compute(&copy, &columns, Some(&font), &padded);
        assert_eq!(model.recomputations(), 3);
    }

    #[test]
    fn test_size_model_recomputes_when_font_arrives() {
        let dataset: Dataset = Arc::from(vec![record([("a", "xyz")])]);
        let columns: Arc<[ColumnSpec]> = Arc::from(vec![ColumnSpec::new("a")]);
        let mut model = SizeModel::new();

        let unmeasured = model.compute(&dataset, &columns, None, &options());
        assert_eq!(unmeasured.column_widths, vec![0.0]);

        let measured = model.compute(&dataset, &columns, Some(&metrics()), &options());
        assert_eq!(measured.column_widths, vec![15.0 + 4.0]);
        assert_eq!(model.recomputations(), 2);
    }
}
