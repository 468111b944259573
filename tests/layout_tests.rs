//! Sizing and scrollbar reconciliation tests
//!
//! Properties of the size model and the bounded scrollbar correction,
//! exercised through the public layout API.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use test_case::test_case;
use windowgrid::layout::{compute_sizes, reconcile, ScrollbarInput, SizeModel, SizeOptions};
use windowgrid::measure::{FixedAdvanceMeasurer, FontMetrics, FontSpec, TextMeasurer};
use windowgrid::{record, ColumnSpec, Record};

/// Counts how often text was measured
struct CountingMeasurer {
    inner: FixedAdvanceMeasurer,
    calls: Cell<usize>,
}

impl TextMeasurer for CountingMeasurer {
    fn font(&self) -> &FontSpec {
        self.inner.font()
    }

    fn measure_text(&self, text: &str) -> f32 {
        self.calls.set(self.calls.get() + 1);
        self.inner.measure_text(text)
    }
}

fn counting_font() -> (Rc<CountingMeasurer>, FontMetrics) {
    let measurer = Rc::new(CountingMeasurer {
        inner: FixedAdvanceMeasurer::new(FontSpec::new("sans-serif", 16.0, 400)),
        calls: Cell::new(0),
    });
    let metrics = FontMetrics::new(Rc::clone(&measurer) as Rc<dyn TextMeasurer>);
    (measurer, metrics)
}

fn font() -> FontMetrics {
    FontMetrics::fixed_advance("16px sans-serif").unwrap()
}

fn options() -> SizeOptions {
    SizeOptions {
        line_height: 20.0,
        horizontal_padding: 8.0,
        vertical_padding: 4.0,
    }
}

fn input() -> ScrollbarInput {
    ScrollbarInput {
        width: 200.0,
        height: None,
        max_height: None,
        row_header_width: 0.0,
        header_height: 20.0,
        content_width: 100.0,
        content_height: 100.0,
        vertical_padding: 0.0,
        scrollbar_size: 10.0,
    }
}

// =============================================================================
// SIZE MODEL
// =============================================================================

#[test]
fn test_lengths_match_dataset() {
    let columns = [ColumnSpec::new("a"), ColumnSpec::new("b"), ColumnSpec::new("c")];
    let records: Vec<Record> = (0..7).map(|i| record([("a", f64::from(i))])).collect();
    let sizes = compute_sizes(&records, &columns, Some(&font()), &options());
    assert_eq!(sizes.row_heights.len(), 7);
    assert_eq!(sizes.column_widths.len(), 3);
    assert_eq!(sizes.total_height, sizes.row_heights.iter().sum::<f32>());
    assert!(sizes.column_widths.iter().all(|w| *w >= 0.0));
}

#[test]
fn test_explicit_size_is_never_measured() {
    let (measurer, metrics) = counting_font();
    let columns = [ColumnSpec::new("a").with_width(60.0).with_height(30.0)];
    let records = vec![record([("a", "some text that would otherwise wrap a lot")]); 5];
    let sizes = compute_sizes(&records, &columns, Some(&metrics), &options());
    assert_eq!(measurer.calls.get(), 0);
    assert_eq!(sizes.row_heights, vec![30.0; 5]);
    assert_eq!(sizes.column_widths, vec![60.0]);
}

#[test]
fn test_measured_columns_are_measured() {
    let (measurer, metrics) = counting_font();
    let columns = [ColumnSpec::new("a"), ColumnSpec::new("b").with_width(60.0)];
    let records = vec![record([("a", "x"), ("b", "y")]); 3];
    compute_sizes(&records, &columns, Some(&metrics), &options());
    assert_eq!(measurer.calls.get(), 6);
}

#[test]
fn test_zero_columns() {
    let records = vec![record([("a", "x")]); 3];
    let sizes = compute_sizes(&records, &[], Some(&font()), &options());
    assert!(sizes.column_widths.is_empty());
    assert_eq!(sizes.total_width(), 0.0);
    assert_eq!(sizes.row_heights, vec![0.0; 3]);
}

#[test_case("ab", "abcdef" ; "single word")]
#[test_case("ab cd", "abcdef ghijkl" ; "two words")]
#[test_case("a b c d e f", "aaaa bbbb cccc dddd eeee ffff" ; "prose")]
fn test_longer_text_never_shrinks_at_same_word_count(short: &str, long: &str) {
    let columns = [ColumnSpec::new("a").with_max_height(200.0)];
    let short_sizes = compute_sizes(&[record([("a", short)])], &columns, Some(&font()), &options());
    let long_sizes = compute_sizes(&[record([("a", long)])], &columns, Some(&font()), &options());
    assert!(long_sizes.column_widths[0] >= short_sizes.column_widths[0]);
    assert!(long_sizes.row_heights[0] >= short_sizes.row_heights[0]);
}

#[test]
fn test_sixth_word_halves_the_column() {
    let columns = [ColumnSpec::new("a")];
    let five = compute_sizes(
        &[record([("a", "aaaa bbbb cccc dddd eeee")])],
        &columns,
        Some(&font()),
        &options(),
    );
    let six = compute_sizes(
        &[record([("a", "aaaa bbbb cccc dddd eeee f")])],
        &columns,
        Some(&font()),
        &options(),
    );
    // 192px on one line vs 208px wrapped at round(208 / 2)
    assert_eq!(five.column_widths[0], 192.0 + 8.0);
    assert_eq!(five.row_heights[0], 24.0);
    assert_eq!(six.column_widths[0], 104.0 + 8.0);
    assert_eq!(six.row_heights[0], 44.0);
}

#[test]
fn test_explicit_width_on_text_gets_padding() {
    let columns = [ColumnSpec::new("a").with_width(50.0)];
    let sizes = compute_sizes(&[record([("a", "hi")])], &columns, Some(&font()), &options());
    assert_eq!(sizes.column_widths[0], 58.0);
    assert_eq!(sizes.row_heights[0], 24.0);

    let mut row = record([("a", 7.0)]);
    row.insert("b".to_string(), "hi".into());
    let columns = [
        ColumnSpec::new("a").with_width(50.0),
        ColumnSpec::new("b").with_width(50.0),
    ];
    let sizes = compute_sizes(&[row], &columns, Some(&font()), &options());
    assert_eq!(sizes.column_widths, vec![50.0, 58.0]);
}

#[test]
fn test_single_line_text_respects_max_height() {
    // "hi" fits on one line, but the 20px line is over the 15px cap
    let columns = [ColumnSpec::new("a").with_max_height(15.0)];
    let sizes = compute_sizes(&[record([("a", "hi")])], &columns, Some(&font()), &options());
    assert_eq!(sizes.row_heights[0], 15.0);
    assert_eq!(sizes.column_widths[0], 16.0 + 8.0);
}

#[test_case(None, 44.0 ; "uncapped text wraps to two lines")]
#[test_case(Some(30.0), 30.0 ; "cap replaces height without padding")]
#[test_case(Some(100.0), 44.0 ; "cap above natural height")]
fn test_wrapped_text_height(max_height: Option<f32>, expected: f32) {
    let mut column = ColumnSpec::new("a").with_width(50.0);
    column.max_height = max_height;
    // 11 glyphs = 88px in a 50px column: two lines of 20px plus 4px padding
    let sizes = compute_sizes(&[record([("a", "hello world")])], &[column], Some(&font()), &options());
    assert_eq!(sizes.row_heights[0], expected);
    assert_eq!(sizes.column_widths[0], 50.0 + 8.0);
}

#[test]
fn test_prose_is_halved() {
    // 27 glyphs = 216px, more than five words: wraps at 108px
    let text = "one two three four five six";
    let sizes = compute_sizes(
        &[record([("a", text)])],
        &[ColumnSpec::new("a")],
        Some(&font()),
        &options(),
    );
    assert_eq!(sizes.column_widths[0], 108.0 + 8.0);
    assert_eq!(sizes.row_heights[0], 2.0 * 20.0 + 4.0);
}

#[test]
fn test_non_text_values_take_one_line() {
    let columns = [ColumnSpec::new("n"), ColumnSpec::new("b"), ColumnSpec::new("d")];
    let mut row = record([("n", 123_456.0)]);
    row.insert("b".to_string(), true.into());
    row.insert("d".to_string(), windowgrid::CellValue::date("2024-01-31"));
    let sizes = compute_sizes(&[row], &columns, Some(&font()), &options());
    assert_eq!(sizes.row_heights, vec![24.0]);
    // "123456", "true", "2024-01-31"
    assert_eq!(sizes.column_widths, vec![56.0, 40.0, 88.0]);
}

#[test]
fn test_size_model_memoizes_by_identity() {
    let dataset: Arc<[Record]> = Arc::from(vec![record([("a", "x")])]);
    let columns: Arc<[ColumnSpec]> = Arc::from(vec![ColumnSpec::new("a")]);
    let metrics = font();
    let mut model = SizeModel::new();

    let first = model.compute(&dataset, &columns, Some(&metrics), &options());
    let second = model.compute(&dataset, &columns, Some(&metrics.clone()), &options());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(model.recomputations(), 1);

    // Equal contents, new identity
    let copy: Arc<[Record]> = Arc::from(dataset.to_vec());
    let third = model.compute(&copy, &columns, Some(&metrics), &options());
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
    assert_eq!(model.recomputations(), 2);

    let padded = SizeOptions {
        horizontal_padding: 0.0,
        ..options()
    };
    model.compute(&copy, &columns, Some(&metrics), &padded);
    assert_eq!(model.recomputations(), 3);
}

// =============================================================================
// SCROLLBAR RECONCILIATION
// =============================================================================

#[test_case(200.0, None, false, false, 120.0 ; "everything fits")]
#[test_case(80.0, None, true, false, 130.0 ; "narrow adds horizontal scrollbar to height")]
#[test_case(200.0, Some(90.0), false, true, 90.0 ; "short container")]
#[test_case(80.0, Some(125.0), true, true, 125.0 ; "scrollbar pushes content over height")]
fn test_reconcile(
    width: f32,
    height: Option<f32>,
    width_is_not_enough: bool,
    height_is_not_enough: bool,
    final_height: f32,
) {
    let r = reconcile(&ScrollbarInput {
        width,
        height,
        ..input()
    });
    assert_eq!(r.width_is_not_enough, width_is_not_enough);
    assert_eq!(r.height_is_not_enough, height_is_not_enough);
    assert_eq!(r.height, final_height);
}

#[test]
fn test_max_height_rechecks_width() {
    // 100 fits in 105 alone, not with a 10px scrollbar
    let r = reconcile(&ScrollbarInput {
        width: 105.0,
        max_height: Some(60.0),
        ..input()
    });
    assert_eq!(r.height, 60.0);
    assert!(r.height_is_not_enough);
    assert!(r.width_is_not_enough);

    let r = reconcile(&ScrollbarInput {
        width: 115.0,
        max_height: Some(60.0),
        ..input()
    });
    assert!(!r.width_is_not_enough);
}

#[test]
fn test_vertical_padding_only_when_derived() {
    let derived = reconcile(&ScrollbarInput {
        vertical_padding: 6.0,
        ..input()
    });
    assert_eq!(derived.height, 126.0);

    let fixed = reconcile(&ScrollbarInput {
        height: Some(300.0),
        vertical_padding: 6.0,
        ..input()
    });
    assert_eq!(fixed.height, 300.0);
    assert!(!fixed.height_is_not_enough);
}

#[test]
fn test_degenerate_inputs() {
    let r = reconcile(&ScrollbarInput {
        height: Some(0.0),
        ..input()
    });
    assert!(!r.height_is_not_enough);

    let r = reconcile(&ScrollbarInput {
        width: f32::NAN,
        content_width: 0.0,
        ..input()
    });
    assert_eq!(r.width, 0.0);
    assert!(!r.width_is_not_enough);

    let r = reconcile(&ScrollbarInput {
        row_header_width: 500.0,
        ..input()
    });
    assert_eq!(r.grid_width, 0.0);
    assert!(!r.width_is_not_enough);
}
