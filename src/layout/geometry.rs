//! Per-pass geometry snapshot.
//!
//! A snapshot is derived from sizes plus container options and is never
//! patched: every pass builds a new one and publishes it whole.

use serde::Serialize;

use super::scrollbars::{reconcile, ScrollbarInput};
use super::sizes::Sizes;

/// Rectangle of one region relative to the grid container
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RegionRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Container-level inputs for building a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryInput {
    pub width: f32,
    pub height: Option<f32>,
    pub max_height: Option<f32>,
    pub row_header_width: f32,
    pub header_height: f32,
    pub line_height: f32,
    /// Height of the synthetic footer row, when a footer is rendered
    pub footer_height: Option<f32>,
    pub vertical_padding: f32,
    pub scrollbar_size: f32,
}

/// Final geometry for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySnapshot {
    /// One entry per record
    pub row_heights: Vec<f32>,
    /// One entry per column
    pub column_widths: Vec<f32>,
    pub total_height: f32,
    pub total_width: f32,
    pub line_height: f32,
    /// Container width
    pub width: f32,
    /// Container height after reconciliation
    pub height: f32,
    /// Container width minus the row header
    pub grid_width: f32,
    pub header_height: f32,
    pub row_header_width: f32,
    /// Synthetic footer row height (`None` without a footer)
    pub footer_height: Option<f32>,
    /// Width the footer spans
    pub footer_width: f32,
    pub width_is_not_enough: bool,
    pub height_is_not_enough: bool,
    pub scrollbar_size: f32,
    pub header_margin_right: f32,
    pub column_header_margin_bottom: f32,
    pub column_header: RegionRect,
    /// Absent when the row header width is zero
    pub row_header: Option<RegionRect>,
    pub body: RegionRect,
}

impl GeometrySnapshot {
    /// Reconcile scrollbars and lay out the three regions.
    pub fn build(sizes: &Sizes, input: &GeometryInput) -> Self {
        let total_width = sizes.total_width();
        let footer = input.footer_height.unwrap_or(0.0);
        let reconciled = reconcile(&ScrollbarInput {
            width: input.width,
            height: input.height,
            max_height: input.max_height,
            row_header_width: input.row_header_width,
            header_height: input.header_height,
            content_width: total_width,
            content_height: sizes.total_height + footer,
            vertical_padding: input.vertical_padding,
            scrollbar_size: input.scrollbar_size,
        });

        let header_margin_right = reconciled.header_margin_right(input.scrollbar_size);
        let column_header_margin_bottom =
            reconciled.column_header_margin_bottom(input.scrollbar_size);
        let header_height = input.header_height;
        let row_header_width = input.row_header_width.max(0.0);
        let grid_width = reconciled.grid_width;
        let height = reconciled.height;

        let column_header = RegionRect::new(
            row_header_width,
            0.0,
            grid_width - header_margin_right,
            header_height,
        );
        let row_header = (row_header_width > 0.0).then(|| {
            RegionRect::new(
                0.0,
                header_height,
                row_header_width,
                height - header_height - column_header_margin_bottom,
            )
        });
        let body = RegionRect::new(
            row_header_width,
            header_height,
            grid_width,
            height - header_height,
        );

        Self {
            row_heights: sizes.row_heights.clone(),
            column_widths: sizes.column_widths.clone(),
            total_height: sizes.total_height,
            total_width,
            line_height: input.line_height,
            width: reconciled.width,
            height,
            grid_width,
            header_height,
            row_header_width,
            footer_height: input.footer_height,
            footer_width: (reconciled.width - header_margin_right).max(0.0),
            width_is_not_enough: reconciled.width_is_not_enough,
            height_is_not_enough: reconciled.height_is_not_enough,
            scrollbar_size: input.scrollbar_size,
            header_margin_right,
            column_header_margin_bottom,
            column_header,
            row_header,
            body,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Rows in the body region, including the footer row
    pub fn body_row_count(&self) -> usize {
        self.row_count() + usize::from(self.footer_height.is_some())
    }

    /// Row index of the footer, if any
    pub fn footer_index(&self) -> Option<usize> {
        self.footer_height.map(|_| self.row_count())
    }

    /// Height of body row `index` (the footer row included); 0 when out of range.
    pub fn row_height(&self, index: usize) -> f32 {
        match self.row_heights.get(index) {
            Some(height) => *height,
            None if Some(index) == self.footer_index() => self.footer_height.unwrap_or(0.0),
            None => 0.0,
        }
    }

    /// Width of column `index`; 0 when out of range.
    pub fn column_width(&self, index: usize) -> f32 {
        self.column_widths.get(index).copied().unwrap_or(0.0)
    }

    /// Body row sizes with the footer row appended
    pub fn body_row_heights(&self) -> Vec<f32> {
        let mut heights = self.row_heights.clone();
        if let Some(footer) = self.footer_height {
            heights.push(footer);
        }
        heights
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sizes() -> Sizes {
        Sizes {
            row_heights: vec![20.0, 20.0, 40.0],
            column_widths: vec![50.0, 30.0],
            total_height: 80.0,
        }
    }

    fn input() -> GeometryInput {
        GeometryInput {
            width: 200.0,
            height: Some(150.0),
            max_height: None,
            row_header_width: 30.0,
            header_height: 20.0,
            line_height: 20.0,
            footer_height: None,
            vertical_padding: 0.0,
            scrollbar_size: 10.0,
        }
    }

    #[test]
    fn test_regions_without_scrollbars() {
        let g = GeometrySnapshot::build(&sizes(), &input());
        assert_eq!(g.grid_width, 170.0);
        assert_eq!(g.column_header, RegionRect::new(30.0, 0.0, 170.0, 20.0));
        assert_eq!(g.row_header, Some(RegionRect::new(0.0, 20.0, 30.0, 130.0)));
        assert_eq!(g.body, RegionRect::new(30.0, 20.0, 170.0, 130.0));
        assert_eq!(g.footer_width, 200.0);
        assert_eq!(g.total_width, 80.0);
    }

    #[test]
    fn test_margins_when_scrolling() {
        let g = GeometrySnapshot::build(
            &sizes(),
            &GeometryInput {
                width: 100.0,
                height: Some(60.0),
                ..input()
            },
        );
        assert!(g.width_is_not_enough);
        assert!(g.height_is_not_enough);
        assert_eq!(g.header_margin_right, 10.0);
        assert_eq!(g.column_header_margin_bottom, 10.0);
        assert_eq!(g.column_header.width, 60.0);
        assert_eq!(g.row_header.unwrap().height, 30.0);
        assert_eq!(g.footer_width, 90.0);
    }

    #[test]
    fn test_no_row_header() {
        let g = GeometrySnapshot::build(
            &sizes(),
            &GeometryInput {
                row_header_width: 0.0,
                ..input()
            },
        );
        assert!(g.row_header.is_none());
        assert_eq!(g.body.x, 0.0);
    }

    #[test]
    fn test_footer_row() {
        let g = GeometrySnapshot::build(
            &sizes(),
            &GeometryInput {
                height: None,
                footer_height: Some(25.0),
                ..input()
            },
        );
        assert_eq!(g.body_row_count(), 4);
        assert_eq!(g.footer_index(), Some(3));
        assert_eq!(g.row_height(3), 25.0);
        assert_eq!(g.row_height(4), 0.0);
        assert_eq!(g.body_row_heights(), vec![20.0, 20.0, 40.0, 25.0]);
        assert_eq!(g.height, 20.0 + 80.0 + 25.0);
    }
}
