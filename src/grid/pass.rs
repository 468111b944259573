//! Render pass: ask each region for its visible window and turn it into
//! visuals.

use super::Grid;
use crate::render::{
    CellContext, CellVisual, ColumnHeaderContext, FooterContext, Frame, HeaderVisual,
    RowHeaderContext,
};
use crate::viewport::DisplayRegion;

impl Grid {
    /// Render the visible window, running a layout pass first when one is
    /// pending.
    pub fn render(&mut self) -> Frame {
        if self.needs_layout {
            self.layout();
        }
        let pivot = self.pivot.current();
        let mut frame = Frame {
            scroll: self.viewport.body_scroll_offset(),
            pivot,
            ..Frame::default()
        };

        match self.viewport.column_header_mut() {
            Some(header) => {
                for index in header.visible_range().into_iter().flatten() {
                    let (Some(column), Some(region)) =
                        (self.columns.get(index), header.item_region(index))
                    else {
                        continue;
                    };
                    let visual = self.renderers.column_header(&ColumnHeaderContext {
                        column_index: index,
                        column,
                        region,
                        pivot,
                    });
                    frame.column_headers.push(HeaderVisual { index, visual });
                }
            }
            None => tracing::warn!("render skipped the column header: not mounted"),
        }

        match self.viewport.row_header_mut() {
            Some(header) => {
                for index in header.visible_range().into_iter().flatten() {
                    let Some(region) = header.item_region(index) else {
                        continue;
                    };
                    let visual = self.renderers.row_header(&RowHeaderContext {
                        row_index: index,
                        region,
                        pivot,
                    });
                    frame.row_headers.push(HeaderVisual { index, visual });
                }
            }
            None => tracing::trace!("no row header to render"),
        }

        let footer_index = self.geometry.footer_index();
        let footer_width = self.geometry.footer_width;
        let Some(body) = self.viewport.body_mut() else {
            tracing::warn!("render skipped the body: not mounted");
            self.needs_render = false;
            return frame;
        };
        if let Some((rows, columns)) = body.visible_cells() {
            for row in rows {
                if Some(row) == footer_index {
                    if let Some(region) = body.cell_region(row, 0) {
                        let region = DisplayRegion {
                            left: 0.0,
                            width: footer_width,
                            ..region
                        };
                        frame.footer = self.renderers.footer(&FooterContext { region });
                    }
                    continue;
                }
                let Some(record) = self.dataset.get(row) else {
                    continue;
                };
                for column_index in columns.clone() {
                    let (Some(column), Some(region)) = (
                        self.columns.get(column_index),
                        body.cell_region(row, column_index),
                    ) else {
                        continue;
                    };
                    let visual = self.renderers.cell(&CellContext {
                        row_index: row,
                        column_index,
                        value: record.get(&column.id),
                        record,
                        region,
                        pivot,
                        column,
                    });
                    frame.cells.push(CellVisual {
                        row,
                        column: column_index,
                        visual,
                    });
                }
            }
        }

        tracing::trace!(
            column_headers = frame.column_headers.len(),
            row_headers = frame.row_headers.len(),
            cells = frame.cells.len(),
            footer = frame.footer.is_some(),
            "frame rendered"
        );
        self.needs_render = false;
        frame
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
    use crate::config::GridOptions;
    use crate::grid::{Grid, GridEvent};
    use crate::measure::FontMetrics;
    use crate::pivot::Highlight;
    use crate::render::{FooterContext, GridRenderers, Visual};
    use crate::types::{record, ColumnSpec};

    fn grid(options: GridOptions) -> Grid {
        Grid::new(
            options,
            vec![ColumnSpec::new("a").with_label("Alpha"), ColumnSpec::new("b")],
        )
        .unwrap()
        .with_font_metrics(FontMetrics::fixed_advance("16px sans-serif").unwrap())
        .with_dataset(vec![
            record([("a", "one"), ("b", "1")]),
            record([("a", "two"), ("b", "2")]),
        ])
    }

    #[test]
    fn test_frame_contents() {
        let mut g = grid(
            GridOptions::new(300.0)
                .with_row_header_width(20.0)
                .with_scrollbar_size(10.0),
        );
        let frame = g.render();
        assert_eq!(frame.column_headers.len(), 2);
        assert_eq!(frame.column_headers[0].visual.text, "Alpha");
        assert_eq!(frame.column_headers[1].visual.text, "b");
        assert_eq!(frame.row_headers.len(), 2);
        assert_eq!(frame.row_headers[1].visual.text, "2");
        assert_eq!(frame.cells.len(), 4);
        assert_eq!(frame.cell(1, 0).unwrap().visual.text, "two");
        assert!(frame.footer.is_none());
        assert!(!g.needs_render());
    }

    #[test]
    fn test_footer_spans_width() {
        let mut g = grid(
            GridOptions::new(300.0)
                .with_height(60.0)
                .with_scrollbar_size(10.0),
        )
        .with_renderers(
            GridRenderers::new().with_footer(|ctx: &FooterContext| Visual::text(ctx.region, "sum")),
        );
        let geometry = g.layout();
        assert_eq!(geometry.footer_index(), Some(2));
        // header 20 + rows 40 + footer 20 > 60
        assert!(geometry.height_is_not_enough);

        g.handle_event(GridEvent::body_scroll(0.0, 1000.0));
        g.process_events();
        let frame = g.render();
        let footer = frame.footer.unwrap();
        assert_eq!(footer.text, "sum");
        assert_eq!(footer.region.left, 0.0);
        assert_eq!(footer.region.width, 290.0);
        assert_eq!(footer.region.top, 40.0);
        assert!(frame.cells.iter().all(|c| c.row < 2));
    }

    #[test]
    fn test_pivot_highlights() {
        let mut g = grid(
            GridOptions::new(300.0)
                .with_row_header_width(20.0)
                .with_pivot(true),
        );
        g.layout();
        g.handle_event(GridEvent::enter_cell(1, 0));
        assert!(g.process_events());
        let frame = g.render();
        assert_eq!(frame.cell(1, 0).unwrap().visual.highlight, Highlight::Cell);
        assert_eq!(frame.cell(1, 1).unwrap().visual.highlight, Highlight::Row);
        assert_eq!(frame.cell(0, 0).unwrap().visual.highlight, Highlight::Column);
        assert_eq!(frame.cell(0, 1).unwrap().visual.highlight, Highlight::None);
        assert_eq!(frame.row_headers[1].visual.highlight, Highlight::Row);
        assert_eq!(frame.column_headers[0].visual.highlight, Highlight::Column);

        g.handle_event(GridEvent::PointerLeave);
        g.process_events();
        let frame = g.render();
        assert!(frame.cells.iter().all(|c| c.visual.highlight == Highlight::None));
    }
}
