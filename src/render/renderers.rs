//! Injectable renderers for headers, cells and the footer.
//!
//! Each renderer is optional. Absent ones fall back to plain text:
//! column label (or id), 1-based row number, and the cell value with an
//! ellipsis. Any `Fn(&Context) -> Visual` closure is a renderer.

use std::fmt;

use super::visual::{Overflow, Visual};
use crate::pivot::Pivot;
use crate::types::{value_text, CellValue, ColumnSpec, Record};
use crate::viewport::DisplayRegion;

pub struct ColumnHeaderContext<'a> {
    pub column_index: usize,
    pub column: &'a ColumnSpec,
    pub region: DisplayRegion,
    pub pivot: Pivot,
}

pub struct RowHeaderContext {
    pub row_index: usize,
    pub region: DisplayRegion,
    pub pivot: Pivot,
}

pub struct CellContext<'a> {
    pub row_index: usize,
    pub column_index: usize,
    /// `None` when the record has no entry for this column
    pub value: Option<&'a CellValue>,
    pub record: &'a Record,
    pub region: DisplayRegion,
    pub pivot: Pivot,
    pub column: &'a ColumnSpec,
}

pub struct FooterContext {
    /// Spans the body width, at the start of the footer row
    pub region: DisplayRegion,
}

pub trait ColumnHeaderRenderer {
    fn render_column_header(&self, ctx: &ColumnHeaderContext<'_>) -> Visual;
}

pub trait RowHeaderRenderer {
    fn render_row_header(&self, ctx: &RowHeaderContext) -> Visual;
}

pub trait CellRenderer {
    fn render_cell(&self, ctx: &CellContext<'_>) -> Visual;
}

pub trait FooterRenderer {
    fn render_footer(&self, ctx: &FooterContext) -> Visual;
}

impl<F> ColumnHeaderRenderer for F
where
    F: Fn(&ColumnHeaderContext<'_>) -> Visual,
{
    fn render_column_header(&self, ctx: &ColumnHeaderContext<'_>) -> Visual {
        self(ctx)
    }
}

impl<F> RowHeaderRenderer for F
where
    F: Fn(&RowHeaderContext) -> Visual,
{
    fn render_row_header(&self, ctx: &RowHeaderContext) -> Visual {
        self(ctx)
    }
}

impl<F> CellRenderer for F
where
    F: Fn(&CellContext<'_>) -> Visual,
{
    fn render_cell(&self, ctx: &CellContext<'_>) -> Visual {
        self(ctx)
    }
}

impl<F> FooterRenderer for F
where
    F: Fn(&FooterContext) -> Visual,
{
    fn render_footer(&self, ctx: &FooterContext) -> Visual {
        self(ctx)
    }
}

pub fn default_column_header(ctx: &ColumnHeaderContext<'_>) -> Visual {
    Visual::text(ctx.region, ctx.column.display_label())
        .with_highlight(ctx.pivot.highlight_column(ctx.column_index))
}

pub fn default_row_header(ctx: &RowHeaderContext) -> Visual {
    Visual::text(ctx.region, (ctx.row_index + 1).to_string())
        .with_highlight(ctx.pivot.highlight_row(ctx.row_index))
}

pub fn default_cell(ctx: &CellContext<'_>) -> Visual {
    Visual::text(ctx.region, value_text(ctx.value))
        .with_overflow(Overflow::Ellipsis)
        .with_highlight(ctx.pivot.highlight_cell(ctx.row_index, ctx.column_index))
}

/// The renderer set of one grid.
#[derive(Default)]
pub struct GridRenderers {
    column_header: Option<Box<dyn ColumnHeaderRenderer>>,
    row_header: Option<Box<dyn RowHeaderRenderer>>,
    cell: Option<Box<dyn CellRenderer>>,
    footer: Option<Box<dyn FooterRenderer>>,
}

impl fmt::Debug for GridRenderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridRenderers")
            .field("column_header", &self.column_header.is_some())
            .field("row_header", &self.row_header.is_some())
            .field("cell", &self.cell.is_some())
            .field("footer", &self.footer.is_some())
            .finish()
    }
}

impl GridRenderers {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_column_header(mut self, renderer: impl ColumnHeaderRenderer + 'static) -> Self {
        self.column_header = Some(Box::new(renderer));
        self
    }

    #[must_use]
    pub fn with_row_header(mut self, renderer: impl RowHeaderRenderer + 'static) -> Self {
        self.row_header = Some(Box::new(renderer));
        self
    }

    #[must_use]
    pub fn with_cell(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.cell = Some(Box::new(renderer));
        self
    }

    #[must_use]
    pub fn with_footer(mut self, renderer: impl FooterRenderer + 'static) -> Self {
        self.footer = Some(Box::new(renderer));
        self
    }

    pub fn has_footer(&self) -> bool {
        self.footer.is_some()
    }

    pub fn column_header(&self, ctx: &ColumnHeaderContext<'_>) -> Visual {
        match &self.column_header {
            Some(renderer) => renderer.render_column_header(ctx),
            None => default_column_header(ctx),
        }
    }

    pub fn row_header(&self, ctx: &RowHeaderContext) -> Visual {
        match &self.row_header {
            Some(renderer) => renderer.render_row_header(ctx),
            None => default_row_header(ctx),
        }
    }

    pub fn cell(&self, ctx: &CellContext<'_>) -> Visual {
        match &self.cell {
            Some(renderer) => renderer.render_cell(ctx),
            None => default_cell(ctx),
        }
    }

    /// `None` when no footer renderer is installed.
    pub fn footer(&self, ctx: &FooterContext) -> Option<Visual> {
        self.footer.as_ref().map(|renderer| renderer.render_footer(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pivot::Highlight;
    use crate::types::record;

    fn region() -> DisplayRegion {
        DisplayRegion {
            left: 0.0,
            top: 0.0,
            width: 40.0,
            height: 20.0,
        }
    }

    #[test]
    fn test_defaults() {
        let renderers = GridRenderers::new();
        let column = ColumnSpec::new("c1").with_label("First");
        let header = renderers.column_header(&ColumnHeaderContext {
            column_index: 0,
            column: &column,
            region: region(),
            pivot: Pivot::column(0),
        });
        assert_eq!(header.text, "First");
        assert_eq!(header.highlight, Highlight::Column);

        let row = renderers.row_header(&RowHeaderContext {
            row_index: 4,
            region: region(),
            pivot: Pivot::NONE,
        });
        assert_eq!(row.text, "5");

        let rec = record([("c1", 7.5)]);
        let cell = renderers.cell(&CellContext {
            row_index: 0,
            column_index: 0,
            value: rec.get("c1"),
            record: &rec,
            region: region(),
            pivot: Pivot::row(0),
            column: &column,
        });
        assert_eq!(cell.text, "7.5");
        assert_eq!(cell.overflow, Overflow::Ellipsis);
        assert_eq!(cell.highlight, Highlight::Row);

        assert!(renderers
            .footer(&FooterContext { region: region() })
            .is_none());
    }

    #[test]
    fn test_closure_renderers() {
        let renderers = GridRenderers::new()
            .with_cell(|ctx: &CellContext<'_>| {
                Visual::text(ctx.region, format!("r{}c{}", ctx.row_index, ctx.column_index))
                    .with_class_name("custom")
            })
            .with_footer(|ctx: &FooterContext| Visual::text(ctx.region, "Total"));
        let column = ColumnSpec::new("c");
        let rec = Record::new();
        let cell = renderers.cell(&CellContext {
            row_index: 2,
            column_index: 1,
            value: None,
            record: &rec,
            region: region(),
            pivot: Pivot::NONE,
            column: &column,
        });
        assert_eq!(cell.text, "r2c1");
        assert_eq!(cell.class_name.as_deref(), Some("custom"));
        assert!(renderers.has_footer());
        assert_eq!(
            renderers
                .footer(&FooterContext { region: region() })
                .unwrap()
                .text,
            "Total"
        );
    }
}
