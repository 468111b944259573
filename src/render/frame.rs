use serde::Serialize;

use super::visual::Visual;
use crate::pivot::Pivot;
use crate::viewport::ScrollOffset;

/// A rendered column or row header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderVisual {
    pub index: usize,
    pub visual: Visual,
}

/// A rendered body cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellVisual {
    pub row: usize,
    pub column: usize,
    pub visual: Visual,
}

/// Everything visible after one render pass.
///
/// Region coordinates are relative to each region's scrollable content;
/// `scroll` tells the host how far each region is shifted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub column_headers: Vec<HeaderVisual>,
    pub row_headers: Vec<HeaderVisual>,
    pub cells: Vec<CellVisual>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Visual>,
    pub scroll: ScrollOffset,
    pub pivot: Pivot,
}

impl Frame {
    /// Body cell at `(row, column)`, if it was rendered
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellVisual> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }
}
