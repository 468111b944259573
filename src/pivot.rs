//! Hover cross-hair ("pivot") tracking.
//!
//! Pointer-enter on a header or body cell makes that coordinate the pivot;
//! pointer-leave clears it. Every rendered item receives the current pivot
//! so renderers can highlight the hovered row, column or cell.
//!
//! Tracking is off by default: each transition re-renders the visible
//! ranges of all three regions, which is costly at pointer-move rates.

use serde::Serialize;

/// Highlighted coordinate; `None` on an axis means "no highlight there".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pivot {
    pub row: Option<usize>,
    pub column: Option<usize>,
}

/// How an item relates to the pivot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    #[default]
    None,
    /// Same row as the pivot
    Row,
    /// Same column as the pivot
    Column,
    /// The pivot cell itself
    Cell,
}

impl Pivot {
    /// Idle sentinel
    pub const NONE: Self = Self {
        row: None,
        column: None,
    };

    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
        }
    }

    pub fn row(row: usize) -> Self {
        Self {
            row: Some(row),
            column: None,
        }
    }

    pub fn column(column: usize) -> Self {
        Self {
            row: None,
            column: Some(column),
        }
    }

    pub fn is_none(&self) -> bool {
        self.row.is_none() && self.column.is_none()
    }

    pub fn is_row(&self, row: usize) -> bool {
        self.row == Some(row)
    }

    pub fn is_column(&self, column: usize) -> bool {
        self.column == Some(column)
    }

    pub fn is_cell(&self, row: usize, column: usize) -> bool {
        self.is_row(row) && self.is_column(column)
    }

    /// Row index with -1 for "none", as host renderers expect.
    pub fn row_index(&self) -> i64 {
        self.row
            .and_then(|r| i64::try_from(r).ok())
            .unwrap_or(-1)
    }

    /// Column index with -1 for "none".
    pub fn column_index(&self) -> i64 {
        self.column
            .and_then(|c| i64::try_from(c).ok())
            .unwrap_or(-1)
    }

    /// Highlight for a body cell
    pub fn highlight_cell(&self, row: usize, column: usize) -> Highlight {
        match (self.is_row(row), self.is_column(column)) {
            (true, true) => Highlight::Cell,
            (true, false) => Highlight::Row,
            (false, true) => Highlight::Column,
            (false, false) => Highlight::None,
        }
    }

    /// Highlight for a row header
    pub fn highlight_row(&self, row: usize) -> Highlight {
        if self.is_row(row) {
            Highlight::Row
        } else {
            Highlight::None
        }
    }

    /// Highlight for a column header
    pub fn highlight_column(&self, column: usize) -> Highlight {
        if self.is_column(column) {
            Highlight::Column
        } else {
            Highlight::None
        }
    }
}

/// Two-state machine: idle (`Pivot::NONE`) or active.
#[derive(Debug, Clone, Default)]
pub struct PivotTracker {
    enabled: bool,
    current: Pivot,
}

impl PivotTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: Pivot::NONE,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning tracking off also clears the pivot.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.current = Pivot::NONE;
        }
    }

    pub fn current(&self) -> Pivot {
        self.current
    }

    pub fn enter_cell(&mut self, row: usize, column: usize) -> bool {
        self.transition(Pivot::cell(row, column))
    }

    pub fn enter_row_header(&mut self, row: usize) -> bool {
        self.transition(Pivot::row(row))
    }

    pub fn enter_column_header(&mut self, column: usize) -> bool {
        self.transition(Pivot::column(column))
    }

    pub fn leave(&mut self) -> bool {
        self.transition(Pivot::NONE)
    }

    /// Returns true when the pivot changed.
    fn transition(&mut self, next: Pivot) -> bool {
        if !self.enabled || self.current == next {
            return false;
        }
        tracing::trace!(
            row = next.row_index(),
            column = next.column_index(),
            "pivot"
        );
        self.current = next;
        true
    }
}
