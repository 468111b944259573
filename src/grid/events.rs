use serde::{Deserialize, Serialize};

/// What the pointer entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerTarget {
    Cell { row: usize, column: usize },
    RowHeader { row: usize },
    ColumnHeader { column: usize },
}

/// Host input, queued by [`super::Grid::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// The body region scrolled to `(left, top)`
    BodyScroll { left: f32, top: f32 },
    PointerEnter { target: PointerTarget },
    PointerLeave,
}

impl GridEvent {
    pub fn body_scroll(left: f32, top: f32) -> Self {
        Self::BodyScroll { left, top }
    }

    pub fn enter_cell(row: usize, column: usize) -> Self {
        Self::PointerEnter {
            target: PointerTarget::Cell { row, column },
        }
    }

    pub fn enter_row_header(row: usize) -> Self {
        Self::PointerEnter {
            target: PointerTarget::RowHeader { row },
        }
    }

    pub fn enter_column_header(column: usize) -> Self {
        Self::PointerEnter {
            target: PointerTarget::ColumnHeader { column },
        }
    }
}
