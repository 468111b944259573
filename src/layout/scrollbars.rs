//! Scrollbar reconciliation.
//!
//! Reserving room for one scrollbar shrinks the space on the other axis,
//! which can in turn require the other scrollbar. This is resolved with a
//! fixed sequence of checks rather than iterating to a fixed point:
//!
//! 1. horizontal scrollbar if the columns are wider than the grid
//! 2. vertical scrollbar if headers + rows (+ horizontal bar) exceed the height
//! 3. when the height is clamped to `max_height`, the horizontal check is
//!    repeated with the vertical bar's thickness reserved
//!
//! A requested height that is too small does not trigger step 3, so a
//! vertical bar can still overlap the last column slightly. Layouts
//! depend on these exact flags; keep the sequence as is.

use serde::Serialize;

/// Scrollbar thickness used when the host does not provide one.
pub const DEFAULT_SCROLLBAR_SIZE: f32 = 17.0;

/// Everything the reconciler needs to know about the container and content.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollbarInput {
    /// Requested container width
    pub width: f32,
    /// Requested container height (`None` = size to content)
    pub height: Option<f32>,
    /// Cap on the container height
    pub max_height: Option<f32>,
    pub row_header_width: f32,
    pub header_height: f32,
    /// Sum of column widths
    pub content_width: f32,
    /// Sum of body row heights
    pub content_height: f32,
    /// Added to the content-derived height when `height` is unset
    pub vertical_padding: f32,
    pub scrollbar_size: f32,
}

/// Final container size and scrollbar flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciled {
    pub width: f32,
    pub height: f32,
    /// Width of the scrollable body (container width minus row header)
    pub grid_width: f32,
    /// A horizontal scrollbar is shown
    pub width_is_not_enough: bool,
    /// A vertical scrollbar is shown
    pub height_is_not_enough: bool,
}

impl Reconciled {
    /// Right margin for the column header, leaving room for the vertical bar.
    pub fn header_margin_right(&self, scrollbar_size: f32) -> f32 {
        if self.height_is_not_enough {
            scrollbar_size
        } else {
            0.0
        }
    }

    /// Bottom margin for the row header, leaving room for the horizontal bar.
    pub fn column_header_margin_bottom(&self, scrollbar_size: f32) -> f32 {
        if self.width_is_not_enough {
            scrollbar_size
        } else {
            0.0
        }
    }
}

fn finite(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Decide final container size and which scrollbars appear.
pub fn reconcile(input: &ScrollbarInput) -> Reconciled {
    let width = finite(input.width).max(0.0);
    let scrollbar = finite(input.scrollbar_size).max(0.0);
    let content_width = finite(input.content_width).max(0.0);
    let content_height = finite(input.content_height).max(0.0);
    let grid_width = (width - finite(input.row_header_width)).max(0.0);
    let has_columns = content_width > 0.0 && grid_width > 0.0;

    let mut width_is_not_enough = has_columns && grid_width < content_width;
    let mut required_height = finite(input.header_height) + content_height;
    if width_is_not_enough {
        required_height += scrollbar;
    }

    let mut height_is_not_enough = false;
    let mut height = match input.height.map(finite) {
        Some(height) => {
            height_is_not_enough = required_height > height;
            height
        }
        None => required_height + finite(input.vertical_padding),
    };

    if let Some(max_height) = input.max_height.map(finite) {
        if height > max_height {
            height = max_height;
            height_is_not_enough = true;
            if has_columns && grid_width < content_width + scrollbar {
                width_is_not_enough = true;
            }
        }
    }

    let height = height.max(0.0);
    if height <= 0.0 {
        height_is_not_enough = false;
    }

    tracing::debug!(
        width,
        height,
        width_is_not_enough,
        height_is_not_enough,
        "scrollbars reconciled"
    );

    Reconciled {
        width,
        height,
        grid_width,
        width_is_not_enough,
        height_is_not_enough,
    }
}

/// Scrollbar thickness of the current platform.
///
/// On wasm32 this is measured once from a scratch element (offset width
/// minus client width); elsewhere it is [`DEFAULT_SCROLLBAR_SIZE`].
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_scrollbar_size() -> f32 {
    DEFAULT_SCROLLBAR_SIZE
}

#[cfg(target_arch = "wasm32")]
pub fn platform_scrollbar_size() -> f32 {
    use std::cell::Cell;
    thread_local! {
        static MEASURED: Cell<Option<f32>> = const { Cell::new(None) };
    }
    MEASURED.with(|cached| {
        if let Some(size) = cached.get() {
            return size;
        }
        let size = measure_scrollbar().unwrap_or(DEFAULT_SCROLLBAR_SIZE);
        cached.set(Some(size));
        size
    })
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_precision_loss)]
fn measure_scrollbar() -> Option<f32> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    let body = document.body()?;
    let scratch: web_sys::HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    let style = scratch.style();
    style.set_property("position", "absolute").ok()?;
    style.set_property("top", "-9999px").ok()?;
    style.set_property("width", "50px").ok()?;
    style.set_property("height", "50px").ok()?;
    style.set_property("overflow", "scroll").ok()?;
    body.append_child(&scratch).ok()?;
    let size = scratch.offset_width() - scratch.client_width();
    body.remove_child(&scratch).ok()?;
    Some(size as f32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn input() -> ScrollbarInput {
        ScrollbarInput {
            width: 200.0,
            height: Some(100.0),
            max_height: None,
            row_header_width: 20.0,
            header_height: 20.0,
            content_width: 150.0,
            content_height: 60.0,
            vertical_padding: 0.0,
            scrollbar_size: 10.0,
        }
    }

    #[test]
    fn test_everything_fits() {
        let r = reconcile(&input());
        assert_eq!(r.grid_width, 180.0);
        assert!(!r.width_is_not_enough);
        assert!(!r.height_is_not_enough);
        assert_eq!(r.height, 100.0);
    }

    #[test]
    fn test_horizontal_bar_pushes_height_over() {
        // 20 + 75 fits in 100, but + 10 for the horizontal bar does not
        let r = reconcile(&ScrollbarInput {
            content_width: 190.0,
            content_height: 75.0,
            ..input()
        });
        assert!(r.width_is_not_enough);
        assert!(r.height_is_not_enough);
    }

    #[test]
    fn test_requested_height_does_not_recheck_width() {
        // Vertical bar needed, columns fit only without it: width flag stays off.
        let r = reconcile(&ScrollbarInput {
            content_width: 175.0,
            content_height: 200.0,
            ..input()
        });
        assert!(r.height_is_not_enough);
        assert!(!r.width_is_not_enough);
    }

    #[test]
    fn test_unset_height_sizes_to_content() {
        let r = reconcile(&ScrollbarInput {
            height: None,
            vertical_padding: 4.0,
            ..input()
        });
        assert_eq!(r.height, 20.0 + 60.0 + 4.0);
        assert!(!r.height_is_not_enough);
    }

    #[test]
    fn test_max_height_clamp_rechecks_width() {
        let r = reconcile(&ScrollbarInput {
            height: None,
            max_height: Some(50.0),
            content_width: 175.0,
            ..input()
        });
        assert_eq!(r.height, 50.0);
        assert!(r.height_is_not_enough);
        assert!(r.width_is_not_enough);
    }

    #[test]
    fn test_degenerate_inputs() {
        let r = reconcile(&ScrollbarInput::default());
        assert_eq!(r, Reconciled::default());

        let r = reconcile(&ScrollbarInput {
            width: f32::NAN,
            height: Some(f32::INFINITY),
            content_width: 0.0,
            ..input()
        });
        assert!(!r.width_is_not_enough);
        assert!(!r.height_is_not_enough);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn test_margins_follow_flags() {
        let r = Reconciled {
            width_is_not_enough: true,
            ..Reconciled::default()
        };
        assert_eq!(r.column_header_margin_bottom(17.0), 17.0);
        assert_eq!(r.header_margin_right(17.0), 0.0);
    }
}
