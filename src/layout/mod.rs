//! Page layout for report entries.
//!
//! The paginator is a single-pass flow layout: entries are placed top to
//! bottom, one cursor, no backtracking. Only the vertical axis is checked for
//! overflow; horizontal fit is the entry producer's job (wrap width, fixed
//! bar width).

mod paginator;

pub use paginator::{
    paginate, ItemKind, Page, PageGeometry, Paginator, RenderedItem, BAR_ROW_HEIGHT,
};
