//! Empty list placeholder.

use maud::{html, Markup};

use crate::ui::theme::Theme;

/// Text shown when no movie passes the filter.
pub const NO_MOVIE: &str = "AUCUN FILM";

/// Renders the single placeholder row spanning `columns` columns.
pub fn placeholder_row(columns: u8, theme: &Theme) -> Markup {
    html! {
        tr class=(theme.classes.row) {
            td colspan=(columns) {
                strong class=(theme.classes.placeholder) { (NO_MOVIE) }
            }
        }
    }
}
