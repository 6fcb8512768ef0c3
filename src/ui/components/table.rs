//! Management table renderers.
//!
//! Renders the wide (seven-column) and narrow (three-column) table bodies from
//! the same rows. Every row carries `data-movie-id` and `data-action` on its
//! delete link, so one delegated listener on the table handles rows inserted
//! after the listener was bound.

use maud::{html, Markup};

use super::empty::placeholder_row;
use super::stars;
use crate::app::modes::RowAction;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MovieRow;

/// Columns of the wide table.
pub const WIDE_COLUMNS: u8 = 7;

/// Columns of the narrow table.
pub const NARROW_COLUMNS: u8 = 3;

/// Renders the body rows of the wide table.
///
/// # Returns
///
/// One `<tr>` per row, or a single "AUCUN FILM" placeholder row spanning all
/// seven columns when `rows` is empty.
///
/// # Example
///
/// ```rust
/// use videotheque::ui::components::render_wide_rows;
/// use videotheque::ui::viewmodel::MovieRow;
/// use videotheque::ui::Theme;
///
/// let markup = render_wide_rows(&[], &Theme::default()).into_string();
/// assert!(markup.contains(r#"colspan="7""#));
/// ```
pub fn render_wide_rows(rows: &[MovieRow], theme: &Theme) -> Markup {
    if rows.is_empty() {
        return placeholder_row(WIDE_COLUMNS, theme);
    }

    html! {
        @for row in rows {
            tr class=(theme.classes.row) data-movie-id=(row.id) {
                th scope="row" { (row.id) }
                td { (row.movie_name) }
                td { (row.year_of_creation) }
                td { (row.director) }
                td { (row.category) }
                td { (stars(row.notation, theme)) }
                td { (delete_link(row, theme)) }
            }
        }
    }
}

/// Renders the body rows of the narrow table.
///
/// Each row stacks the labelled fields in a single cell between the id and the
/// delete link. An empty `rows` yields one placeholder spanning three columns.
pub fn render_narrow_rows(rows: &[MovieRow], theme: &Theme) -> Markup {
    if rows.is_empty() {
        return placeholder_row(NARROW_COLUMNS, theme);
    }

    html! {
        @for row in rows {
            tr data-movie-id=(row.id) {
                th scope="row" { (row.id) }
                td {
                    "Titre : " (row.movie_name) " " br;
                    "Année de sortie : " (row.year_of_creation) " " br;
                    "Réalisateur : " (row.director) " " br;
                    "Catégorie : " (row.category) " " br;
                    "Note : " (stars(row.notation, theme)) " " br;
                }
                th class=(theme.classes.row) { (delete_link(row, theme)) }
            }
        }
    }
}

fn delete_link(row: &MovieRow, theme: &Theme) -> Markup {
    html! {
        a id={ "submitConfirmDeleteMovie" (row.id) }
            data-movie-id=(row.id)
            data-movie-name=(row.movie_name)
            data-action=(RowAction::Delete.as_attribute())
            class=(theme.classes.delete_link) { "delete" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str) -> MovieRow {
        MovieRow {
            id,
            movie_name: name.to_string(),
            year_of_creation: "1979".to_string(),
            director: "Scott".to_string(),
            category: "Horreur".to_string(),
            notation: 4,
        }
    }

    #[test]
    fn wide_row_has_seven_cells_and_a_delete_hook() {
        let html = render_wide_rows(&[row(3, "Alien")], &Theme::default()).into_string();
        assert_eq!(html.matches("<td").count() + html.matches("<th").count(), 7);
        assert!(html.contains(r#"id="submitConfirmDeleteMovie3""#));
        assert!(html.contains(r#"data-action="delete""#));
    }

    #[test]
    fn narrow_row_labels_every_field() {
        let html = render_narrow_rows(&[row(3, "Alien")], &Theme::default()).into_string();
        for label in ["Titre : Alien", "Année de sortie : 1979", "Réalisateur : Scott", "Catégorie : Horreur", "Note : "] {
            assert!(html.contains(label), "missing {label}");
        }
    }

    #[test]
    fn titles_are_escaped() {
        let html = render_wide_rows(&[row(1, "<script>alert(1)</script>")], &Theme::default())
            .into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_rows_render_one_placeholder_each() {
        let theme = Theme::default();
        let wide = render_wide_rows(&[], &theme).into_string();
        let narrow = render_narrow_rows(&[], &theme).into_string();
        assert_eq!(wide.matches("AUCUN FILM").count(), 1);
        assert_eq!(narrow.matches("AUCUN FILM").count(), 1);
        assert!(narrow.contains(r#"colspan="3""#));
    }
}
