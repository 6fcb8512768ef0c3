//! Composable HTML fragment renderers.
//!
//! Each component renders one part of a page with `maud`, which escapes every
//! interpolated value, attributes included.
//!
//! # Components
//!
//! - [`table`]: Wide and narrow management table bodies
//! - [`empty`]: "AUCUN FILM" placeholder row
//! - [`header`]: Collection size label
//! - [`grid`]: Home page movie cards
//! - [`search`]: Provider search genres and result cards
//! - [`modal`]: Delete confirmation dialog
//! - [`toast`]: Transient notifications

mod empty;
mod grid;
mod header;
mod modal;
mod search;
mod table;
mod toast;

pub use empty::{placeholder_row, NO_MOVIE};
pub use grid::render_grid;
pub use header::render_count_label;
pub use modal::render_delete_confirmation;
pub use search::{render_genre_checkboxes, render_third_party_results, NO_IMAGE};
pub use table::{render_narrow_rows, render_wide_rows, NARROW_COLUMNS, WIDE_COLUMNS};
pub use toast::render_toast;

use maud::{html, Markup};

use crate::ui::helpers::star_counts;
use crate::ui::theme::Theme;

/// Renders a rating as gold stars followed by silver stars, five in total.
///
/// # Example
///
/// ```rust
/// use videotheque::ui::components::stars;
/// use videotheque::ui::Theme;
///
/// let html = stars(3, &Theme::default()).into_string();
/// assert_eq!(html.matches("star-gold").count(), 3);
/// assert_eq!(html.matches("star-silver").count(), 2);
/// ```
pub fn stars(rating: u8, theme: &Theme) -> Markup {
    let (gold, silver) = star_counts(rating);
    html! {
        div class=(theme.classes.rating) {
            @for _ in 0..gold {
                i class=(theme.classes.star_gold) { "star" }
            }
            @for _ in 0..silver {
                i class=(theme.classes.star_silver) { "star" }
            }
        }
    }
}
