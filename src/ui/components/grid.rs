//! Home page movie grid.
//!
//! One card per movie. Cards hidden by the category filter stay in the markup
//! with `display: none`, so switching category only toggles visibility.

use maud::{html, Markup};

use super::stars;
use crate::app::modes::RowAction;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{IndexCard, IndexViewModel};

/// Renders the grid container and its cards.
pub fn render_grid(vm: &IndexViewModel, theme: &Theme) -> Markup {
    html! {
        div.movies {
            @for card in &vm.cards {
                (render_card(card, theme))
            }
        }
    }
}

fn render_card(card: &IndexCard, theme: &Theme) -> Markup {
    let meta = &theme.classes.card_meta;
    let icon = &theme.classes.meta_icon;

    html! {
        div class=(theme.classes.card)
            data-movie-id=(card.id)
            data-category=(card.category)
            style=[(!card.visible).then_some("display: none")] {
            div class="movie-picture mb-1" {
                @if let Some(src) = &card.cover_src {
                    img.img-movie src=(src) alt=(card.movie_name);
                }
            }
            div.movie-title {
                h6 { (card.movie_name) }
            }
            hr;
            div class="d-flex gap-1 mb-1" {
                span class=(icon) { "category" }
                h6 class={ (meta) " categories" } { (card.category) }
            }
            div class="d-flex gap-1 mb-1" {
                span class=(icon) { "calendar_month" }
                h6 class=(meta) { (card.year_of_creation) }
            }
            div class="d-flex gap-1 mb-1" {
                (stars(card.notation, theme))
            }
            hr;
            div class="movie-action text-center" {
                a id={ "deleteButtonMovie" (card.id) }
                    data-movie-id=(card.id)
                    data-movie-name=(card.movie_name)
                    data-action=(RowAction::Delete.as_attribute())
                    class=(theme.classes.delete_link) { "delete" }
                a id={ "editButtonMovie" (card.id) }
                    href=(card.edit_href)
                    class=(theme.classes.edit_link) { "edit" }
                a id={ "showMore" (card.id) }
                    data-movie-id=(card.id)
                    data-action=(RowAction::ShowMore.as_attribute())
                    href="#"
                    class=(theme.classes.show_more_link) { "open_in_new" }
            }
        }
    }
}
