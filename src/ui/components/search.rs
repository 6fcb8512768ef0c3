//! Metadata provider search: genre checkboxes and result cards.

use maud::{html, Markup};

use crate::app::modes::RowAction;
use crate::domain::GENRES;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ThirdPartyCard;

/// Shown in place of a missing provider poster.
pub const NO_IMAGE: &str = "Image non disponible";

/// Renders one checkbox per known genre for the "by category" search.
pub fn render_genre_checkboxes() -> Markup {
    html! {
        @for (i, genre) in GENRES.iter().enumerate() {
            div.form-check {
                input.form-check-input type="checkbox" name="movieCategory"
                    id={ "category" (i) } value=(genre);
                label.form-check-label for={ "category" (i) } { (genre) }
            }
        }
    }
}

/// Renders the search result cards.
///
/// # Example
///
/// ```rust
/// use videotheque::ui::components::render_third_party_results;
/// use videotheque::ui::Theme;
///
/// let html = render_third_party_results(&[], &Theme::default()).into_string();
/// assert_eq!(html, r#"<div id="searchResults"></div>"#);
/// ```
pub fn render_third_party_results(cards: &[ThirdPartyCard], theme: &Theme) -> Markup {
    let meta = &theme.classes.card_meta;
    let icon = &theme.classes.meta_icon;

    html! {
        div #searchResults {
            @for card in cards {
                div class=(theme.classes.card) data-movie-id=(card.id) {
                    @if let Some(src) = &card.cover_src {
                        div class="movie-picture mb-1" {
                            img.img-movie src=(src) alt=(card.title);
                        }
                    } @else {
                        div class="movie-picture mb-1 default-image-background" { (NO_IMAGE) }
                    }
                    div.movie-title {
                        h6 { (card.title) }
                    }
                    hr;
                    div class="d-flex gap-1 mb-1" {
                        span class=(icon) { "category" }
                        h6 class=(meta) { (card.genres) }
                    }
                    div class="d-flex gap-1 mb-1" {
                        span class=(icon) { "calendar_month" }
                        h6 class=(meta) { (card.release_date) }
                    }
                    div class={ (theme.classes.rating) " d-flex gap-1 mb-1" } {
                        span class=(icon) { "stars" }
                        h6 class=(meta) { (card.user_rating) }
                    }
                    div class="text-center" {
                        a data-movie-id=(card.id)
                            data-movie-cover=[card.cover_src.as_deref()]
                            data-action=(RowAction::ThirdPartyDetails.as_attribute())
                            class={ (theme.classes.show_more_link) " movie_click" } { "open_in_new" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_genre_gets_a_checkbox() {
        let html = render_genre_checkboxes().into_string();
        assert_eq!(html.matches(r#"type="checkbox""#).count(), GENRES.len());
        assert!(html.contains(r#"value="Science-fiction""#));
    }

    #[test]
    fn result_without_cover_shows_placeholder() {
        let card = ThirdPartyCard {
            id: 5,
            title: "Nosferatu".into(),
            cover_src: None,
            genres: "Horreur, Fantaisie".into(),
            release_date: "1922-03-04".into(),
            user_rating: 7.7,
        };
        let html = render_third_party_results(&[card], &Theme::default()).into_string();
        assert!(html.contains(NO_IMAGE));
        assert!(html.contains("Horreur, Fantaisie"));
        assert!(!html.contains("data-movie-cover"));
    }
}
