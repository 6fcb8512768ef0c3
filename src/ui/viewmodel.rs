//! View model types representing renderable page state.
//!
//! View models are computed on demand from [`AppState`](crate::app::AppState)
//! and consumed by the components. They hold display-ready values only; no
//! filtering or decoding happens past this point.

use crate::domain::{MovieRecord, ThirdPartyMovie};
use crate::ui::helpers;
use crate::ui::layout::Layout;

/// One movie as shown in the management tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: i64,
    pub movie_name: String,
    pub year_of_creation: String,
    pub director: String,
    pub category: String,
    pub notation: u8,
}

impl From<&MovieRecord> for MovieRow {
    fn from(record: &MovieRecord) -> Self {
        Self {
            id: record.id,
            movie_name: record.movie_name.clone(),
            year_of_creation: record.year_of_creation.clone(),
            director: record.director.clone(),
            category: record.category.clone(),
            notation: record.notation,
        }
    }
}

/// The management view: both tables plus the count label.
///
/// `rows` is filtered once; both layouts are rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementViewModel {
    pub rows: Vec<MovieRow>,
    pub layout: Layout,
    /// `Nombre total de films : N`, absent until the first listing arrives.
    pub count_label: Option<String>,
}

/// One card of the home page grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCard {
    pub id: i64,
    pub movie_name: String,
    pub category: String,
    pub year_of_creation: String,
    pub notation: u8,
    pub cover_src: Option<String>,
    pub edit_href: String,
    /// False when the category filter hides the card.
    pub visible: bool,
}

impl IndexCard {
    #[must_use]
    pub fn from_record(record: &MovieRecord, cover_base_url: &str, visible: bool) -> Self {
        Self {
            id: record.id,
            movie_name: record.movie_name.clone(),
            category: record.category.clone(),
            year_of_creation: record.year_of_creation.clone(),
            notation: record.notation,
            cover_src: record.cover_image.src(cover_base_url),
            edit_href: helpers::edit_href(record),
            visible,
        }
    }
}

/// The home page grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexViewModel {
    pub cards: Vec<IndexCard>,
}

/// One metadata provider search result.
#[derive(Debug, Clone, PartialEq)]
pub struct ThirdPartyCard {
    pub id: i64,
    pub title: String,
    pub cover_src: Option<String>,
    /// Genres joined with `", "`.
    pub genres: String,
    pub release_date: String,
    pub user_rating: f64,
}

impl ThirdPartyCard {
    #[must_use]
    pub fn from_movie(movie: &ThirdPartyMovie, cover_base_url: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            cover_src: movie
                .cover_photo
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| crate::domain::movie::join_cover_url(cover_base_url, p)),
            genres: movie.genres.join(", "),
            release_date: movie.release_date.clone(),
            user_rating: movie.user_rating,
        }
    }
}

/// Pending delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub movie_id: i64,
    pub movie_name: String,
}
