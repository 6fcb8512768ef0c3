//! Movie metadata provider (TheMovieDB) results and import payloads.
//!
//! The server proxies every provider call; this module only models what the
//! client sends and receives: search queries, result cards, and the payload used
//! to copy a provider movie into the user's own collection.

use serde::{Deserialize, Deserializer, Serialize};

use super::movie::{lenient_i64, lenient_string, MAX_NOTATION};

/// Maximum synopsis length kept when importing a provider movie.
pub const IMPORT_SYNOPSIS_LIMIT: usize = 500;

/// Genres offered as checkboxes for the "by category" provider search.
pub const GENRES: [&str; 20] = [
    "Action",
    "Aventure",
    "Animation",
    "Comedie",
    "Drame",
    "Science-fiction",
    "Horreur",
    "Fantaisie",
    "Thriller",
    "Romance",
    "Documentaire",
    "Crime",
    "Mystere",
    "Guerre",
    "Historique",
    "Musique",
    "Familial",
    "Sport",
    "Biographie",
    "Western",
];

/// A movie returned by a provider search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThirdPartyMovie {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub title: String,
    /// Genre names. Search results list plain names; the details endpoint
    /// sends `{id, name}` objects.
    #[serde(default, deserialize_with = "genre_names")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub release_date: String,
    /// Provider rating on a 0–10 scale.
    #[serde(default)]
    pub user_rating: f64,
    /// Provider path of the poster (`/abc.jpg`), absent for some titles.
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenreEntry {
    Name(String),
    Object { name: String },
}

fn genre_names<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<GenreEntry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            GenreEntry::Name(name) | GenreEntry::Object { name } => name,
        })
        .collect())
}

/// A provider search as offered by the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThirdPartyQuery {
    /// Search by title.
    ByName(String),
    /// Search by one or more genres.
    ByCategories(Vec<String>),
    /// Search by release year.
    ByYear(String),
}

impl ThirdPartyQuery {
    /// Operation identifier understood by the server proxy.
    #[must_use]
    pub const fn operation_id(&self) -> u8 {
        match self {
            Self::ByName(_) => 1,
            Self::ByCategories(_) => 2,
            Self::ByYear(_) => 3,
        }
    }

    /// Value of the `searchInputValue` query parameter.
    ///
    /// Categories travel as a JSON array encoded in a string.
    #[must_use]
    pub fn search_input_value(&self) -> String {
        match self {
            Self::ByName(value) | Self::ByYear(value) => value.clone(),
            Self::ByCategories(categories) => {
                serde_json::to_string(categories).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }
}

/// Payload that copies a provider movie into the user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub title: String,
    /// File name of the provider poster (`abc.jpg`).
    pub cover_image: String,
    pub release_date: String,
    /// First genre of the provider movie.
    pub category: String,
    /// Provider rating brought down to the 0–5 scale.
    pub notation: u8,
    pub synopsis: String,
}

impl ImportRequest {
    /// Builds the import payload for a provider movie.
    ///
    /// # Examples
    ///
    /// ```
    /// use videotheque::domain::{ImportRequest, ThirdPartyMovie};
    ///
    /// let movie = ThirdPartyMovie {
    ///     id: 348,
    ///     title: "Alien".to_string(),
    ///     genres: vec!["Horreur".to_string(), "Science-Fiction".to_string()],
    ///     release_date: "1979-05-25".to_string(),
    ///     user_rating: 8.1,
    ///     cover_photo: Some("/vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg".to_string()),
    ///     synopsis: Some("Le Nostromo...".to_string()),
    /// };
    /// let import = ImportRequest::from_movie(&movie);
    /// assert_eq!(import.cover_image, "vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg");
    /// assert_eq!(import.category, "Horreur");
    /// assert_eq!(import.notation, 4);
    /// ```
    #[must_use]
    pub fn from_movie(movie: &ThirdPartyMovie) -> Self {
        let cover_image = movie
            .cover_photo
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or_default()
            .to_string();

        let category = movie
            .genres
            .first()
            .map(|g| g.trim().to_string())
            .unwrap_or_default();

        let synopsis: String = movie
            .synopsis
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(IMPORT_SYNOPSIS_LIMIT)
            .collect();

        Self {
            title: movie.title.clone(),
            cover_image,
            release_date: movie.release_date.clone(),
            category,
            notation: rating_out_of_five(movie.user_rating),
            synopsis,
        }
    }
}

/// Converts a 0–10 provider rating to the collection's 0–5 scale, rounding
/// half away from zero.
#[must_use]
pub fn rating_out_of_five(user_rating: f64) -> u8 {
    if !user_rating.is_finite() || user_rating <= 0.0 {
        return 0;
    }
    let halved = (user_rating / 2.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let notation = halved.min(f64::from(MAX_NOTATION)) as u8;
    notation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_sent_as_a_json_array() {
        let query = ThirdPartyQuery::ByCategories(vec!["Drame".into(), "Western".into()]);
        assert_eq!(query.operation_id(), 2);
        assert_eq!(query.search_input_value(), r#"["Drame","Western"]"#);
    }

    #[test]
    fn rating_conversion_rounds_half_up() {
        assert_eq!(rating_out_of_five(7.0), 4);
        assert_eq!(rating_out_of_five(6.9), 3);
        assert_eq!(rating_out_of_five(10.0), 5);
        assert_eq!(rating_out_of_five(0.0), 0);
        assert_eq!(rating_out_of_five(f64::NAN), 0);
    }

    #[test]
    fn import_truncates_long_synopsis() {
        let movie = ThirdPartyMovie {
            id: 1,
            title: "Long".into(),
            genres: vec![],
            release_date: "2001".into(),
            user_rating: 5.0,
            cover_photo: None,
            synopsis: Some("é".repeat(600)),
        };
        let import = ImportRequest::from_movie(&movie);
        assert_eq!(import.synopsis.chars().count(), IMPORT_SYNOPSIS_LIMIT);
        assert_eq!(import.cover_image, "");
        assert_eq!(import.category, "");
    }

    #[test]
    fn genres_accept_names_or_objects() {
        let from_search: ThirdPartyMovie = serde_json::from_str(
            r#"{"id":1,"title":"Alien","genres":["Horreur"],"release_date":"1979"}"#,
        )
        .unwrap();
        let from_details: ThirdPartyMovie = serde_json::from_str(
            r#"{"id":"1","title":"Alien","genres":[{"id":27,"name":"Horreur"}],"user_rating":8.1}"#,
        )
        .unwrap();
        assert_eq!(from_search.genres, vec!["Horreur".to_string()]);
        assert_eq!(from_details.genres, from_search.genres);
        assert_eq!(from_details.id, 1);
    }

    #[test]
    fn import_serializes_with_camel_case_keys() {
        let import = ImportRequest {
            title: "Alien".into(),
            cover_image: "a.jpg".into(),
            release_date: "1979".into(),
            category: "Horreur".into(),
            notation: 4,
            synopsis: String::new(),
        };
        let value = serde_json::to_value(&import).unwrap();
        assert_eq!(value["coverImage"], "a.jpg");
        assert_eq!(value["releaseDate"], "1979");
    }
}
