//! Movie domain model.
//!
//! [`MovieRecord`] is the server-supplied record shown in every collection view.
//! The server is loose about JSON types (years and ratings arrive either as
//! numbers or as strings, depending on which code path stored them), so the
//! record is decoded through a permissive wire shape and normalized once here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

/// Highest rating a movie can carry.
pub const MAX_NOTATION: u8 = 5;

/// Image format assumed when an inline cover carries no format tag.
const DEFAULT_IMAGE_FORMAT: &str = "webp";

/// Number of leading characters inspected when deciding whether a cover
/// payload is an external file path rather than base64 data.
const EXTERNAL_PROBE_CHARS: usize = 50;

static EXTERNAL_IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(jpg|png|webp)").expect("cover extension pattern is valid")
});

/// Where the cover picture of a movie comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverImage {
    /// Base64 payload stored by the server, rebuilt as a `data:` URL.
    Inline {
        /// Lower-cased image format (`webp`, `png`, ...).
        format: String,
        /// Raw base64 payload.
        base64: String,
    },
    /// File path hosted by the movie metadata provider (imported movies).
    External(String),
    /// No picture in this listing (the management listing strips covers).
    None,
}

impl CoverImage {
    /// Classifies a cover payload as received from the server.
    ///
    /// A payload whose first 50 characters contain a `.jpg`, `.png` or `.webp`
    /// extension (any case) is a provider-hosted path; anything else is base64.
    ///
    /// # Examples
    ///
    /// ```
    /// use videotheque::domain::CoverImage;
    ///
    /// let cover = CoverImage::from_payload(Some("kqjL17yufvn9OVLyXYpvtyrFfak.jpg"), None);
    /// assert_eq!(cover, CoverImage::External("kqjL17yufvn9OVLyXYpvtyrFfak.jpg".to_string()));
    ///
    /// let inline = CoverImage::from_payload(Some("UklGRiQAAABXRUJQ"), Some("PNG"));
    /// assert_eq!(inline.src("https://image.tmdb.org/t/p/w500").as_deref(),
    ///            Some("data:image/png;base64,UklGRiQAAABXRUJQ"));
    /// ```
    #[must_use]
    pub fn from_payload(payload: Option<&str>, format: Option<&str>) -> Self {
        let Some(payload) = payload.filter(|p| !p.is_empty()) else {
            return Self::None;
        };

        let probe: String = payload.chars().take(EXTERNAL_PROBE_CHARS).collect();
        if EXTERNAL_IMAGE_PATTERN.is_match(&probe) {
            return Self::External(payload.to_string());
        }

        let format = format
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map_or_else(|| DEFAULT_IMAGE_FORMAT.to_string(), str::to_lowercase);

        Self::Inline {
            format,
            base64: payload.to_string(),
        }
    }

    /// Returns the `src` attribute value for this cover, if any.
    ///
    /// External paths are joined onto `cover_base_url`.
    #[must_use]
    pub fn src(&self, cover_base_url: &str) -> Option<String> {
        match self {
            Self::Inline { format, base64 } => Some(format!("data:image/{format};base64,{base64}")),
            Self::External(path) => Some(join_cover_url(cover_base_url, path)),
            Self::None => None,
        }
    }
}

/// Joins a provider base URL and an image path with exactly one slash.
#[must_use]
pub fn join_cover_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// A movie of the user's collection.
///
/// Read-only on the client: edits and deletions go through the server and the
/// list is fetched again afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireMovieRecord")]
pub struct MovieRecord {
    pub id: i64,
    pub movie_name: String,
    pub director: String,
    pub category: String,
    pub year_of_creation: String,
    /// Rating on a 0–5 scale. Values above 5 are kept as received.
    pub notation: u8,
    pub cover_image: CoverImage,
    pub synopsis: String,
}

impl MovieRecord {
    /// Creates a record without cover or synopsis.
    ///
    /// # Examples
    ///
    /// ```
    /// use videotheque::domain::MovieRecord;
    ///
    /// let alien = MovieRecord::new(1, "Alien", "Scott", "Horreur", "1979", 4);
    /// assert_eq!(alien.movie_name, "Alien");
    /// ```
    #[must_use]
    pub fn new(
        id: i64,
        movie_name: impl Into<String>,
        director: impl Into<String>,
        category: impl Into<String>,
        year_of_creation: impl Into<String>,
        notation: u8,
    ) -> Self {
        Self {
            id,
            movie_name: movie_name.into(),
            director: director.into(),
            category: category.into(),
            year_of_creation: year_of_creation.into(),
            notation,
            cover_image: CoverImage::None,
            synopsis: String::new(),
        }
    }

    /// Returns the record with the given synopsis.
    #[must_use]
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = synopsis.into();
        self
    }

    /// Returns the record with the given cover.
    #[must_use]
    pub fn with_cover(mut self, cover_image: CoverImage) -> Self {
        self.cover_image = cover_image;
        self
    }

    /// Lower-cased fields that take part in free-text search.
    #[must_use]
    pub fn searchable_fields(&self) -> [String; 4] {
        [
            self.movie_name.to_lowercase(),
            self.director.to_lowercase(),
            self.category.to_lowercase(),
            self.year_of_creation.to_lowercase(),
        ]
    }
}

/// Wire shape of a movie as the server sends it.
#[derive(Debug, Deserialize)]
struct WireMovieRecord {
    #[serde(deserialize_with = "lenient_i64")]
    id: i64,
    movie_name: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    year_of_creation: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    notation: i64,
    #[serde(default)]
    cover_image_base64: Option<String>,
    #[serde(default)]
    cover_image_format: Option<String>,
    #[serde(default)]
    synopsis: String,
}

impl From<WireMovieRecord> for MovieRecord {
    fn from(wire: WireMovieRecord) -> Self {
        let cover_image = CoverImage::from_payload(
            wire.cover_image_base64.as_deref(),
            wire.cover_image_format.as_deref(),
        );
        Self {
            id: wire.id,
            movie_name: wire.movie_name,
            director: wire.director,
            category: wire.category,
            year_of_creation: wire.year_of_creation,
            notation: u8::try_from(wire.notation.clamp(0, i64::from(u8::MAX))).unwrap_or(0),
            cover_image,
            synopsis: wire.synopsis,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts a JSON string or number and keeps its textual form.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Int(n)) => n.to_string(),
        Some(NumberOrText::Float(f)) => f.to_string(),
        Some(NumberOrText::Text(s)) => s,
        None => String::new(),
    })
}

/// Accepts a JSON number or a string starting with digits, the way
/// `parseInt` reads it. Unparseable text yields 0.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Int(n)) => n,
        #[allow(clippy::cast_possible_truncation)]
        Some(NumberOrText::Float(f)) => f.trunc() as i64,
        Some(NumberOrText::Text(s)) => parse_leading_int(&s).unwrap_or(0),
        None => 0,
    })
}

/// Parses the leading integer of `text`, ignoring surrounding whitespace and
/// any trailing garbage (`"4 étoiles"` → 4).
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_numeric_year_and_string_rating() {
        let record: MovieRecord = serde_json::from_value(json!({
            "id": 7,
            "movie_name": "Heat",
            "director": "Mann",
            "category": "Crime",
            "year_of_creation": 1995,
            "notation": "4",
            "synopsis": "LA, 1995."
        }))
        .unwrap();

        assert_eq!(record.year_of_creation, "1995");
        assert_eq!(record.notation, 4);
        assert_eq!(record.cover_image, CoverImage::None);
    }

    #[test]
    fn builder_sets_cover() {
        let record = MovieRecord::new(1, "Alien", "Scott", "Horreur", "1979", 4)
            .with_cover(CoverImage::External("/alien.jpg".to_string()));
        assert_eq!(record.cover_image, CoverImage::External("/alien.jpg".to_string()));
    }

    #[test]
    fn external_cover_is_detected_case_insensitively() {
        let cover = CoverImage::from_payload(Some("/poster.WEBP"), Some("png"));
        assert_eq!(cover, CoverImage::External("/poster.WEBP".to_string()));
        assert_eq!(
            cover.src("https://image.tmdb.org/t/p/w500/").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.WEBP")
        );
    }

    #[test]
    fn extension_beyond_probe_window_is_inline_data() {
        let payload = format!("{}.png", "A".repeat(60));
        let cover = CoverImage::from_payload(Some(&payload), None);
        assert!(matches!(cover, CoverImage::Inline { ref format, .. } if format == "webp"));
    }

    #[test]
    fn leading_int_parsing_matches_parse_int() {
        assert_eq!(parse_leading_int(" 3 étoiles"), Some(3));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("abc"), None);
    }

    #[test]
    fn negative_rating_is_floored_at_zero() {
        let record: MovieRecord = serde_json::from_value(json!({
            "id": "12",
            "movie_name": "X",
            "notation": -3
        }))
        .unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.notation, 0);
    }
}
