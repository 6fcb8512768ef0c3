//! Form helpers: add-movie validation, synopsis counter, star picker and
//! single-field edits.

use crate::api::{AddMovieRequest, CoverUpload, EditFieldRequest};
use crate::domain::error::{Result, VideothequeError};
use crate::domain::movie::parse_leading_int;
use crate::domain::MAX_NOTATION;

/// Maximum synopsis length accepted by the add form.
pub const SYNOPSIS_LIMIT: usize = 255;

/// Director stored when the field is left empty.
pub const DEFAULT_DIRECTOR: &str = "Inconnue";

/// Toast shown when an edit leaves the value unchanged.
pub const NO_CHANGE: &str = "Aucun changement détecté";

/// Counter text shown under the synopsis textarea.
///
/// # Example
///
/// ```rust
/// use videotheque::app::forms::synopsis_counter;
///
/// assert_eq!(synopsis_counter(""), "255 caractères restants");
/// assert_eq!(synopsis_counter("Un film"), "248 caractères restants");
/// ```
#[must_use]
pub fn synopsis_counter(synopsis: &str) -> String {
    let remaining = SYNOPSIS_LIMIT.saturating_sub(synopsis.chars().count());
    format!("{remaining} caractères restants")
}

/// Rating selected by clicking the star at `index` (0-based).
#[must_use]
pub fn rating_from_star_click(index: usize) -> u8 {
    u8::try_from(index.saturating_add(1))
        .unwrap_or(MAX_NOTATION)
        .min(MAX_NOTATION)
}

/// Raw values of the add-movie form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddMovieForm {
    pub movie_name: String,
    pub year_of_creation: String,
    pub director: String,
    pub category: String,
    pub synopsis: String,
    pub notation: Option<u8>,
    pub cover: Option<CoverUpload>,
}

impl AddMovieForm {
    /// Checks required fields and builds the multipart request.
    ///
    /// An empty director becomes [`DEFAULT_DIRECTOR`].
    ///
    /// # Errors
    ///
    /// Returns [`VideothequeError::Invalid`] when a required field is missing,
    /// the year is not a number, the rating is out of range or the synopsis is
    /// too long.
    pub fn validate(&self) -> Result<AddMovieRequest> {
        let required = |value: &str, label: &str| {
            if value.trim().is_empty() {
                Err(VideothequeError::Invalid(format!("Le champ {label} est obligatoire")))
            } else {
                Ok(value.trim().to_string())
            }
        };

        let movie_name = required(&self.movie_name, "titre")?;
        let year_of_creation = required(&self.year_of_creation, "année de sortie")?;
        if !year_of_creation.chars().all(|c| c.is_ascii_digit()) {
            return Err(VideothequeError::Invalid(
                "L'année de sortie doit être un nombre".to_string(),
            ));
        }
        let category = required(&self.category, "catégorie")?;
        let synopsis = required(&self.synopsis, "synopsis")?;
        if synopsis.chars().count() > SYNOPSIS_LIMIT {
            return Err(VideothequeError::Invalid(format!(
                "Le synopsis ne doit pas dépasser {SYNOPSIS_LIMIT} caractères"
            )));
        }

        let notation = match self.notation {
            Some(n) if n <= MAX_NOTATION => n,
            Some(_) => {
                return Err(VideothequeError::Invalid(format!(
                    "La note doit être comprise entre 0 et {MAX_NOTATION}"
                )))
            }
            None => {
                return Err(VideothequeError::Invalid(
                    "Le champ note est obligatoire".to_string(),
                ))
            }
        };

        let cover = self
            .cover
            .clone()
            .filter(|c| !c.bytes.is_empty())
            .ok_or_else(|| VideothequeError::Invalid("Une image de couverture est obligatoire".to_string()))?;

        let director = match self.director.trim() {
            "" => DEFAULT_DIRECTOR.to_string(),
            d => d.to_string(),
        };

        Ok(AddMovieRequest {
            movie_name,
            year_of_creation,
            director,
            category,
            synopsis,
            notation,
            cover,
        })
    }
}

/// One inline edit on the movie detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub movie_id: i64,
    /// Column name (`movie_name`, `director`, `notation`, ...).
    pub input_name: String,
    /// Value shown before editing.
    pub original: String,
    /// Value typed by the user.
    pub content: String,
}

impl FieldEdit {
    /// True when the new content equals the original, as text or as the same
    /// leading integer (`"4"` and `"4 "` are the same rating).
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        if self.content == self.original {
            return true;
        }
        matches!(
            (parse_leading_int(&self.content), parse_leading_int(&self.original)),
            (Some(a), Some(b)) if a == b
        )
    }

    /// Builds the update request, or `None` when there is nothing to send.
    #[must_use]
    pub fn to_request(&self) -> Option<EditFieldRequest> {
        if self.is_unchanged() {
            return None;
        }
        Some(EditFieldRequest {
            movie_id: self.movie_id,
            input_name: self.input_name.clone(),
            input_content: self.content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> AddMovieForm {
        AddMovieForm {
            movie_name: "Alien".into(),
            year_of_creation: "1979".into(),
            director: "  ".into(),
            category: "Horreur".into(),
            synopsis: "Dans l'espace, personne ne vous entend crier.".into(),
            notation: Some(4),
            cover: Some(CoverUpload {
                file_name: "alien.webp".into(),
                mime_type: "image/webp".into(),
                bytes: vec![0x52, 0x49, 0x46, 0x46],
            }),
        }
    }

    #[test]
    fn empty_director_defaults_to_unknown() {
        let request = complete_form().validate().unwrap();
        assert_eq!(request.director, DEFAULT_DIRECTOR);
        assert_eq!(request.notation, 4);
    }

    #[test]
    fn missing_cover_is_rejected() {
        let form = AddMovieForm {
            cover: None,
            ..complete_form()
        };
        assert!(matches!(form.validate(), Err(VideothequeError::Invalid(_))));
    }

    #[test]
    fn synopsis_over_limit_is_rejected() {
        let form = AddMovieForm {
            synopsis: "x".repeat(SYNOPSIS_LIMIT + 1),
            ..complete_form()
        };
        assert!(form.validate().is_err());
        assert_eq!(synopsis_counter(&"x".repeat(300)), "0 caractères restants");
    }

    #[test]
    fn star_click_is_one_based_and_capped() {
        assert_eq!(rating_from_star_click(0), 1);
        assert_eq!(rating_from_star_click(4), 5);
        assert_eq!(rating_from_star_click(usize::MAX), 5);
    }

    #[test]
    fn integer_equal_edit_is_unchanged() {
        let edit = FieldEdit {
            movie_id: 1,
            input_name: "notation".into(),
            original: "4".into(),
            content: "04".into(),
        };
        assert!(edit.is_unchanged());
        assert!(edit.to_request().is_none());
    }

    #[test]
    fn changed_text_builds_request() {
        let edit = FieldEdit {
            movie_id: 1,
            input_name: "director".into(),
            original: "Ridley Scott".into(),
            content: "R. Scott".into(),
        };
        let request = edit.to_request().unwrap();
        assert_eq!(request.input_content, "R. Scott");
    }
}
