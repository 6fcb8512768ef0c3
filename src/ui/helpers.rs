//! Shared rendering utilities.
//!
//! Small pure functions used by several components: star counts and the
//! edit-page link.

use crate::domain::{MovieRecord, MAX_NOTATION};

/// Number of gold and silver stars for `rating`.
///
/// Ratings above the scale are shown as a full row of gold stars, so the row
/// always holds exactly five glyphs.
///
/// # Example
///
/// ```rust
/// use videotheque::ui::helpers::star_counts;
///
/// assert_eq!(star_counts(3), (3, 2));
/// assert_eq!(star_counts(9), (5, 0));
/// ```
#[must_use]
pub fn star_counts(rating: u8) -> (usize, usize) {
    let gold = rating.min(MAX_NOTATION);
    (usize::from(gold), usize::from(MAX_NOTATION - gold))
}

/// Link to the edit page of `record`, carrying its current values so the page
/// can pre-fill the form.
///
/// Every query value is percent-encoded.
#[must_use]
pub fn edit_href(record: &MovieRecord) -> String {
    let enc = |value: &str| urlencoding::encode(value).into_owned();
    format!(
        "/edit-movie/{}?category={}&name={}&year={}&director={}&synopsis={}&rating={}",
        record.id,
        enc(&record.category),
        enc(&record.movie_name),
        enc(&record.year_of_creation),
        enc(&record.director),
        enc(&record.synopsis),
        record.notation,
    )
}
