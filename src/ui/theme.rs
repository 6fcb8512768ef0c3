//! CSS class themes for the generated markup.
//!
//! The markup structure never changes; a theme only decides which CSS classes
//! decorate it, so the same fragments can be dropped into the Bootstrap +
//! Material Icons pages or into an unstyled test page.
//!
//! # Built-in Themes
//!
//! - `bootstrap`: Classes used by the videotheque pages (default)
//! - `plain`: Neutral semantic class names
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [classes]
//! row = "text-center"
//! placeholder = "color_7"
//! delete_link = "material-icons color_7"
//! edit_link = "material-icons color_3"
//! show_more_link = "material-icons color_2"
//! rating = "movie-rating"
//! star_gold = "material-icons star-gold"
//! star_silver = "material-icons star-silver"
//! card = "movie"
//! card_meta = "font-size-M color_8"
//! meta_icon = "material-icons font-size-XL color_8"
//! toast_success = "text-success"
//! toast_danger = "text-danger"
//! ```

use crate::domain::error::{Result, VideothequeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named set of CSS classes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Classes for every decorated element.
    pub classes: ThemeClasses,
}

/// CSS classes for every decorated element.
///
/// Values are whole `class` attribute strings and may hold several classes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeClasses {
    /// Wide table rows and the placeholder row.
    pub row: String,
    /// Text of the "no movie" placeholder.
    pub placeholder: String,

    /// Delete action link.
    pub delete_link: String,
    /// Edit action link.
    pub edit_link: String,
    /// Show-more action link.
    pub show_more_link: String,

    /// Star rating container.
    pub rating: String,
    /// Filled star.
    pub star_gold: String,
    /// Empty star.
    pub star_silver: String,

    /// Index grid card.
    pub card: String,
    /// Secondary text on cards.
    pub card_meta: String,
    /// Icons in front of card metadata.
    #[serde(default)]
    pub meta_icon: String,

    /// Success toast text.
    pub toast_success: String,
    /// Error toast text.
    pub toast_danger: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    ///
    /// # Example
    ///
    /// ```rust
    /// use videotheque::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("bootstrap").unwrap();
    /// assert_eq!(theme.classes.star_gold, "material-icons star-gold");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "bootstrap" => include_str!("../../themes/bootstrap.toml"),
            "plain" => include_str!("../../themes/plain.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VideothequeError::Theme`] if:
    /// - The file cannot be read (file not found, permission denied, etc.)
    /// - The TOML content cannot be parsed (invalid syntax, missing fields)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| VideothequeError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| VideothequeError::Theme(format!("Failed to parse theme TOML: {e}")))
    }
}

impl Default for Theme {
    /// Returns the default theme (`bootstrap`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("bootstrap").expect("Built-in bootstrap theme should always parse")
    }
}
