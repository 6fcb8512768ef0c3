//! Small state machine types for the page controller.

/// Which listing endpoint a collection store is fed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    /// Home page grid: records with covers, filtered by category only.
    Index,
    /// Management view: records without covers, plus the total count.
    Management,
}

/// Action named by a clicked element's `data-action` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Opens the delete confirmation.
    Delete,
    /// Opens the movie detail page.
    ShowMore,
    /// Loads the details of a provider search result.
    ThirdPartyDetails,
}

impl RowAction {
    /// Parses a `data-action` attribute value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use videotheque::app::modes::RowAction;
    ///
    /// assert_eq!(RowAction::from_attribute("delete"), Some(RowAction::Delete));
    /// assert_eq!(RowAction::from_attribute("rename"), None);
    /// ```
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "delete" => Some(Self::Delete),
            "show-more" => Some(Self::ShowMore),
            "third-party-details" => Some(Self::ThirdPartyDetails),
            _ => None,
        }
    }

    /// The `data-action` attribute value rendered for this action.
    #[must_use]
    pub const fn as_attribute(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::ShowMore => "show-more",
            Self::ThirdPartyDetails => "third-party-details",
        }
    }
}
