//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the state container for one page of the
//! collection client, together with [`MovieCollectionStore`] and its
//! [`FilterState`]. It is the single source of truth for everything the page
//! renders.
//!
//! # Architecture
//!
//! `AppState` keeps fetched records apart from the filter applied to them.
//! Visible records are never cached: they are recomputed from the current list
//! and filter whenever a view model is built, so a new list or a new filter can
//! never leave a stale view behind.
//!
//! # State Components
//!
//! - **Index store**: home page records, filtered by category only
//! - **Management store**: management records, category and search filters,
//!   server-reported total
//! - **Viewport**: width and breakpoint deciding the table layout
//! - **Sequencer**: tickets of in-flight requests, one slot per channel
//! - **Dialogs**: pending delete confirmation and provider search results
//!
//! # Example
//!
//! ```rust
//! use videotheque::app::AppState;
//! use videotheque::domain::MovieRecord;
//! use videotheque::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), 1024);
//! state.management.replace(vec![MovieRecord::new(1, "Alien", "Scott", "Horreur", "1979", 4)], Some(1));
//! state.management.set_search_term("ALI");
//! assert_eq!(state.compute_management_viewmodel().rows.len(), 1);
//! ```

use std::collections::HashMap;

use crate::api::{RequestSequencer, Ticket};
use crate::app::forms::FieldEdit;
use crate::domain::{MovieRecord, ThirdPartyMovie};
use crate::ui::layout::{select_layout, Layout, DEFAULT_BREAKPOINT_PX};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DeleteConfirmation, IndexCard, IndexViewModel, ManagementViewModel, MovieRow, ThirdPartyCard,
};

/// Select values meaning "no category filter" on the management and index pages.
pub const ALL_CATEGORY_SENTINELS: [&str; 2] = ["Tous", "Toutes"];

/// Default prefix of provider cover paths.
pub const DEFAULT_COVER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Category half of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interprets the category select value.
    ///
    /// No selection, an empty value and the "all" sentinels all mean [`CategoryFilter::All`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use videotheque::app::state::CategoryFilter;
    ///
    /// assert_eq!(CategoryFilter::from_selection(Some("Toutes")), CategoryFilter::All);
    /// assert_eq!(CategoryFilter::from_selection(None), CategoryFilter::All);
    /// assert_eq!(
    ///     CategoryFilter::from_selection(Some("Drame")),
    ///     CategoryFilter::Only("Drame".into())
    /// );
    /// ```
    #[must_use]
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            None => Self::All,
            Some(s) if s.is_empty() || ALL_CATEGORY_SENTINELS.contains(&s) => Self::All,
            Some(s) => Self::Only(s.to_string()),
        }
    }

    /// Exact, case-sensitive category match.
    #[must_use]
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// Filter applied to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    /// Always stored lower-cased.
    search_term: String,
}

impl FilterState {
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_lowercase();
    }

    /// A record is visible when its category passes and the search term is
    /// empty or a substring of its lower-cased name, director, category or year.
    #[must_use]
    pub fn matches(&self, record: &MovieRecord) -> bool {
        if !self.category.accepts(&record.category) {
            return false;
        }
        self.search_term.is_empty()
            || record
                .searchable_fields()
                .iter()
                .any(|field| field.contains(&self.search_term))
    }
}

/// Records fetched from one listing endpoint and the filter applied to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieCollectionStore {
    records: Vec<MovieRecord>,
    /// Server-reported size; only the management listing provides one.
    total_count: Option<u64>,
    filter: FilterState,
    loaded: bool,
}

impl MovieCollectionStore {
    /// Replaces the held list wholesale. The filter is kept.
    pub fn replace(&mut self, records: Vec<MovieRecord>, total_count: Option<u64>) {
        tracing::debug!(count = records.len(), ?total_count, "collection replaced");
        self.records = records;
        self.total_count = total_count;
        self.loaded = true;
    }

    pub fn set_category(&mut self, selection: Option<&str>) {
        self.filter.category = CategoryFilter::from_selection(selection);
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.filter.set_search_term(term);
    }

    /// Sets both halves of the filter at once. No I/O.
    pub fn set_filter(&mut self, selection: Option<&str>, term: &str) {
        self.set_category(selection);
        self.set_search_term(term);
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// True once a listing has been accepted.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Records passing the filter, in server order.
    #[must_use]
    pub fn visible_records(&self) -> Vec<&MovieRecord> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .collect()
    }

    /// `Nombre total de films : N`, once a total is known.
    #[must_use]
    pub fn count_label(&self) -> Option<String> {
        self.total_count
            .map(|n| format!("Nombre total de films : {n}"))
    }

    #[must_use]
    pub fn find(&self, movie_id: i64) -> Option<&MovieRecord> {
        self.records.iter().find(|r| r.id == movie_id)
    }
}

/// Central application state container.
///
/// Mutated by the event handler only. Rendering reads it through the
/// `compute_*` methods.
#[derive(Debug)]
pub struct AppState {
    /// Home page grid records.
    pub index: MovieCollectionStore,

    /// Management table records.
    pub management: MovieCollectionStore,

    /// Last reported viewport width in CSS pixels.
    pub viewport_width: u32,

    /// Width at or below which the narrow table is shown.
    pub breakpoint_px: u32,

    /// Layout derived from `viewport_width` and `breakpoint_px`.
    ///
    /// Kept in sync by [`AppState::resize`].
    pub layout: Layout,

    /// CSS classes used by the components.
    pub theme: Theme,

    /// Prefix joined to provider cover paths.
    pub cover_base_url: String,

    /// In-flight request bookkeeping.
    pub sequencer: RequestSequencer,

    /// Movie awaiting delete confirmation.
    pub pending_delete: Option<DeleteConfirmation>,

    /// Field edits sent and not yet acknowledged, by request.
    pub pending_edits: HashMap<Ticket, FieldEdit>,

    /// Last provider search results.
    pub third_party_results: Vec<ThirdPartyMovie>,

    /// Provider movie currently opened for import.
    pub third_party_details: Option<ThirdPartyMovie>,
}

impl AppState {
    /// Creates an empty state for a viewport of `viewport_width` pixels.
    ///
    /// # Parameters
    ///
    /// * `theme` - Classes used when rendering
    /// * `viewport_width` - Initial viewport width in CSS pixels
    ///
    /// # Returns
    ///
    /// A state with empty stores, no filter and the default breakpoint.
    #[must_use]
    pub fn new(theme: Theme, viewport_width: u32) -> Self {
        Self {
            index: MovieCollectionStore::default(),
            management: MovieCollectionStore::default(),
            viewport_width,
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            layout: select_layout(viewport_width, DEFAULT_BREAKPOINT_PX),
            theme,
            cover_base_url: DEFAULT_COVER_BASE_URL.to_string(),
            sequencer: RequestSequencer::default(),
            pending_delete: None,
            pending_edits: HashMap::new(),
            third_party_results: Vec::new(),
            third_party_details: None,
        }
    }

    /// Returns the state with another breakpoint, relaying out immediately.
    #[must_use]
    pub fn with_breakpoint(mut self, breakpoint_px: u32) -> Self {
        self.breakpoint_px = breakpoint_px;
        self.layout = select_layout(self.viewport_width, breakpoint_px);
        self
    }

    #[must_use]
    pub fn with_cover_base_url(mut self, cover_base_url: impl Into<String>) -> Self {
        self.cover_base_url = cover_base_url.into();
        self
    }

    /// Records a viewport width and recomputes the layout.
    ///
    /// Returns true when the layout changed. Calling it twice with the same
    /// width changes nothing the second time.
    pub fn resize(&mut self, width: u32) -> bool {
        self.viewport_width = width;
        let layout = select_layout(width, self.breakpoint_px);
        let changed = layout != self.layout;
        self.layout = layout;
        changed
    }

    /// Builds the management view model.
    ///
    /// Records are filtered once; both table layouts render from the same rows.
    #[must_use]
    pub fn compute_management_viewmodel(&self) -> ManagementViewModel {
        ManagementViewModel {
            rows: self
                .management
                .visible_records()
                .into_iter()
                .map(MovieRow::from)
                .collect(),
            layout: self.layout,
            count_label: self.management.count_label(),
        }
    }

    /// Builds the home page grid.
    ///
    /// Every record gets a card; cards rejected by the category filter are
    /// marked hidden rather than dropped.
    #[must_use]
    pub fn compute_index_viewmodel(&self) -> IndexViewModel {
        let filter = self.index.filter();
        IndexViewModel {
            cards: self
                .index
                .records()
                .iter()
                .map(|record| {
                    IndexCard::from_record(record, &self.cover_base_url, filter.matches(record))
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn third_party_cards(&self) -> Vec<ThirdPartyCard> {
        self.third_party_results
            .iter()
            .map(|movie| ThirdPartyCard::from_movie(movie, &self.cover_base_url))
            .collect()
    }

    /// Looks a movie up in the index store first, then the management store.
    #[must_use]
    pub fn find_movie(&self, movie_id: i64) -> Option<&MovieRecord> {
        self.index
            .find(movie_id)
            .or_else(|| self.management.find(movie_id))
    }

    #[must_use]
    pub fn find_third_party(&self, movie_id: i64) -> Option<&ThirdPartyMovie> {
        self.third_party_results.iter().find(|m| m.id == movie_id)
    }
}
